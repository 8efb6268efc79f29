//! Execution outcomes.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Binary outcomes of one circuit execution.
///
/// One row per shot, one column per declared classical bit, columns
/// ordered by register declaration order then bit index. Produced once
/// by a backend and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMatrix {
    shots: usize,
    width: usize,
    /// Row-major bit storage, `shots * width` entries of 0 or 1.
    bits: Vec<u8>,
}

impl OutcomeMatrix {
    /// Build an outcome matrix from per-shot rows.
    ///
    /// Every row must have exactly `width` entries, each 0 or 1.
    pub fn from_rows(width: usize, rows: Vec<Vec<u8>>) -> HalResult<Self> {
        let shots = rows.len();
        let mut bits = Vec::with_capacity(shots * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(HalError::MalformedOutcome(format!(
                    "row {i} has {} bits, expected {width}",
                    row.len()
                )));
            }
            if let Some(&bad) = row.iter().find(|&&b| b > 1) {
                return Err(HalError::MalformedOutcome(format!(
                    "row {i} contains non-binary value {bad}"
                )));
            }
            bits.extend_from_slice(&row);
        }
        Ok(Self { shots, width, bits })
    }

    /// A matrix with every entry set to `bit`. Test and mock fixture.
    pub fn filled(shots: usize, width: usize, bit: u8) -> Self {
        debug_assert!(bit <= 1);
        Self {
            shots,
            width,
            bits: vec![bit; shots * width],
        }
    }

    /// Number of rows (shots).
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Number of columns (declared classical bits).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get one row of outcomes.
    pub fn row(&self, shot: usize) -> &[u8] {
        &self.bits[shot * self.width..(shot + 1) * self.width]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bits.chunks_exact(self.width.max(1)).take(self.shots)
    }

    /// Count of 1s in a column, or `None` when the column is out of range.
    pub fn ones_in_column(&self, column: usize) -> Option<usize> {
        if column >= self.width {
            return None;
        }
        Some(
            self.bits
                .iter()
                .skip(column)
                .step_by(self.width)
                .filter(|&&b| b == 1)
                .count(),
        )
    }

    /// Count of 1s over the whole matrix.
    pub fn total_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

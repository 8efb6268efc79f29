//! Bounded-concurrency noise and bias sweeps.
//!
//! A sweep repeats circuit construction, execution, and aggregation across
//! a sequence of parameter values. Points are independent, so up to
//! `max_concurrency` of them run at once on a semaphore-bounded pool; the
//! returned points are re-ordered by original index regardless of
//! completion order.
//!
//! Failure policy: a point that times out or errors is recorded as failed
//! and the sweep continues. A run of [`FAILURE_ABORT_THRESHOLD`]
//! consecutive failed points means the backend is unavailable rather than
//! flaky, and the sweep aborts with [`ExpError::ExecutionFailure`] after
//! draining the in-flight points.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use triad_hal::Executor;
use triad_ir::{Circuit, NoiseParameters};

use crate::aggregate::estimate_probability;
use crate::error::{ExpError, ExpResult};

/// Consecutive failed points after which the remaining sweep aborts.
pub const FAILURE_ABORT_THRESHOLD: usize = 3;

/// Knobs shared by all sweep points.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Trials per point.
    pub shots: u32,
    /// Outcome-matrix column to aggregate.
    pub column: usize,
    /// Dephasing ratio: each point uses `t2 = t1 / ratio`.
    pub ratio: f64,
    /// Readout fidelity applied at every point.
    pub ro_fidelity: f64,
    /// Upper bound on concurrently executing points.
    pub max_concurrency: usize,
    /// Per-point bound on the backend call; `None` waits indefinitely.
    pub point_timeout: Option<Duration>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            shots: 10_000,
            column: 0,
            ratio: 1.5,
            ro_fidelity: 0.95,
            max_concurrency: 4,
            point_timeout: None,
        }
    }
}

/// Why one sweep point produced no estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum PointError {
    /// The backend call exceeded the configured bound.
    #[error("timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    /// The backend (or aggregation of its output) reported an error.
    #[error("{message}")]
    Backend { message: String },
}

/// One point of a noise sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    /// Position in the input parameter sequence.
    pub index: usize,
    /// Noise parameters this point executed under.
    pub noise: NoiseParameters,
    /// Probability estimate, or why the point failed.
    pub outcome: Result<f64, PointError>,
}

impl SweepPoint {
    /// Whether this point produced no estimate.
    pub fn is_failed(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Completed sweep, points ordered by original input index.
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    points: Vec<SweepPoint>,
}

impl SweepResult {
    fn new(mut points: Vec<SweepPoint>) -> Self {
        points.sort_by_key(|p| p.index);
        Self { points }
    }

    /// All points, in input order.
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Parallel `(t1, estimate)` sequences over the successful points.
    pub fn curve(&self) -> (Vec<f64>, Vec<f64>) {
        self.points
            .iter()
            .filter_map(|p| p.outcome.as_ref().ok().map(|&est| (p.noise.t1, est)))
            .unzip()
    }

    /// Count of failed points.
    pub fn num_failed(&self) -> usize {
        self.points.iter().filter(|p| p.is_failed()).count()
    }
}

/// Cooperative cancellation handle for a running sweep.
///
/// Cancellation is checked before each dispatch; in-flight backend calls
/// are not interrupted, the sweep waits for them and returns the points
/// gathered so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Logarithmically spaced values from `10^start_exp` to `10^stop_exp`.
pub fn logspace(start_exp: f64, stop_exp: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![10f64.powf(start_exp)],
        _ => {
            let step = (stop_exp - start_exp) / (num - 1) as f64;
            (0..num)
                .map(|k| 10f64.powf(start_exp + step * k as f64))
                .collect()
        }
    }
}

/// Sweep a probability estimate across a sequence of relaxation times.
///
/// For each `t1` in input order, derives
/// `NoiseParameters { t1, t2 = t1 / ratio, ro_fidelity }`, builds a
/// circuit via `factory`, executes it with `run_noisy`, and aggregates
/// the configured output column. The factory is called once per point on
/// the dispatching task; sharing one pre-built circuit across points is a
/// `move || Arc::clone(..)` away.
pub async fn sweep<F>(
    executor: Arc<dyn Executor>,
    t1_values: &[f64],
    factory: F,
    config: &SweepConfig,
    cancel: &CancelToken,
) -> ExpResult<SweepResult>
where
    F: Fn(&NoiseParameters) -> Arc<Circuit>,
{
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
    let mut tasks: JoinSet<SweepPoint> = JoinSet::new();
    let mut points: Vec<SweepPoint> = Vec::with_capacity(t1_values.len());
    let mut status: BTreeMap<usize, bool> = BTreeMap::new();
    let mut last_error: Option<String> = None;

    for (index, &t1) in t1_values.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!(index, "sweep cancelled, skipping remaining points");
            break;
        }
        while let Some(joined) = tasks.try_join_next() {
            collect(joined, &mut points, &mut status, &mut last_error);
        }
        if let Some((first_index, failures)) = failure_run(&status) {
            while let Some(joined) = tasks.join_next().await {
                collect(joined, &mut points, &mut status, &mut last_error);
            }
            return Err(abort_error(first_index, failures, last_error));
        }

        let noise = NoiseParameters::new(t1, t1 / config.ratio, config.ro_fidelity)?;
        let circuit = factory(&noise);
        // The semaphore is never closed, acquisition cannot fail.
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let executor = Arc::clone(&executor);
        let (shots, column, bound) = (config.shots, config.column, config.point_timeout);
        tasks.spawn(async move {
            let _permit = permit;
            run_point(executor, circuit, noise, shots, column, bound, index).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        collect(joined, &mut points, &mut status, &mut last_error);
    }
    if let Some((first_index, failures)) = failure_run(&status) {
        return Err(abort_error(first_index, failures, last_error));
    }
    Ok(SweepResult::new(points))
}

async fn run_point(
    executor: Arc<dyn Executor>,
    circuit: Arc<Circuit>,
    noise: NoiseParameters,
    shots: u32,
    column: usize,
    bound: Option<Duration>,
    index: usize,
) -> SweepPoint {
    let run = executor.run_noisy(&circuit, shots, &noise);
    let outcome = match bound {
        Some(bound) => match tokio::time::timeout(bound, run).await {
            Ok(result) => result.map_err(|e| PointError::Backend {
                message: e.to_string(),
            }),
            Err(_) => Err(PointError::Timeout {
                timeout_ms: bound.as_millis() as u64,
            }),
        },
        None => run.await.map_err(|e| PointError::Backend {
            message: e.to_string(),
        }),
    };
    let outcome = outcome.and_then(|outcomes| {
        estimate_probability(&outcomes, column).map_err(|e| PointError::Backend {
            message: e.to_string(),
        })
    });
    match &outcome {
        Ok(estimate) => debug!(index, t1 = noise.t1, estimate, "sweep point complete"),
        Err(err) => warn!(index, t1 = noise.t1, %err, "sweep point failed"),
    }
    SweepPoint {
        index,
        noise,
        outcome,
    }
}

fn collect(
    joined: Result<SweepPoint, JoinError>,
    points: &mut Vec<SweepPoint>,
    status: &mut BTreeMap<usize, bool>,
    last_error: &mut Option<String>,
) {
    match joined {
        Ok(point) => {
            status.insert(point.index, point.is_failed());
            if let Err(err) = &point.outcome {
                *last_error = Some(err.to_string());
            }
            points.push(point);
        }
        Err(err) => warn!(error = %err, "sweep task failed to join"),
    }
}

/// Longest run of adjacent failed indices, if it reaches the abort
/// threshold. Gaps (indices still in flight) break a run.
fn failure_run(status: &BTreeMap<usize, bool>) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut run_start = 0;
    let mut run_len = 0;
    let mut prev: Option<usize> = None;
    for (&index, &failed) in status {
        let adjacent = prev.is_some_and(|p| p + 1 == index);
        if failed {
            if run_len == 0 || !adjacent {
                run_start = index;
                run_len = 1;
            } else {
                run_len += 1;
            }
            if run_len >= FAILURE_ABORT_THRESHOLD
                && best.is_none_or(|(_, len)| run_len > len)
            {
                best = Some((run_start, run_len));
            }
        } else {
            run_len = 0;
        }
        prev = Some(index);
    }
    best
}

fn abort_error(first_index: usize, failures: usize, last_error: Option<String>) -> ExpError {
    ExpError::ExecutionFailure {
        first_index,
        failures,
        last_error: last_error.unwrap_or_else(|| "unknown".to_string()),
    }
}

/// One point of a secret-bias sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiasPoint {
    /// The prepared probability of 0, `p0` (ground truth).
    pub expected: f64,
    /// The reconstructed probability of 0.
    pub measured: f64,
}

/// Sweep the prepared secret bias over a grid at fixed noise parameters.
///
/// Produces `(expected p0, measured probability of 0)` pairs for the
/// reconstruction-fidelity curve. Points run sequentially; any backend
/// error aborts the sweep.
pub async fn bias_sweep<F>(
    executor: Arc<dyn Executor>,
    p0_values: &[f64],
    noise: &NoiseParameters,
    factory: F,
    config: &SweepConfig,
    cancel: &CancelToken,
) -> ExpResult<Vec<BiasPoint>>
where
    F: Fn(f64) -> Arc<Circuit>,
{
    let mut points = Vec::with_capacity(p0_values.len());
    for &p0 in p0_values {
        if cancel.is_cancelled() {
            debug!(p0, "bias sweep cancelled");
            break;
        }
        let circuit = factory(p0);
        let outcomes = executor.run_noisy(&circuit, config.shots, noise).await?;
        let measured = 1.0 - estimate_probability(&outcomes, config.column)?;
        debug!(p0, measured, "bias point complete");
        points.push(BiasPoint {
            expected: p0,
            measured,
        });
    }
    Ok(points)
}

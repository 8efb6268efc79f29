//! Tomography command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use triad_adapter_sim::SimulatorExecutor;
use triad_exp::{density_matrix, reconstruct};
use triad_hal::Executor;
use triad_proto::{MeasurementBasis, build_tomography};

use super::common::{export_json, secret_profile};

#[derive(Serialize)]
struct TomographyReport {
    shots: u32,
    rx: f64,
    ry: f64,
    rz: f64,
    norm: f64,
    physical: bool,
    rho: [[[f64; 2]; 2]; 2],
}

/// Execute the tomography command.
pub async fn execute(shots: u32, p0: Option<f64>, export: Option<&str>) -> Result<()> {
    let secret = secret_profile(p0);
    let executor = SimulatorExecutor::new();

    println!(
        "{} Reconstructing Charlie's state from three measurement bases ({shots} shots each)",
        style("→").cyan().bold()
    );

    let mut outcomes = Vec::with_capacity(3);
    for basis in [MeasurementBasis::X, MeasurementBasis::Y, MeasurementBasis::Z] {
        let circuit = build_tomography(&secret, basis)?;
        outcomes.push(executor.run(&circuit, shots).await?);
    }

    let vector = reconstruct(&outcomes[0], &outcomes[1], &outcomes[2], 0)?;
    let rho = density_matrix(&vector);

    println!("  Bloch vector: {vector}");
    println!("  Norm:         {:.4}", vector.norm());
    if !vector.is_physical() {
        println!(
            "  {} vector norm exceeds 1, estimate is unphysical",
            style("warning:").yellow().bold()
        );
    }
    println!("  Density matrix:");
    for row in rho.rows() {
        print!("   ");
        for entry in row {
            print!("  {:+.4}{:+.4}i", entry.re, entry.im);
        }
        println!();
    }

    if let Some(path) = export {
        let report = TomographyReport {
            shots,
            rx: vector.rx,
            ry: vector.ry,
            rz: vector.rz,
            norm: vector.norm(),
            physical: vector.is_physical(),
            rho: [
                [
                    [rho[[0, 0]].re, rho[[0, 0]].im],
                    [rho[[0, 1]].re, rho[[0, 1]].im],
                ],
                [
                    [rho[[1, 0]].re, rho[[1, 0]].im],
                    [rho[[1, 1]].re, rho[[1, 1]].im],
                ],
            ],
        };
        export_json(path, &report)?;
    }
    Ok(())
}

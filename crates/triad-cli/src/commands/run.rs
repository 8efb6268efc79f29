//! Run command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use triad_adapter_sim::SimulatorExecutor;
use triad_exp::estimate_probability;
use triad_hal::Executor;
use triad_proto::{
    CorrectionMode, ProtocolOptions, build_with, coherent_output_column, output_column,
};

use super::common::{export_json, secret_profile};

#[derive(Serialize)]
struct RunReport {
    circuit: String,
    shots: u32,
    estimates: Vec<InstanceEstimate>,
}

#[derive(Serialize)]
struct InstanceEstimate {
    instance: u32,
    expected_p1: f64,
    measured_p1: f64,
}

/// Execute the run command.
pub async fn execute(
    instances: u32,
    shots: u32,
    p0: Option<f64>,
    coherent: bool,
    export: Option<&str>,
) -> Result<()> {
    let secret = secret_profile(p0);
    let mode = if coherent {
        CorrectionMode::Coherent
    } else {
        CorrectionMode::Classical
    };
    let circuit = build_with(
        instances,
        &secret,
        ProtocolOptions {
            correction: mode,
            ..Default::default()
        },
    )?;

    println!(
        "{} Running {} ({} instances, {} shots)",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        instances,
        shots
    );

    let sim = SimulatorExecutor::new();
    let outcomes = sim.run(&circuit, shots).await?;

    let mut estimates = Vec::with_capacity(instances as usize);
    for i in 0..instances {
        let column = match mode {
            CorrectionMode::Classical => output_column(instances, i),
            CorrectionMode::Coherent => coherent_output_column(i),
        };
        let measured = estimate_probability(&outcomes, column)?;
        let expected = 1.0 - secret.expected_p0(i);
        println!(
            "  instance {i}: P(1) = {} (expected {expected:.4})",
            style(format!("{measured:.4}")).yellow()
        );
        estimates.push(InstanceEstimate {
            instance: i,
            expected_p1: expected,
            measured_p1: measured,
        });
    }

    if let Some(path) = export {
        export_json(
            path,
            &RunReport {
                circuit: circuit.name().to_string(),
                shots,
                estimates,
            },
        )?;
    }
    Ok(())
}

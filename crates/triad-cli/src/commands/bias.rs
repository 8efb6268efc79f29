//! Bias-sweep command implementation.

use std::cell::Cell;
use std::sync::Arc;

use anyhow::Result;
use console::style;

use triad_adapter_sim::SimulatorExecutor;
use triad_compile::lower_to_native;
use triad_exp::{CancelToken, SweepConfig, bias_sweep};
use triad_hal::Executor;
use triad_ir::{Circuit, NoiseParameters};
use triad_proto::{
    CorrectionMode, ProtocolOptions, SecretProfile, build_with, coherent_output_column,
};

use super::common::export_json;

/// Execute the bias-sweep command.
pub async fn execute(shots: u32, step: f64, t1: f64, t2: f64, export: Option<&str>) -> Result<()> {
    anyhow::ensure!(step > 0.0 && step <= 1.0, "step must be in (0, 1]");
    let mut grid = Vec::new();
    let mut p0: f64 = 0.0;
    while p0 <= 1.0 + 1e-9 {
        grid.push(p0.min(1.0));
        p0 += step;
    }

    let noise = NoiseParameters::new(t1, t2, 1.0)?;
    println!(
        "{} Sweeping secret bias over {} points under {noise} ({shots} shots each)",
        style("→").cyan().bold(),
        grid.len()
    );

    // Circuits are pre-built so the factory stays infallible; the sweep
    // consumes them in grid order.
    let circuits = grid
        .iter()
        .map(|&p0| {
            let circuit = build_with(
                1,
                &SecretProfile::Bias(p0),
                ProtocolOptions {
                    correction: CorrectionMode::Coherent,
                    ..Default::default()
                },
            )?;
            Ok(Arc::new(lower_to_native(&circuit)?))
        })
        .collect::<Result<Vec<Arc<Circuit>>>>()?;

    let config = SweepConfig {
        shots,
        column: coherent_output_column(0),
        ..SweepConfig::default()
    };
    let executor: Arc<dyn Executor> = Arc::new(SimulatorExecutor::new());
    let next = Cell::new(0usize);
    let points = bias_sweep(
        executor,
        &grid,
        &noise,
        |_| {
            let i = next.get();
            next.set(i + 1);
            Arc::clone(&circuits[i])
        },
        &config,
        &CancelToken::new(),
    )
    .await?;

    println!("  {:>10}  {:>10}", "p0", "measured");
    for point in &points {
        println!("  {:>10.3}  {:>10.4}", point.expected, point.measured);
    }

    if let Some(path) = export {
        export_json(path, &points)?;
    }
    Ok(())
}

//! Noise-sweep command implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use triad_adapter_sim::SimulatorExecutor;
use triad_compile::lower_to_native;
use triad_exp::{CancelToken, SweepConfig, logspace, sweep};
use triad_hal::Executor;
use triad_proto::{CorrectionMode, ProtocolOptions, build_with, coherent_output_column};

use super::common::{export_json, secret_profile};

/// Execute the noise-sweep command.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    shots: u32,
    points: usize,
    start_exp: f64,
    stop_exp: f64,
    ratio: f64,
    ro_fidelity: f64,
    p0: Option<f64>,
    concurrency: usize,
    timeout: Option<u64>,
    export: Option<&str>,
) -> Result<()> {
    let secret = secret_profile(p0);
    let circuit = build_with(
        1,
        &secret,
        ProtocolOptions {
            correction: CorrectionMode::Coherent,
            ..Default::default()
        },
    )?;
    let lowered = Arc::new(lower_to_native(&circuit)?);
    let t1s = logspace(start_exp, stop_exp, points);

    println!(
        "{} Sweeping {} points, T1 in [{:.1e}, {:.1e}] s ({} shots each)",
        style("→").cyan().bold(),
        points,
        10f64.powf(start_exp),
        10f64.powf(stop_exp),
        shots
    );

    let config = SweepConfig {
        shots,
        column: coherent_output_column(0),
        ratio,
        ro_fidelity,
        max_concurrency: concurrency,
        point_timeout: timeout.map(Duration::from_secs),
    };
    let executor: Arc<dyn Executor> = Arc::new(SimulatorExecutor::new());

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    bar.set_message(format!("running {points} sweep points"));
    bar.enable_steady_tick(Duration::from_millis(100));

    let result = sweep(
        executor,
        &t1s,
        move |_| Arc::clone(&lowered),
        &config,
        &CancelToken::new(),
    )
    .await;
    bar.finish_and_clear();
    let result = result?;

    println!("  {:>12}  {:>12}  {:>8}", "T1 (s)", "T2 (s)", "P(1)");
    for point in result.points() {
        match &point.outcome {
            Ok(estimate) => println!(
                "  {:>12.4e}  {:>12.4e}  {:>8.4}",
                point.noise.t1, point.noise.t2, estimate
            ),
            Err(err) => println!(
                "  {:>12.4e}  {:>12.4e}  {}",
                point.noise.t1,
                point.noise.t2,
                style(format!("failed: {err}")).red()
            ),
        }
    }
    if result.num_failed() > 0 {
        println!(
            "{} {} of {} points failed",
            style("!").yellow().bold(),
            result.num_failed(),
            result.points().len()
        );
    }

    if let Some(path) = export {
        export_json(path, &result)?;
    }
    Ok(())
}

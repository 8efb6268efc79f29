//! TRIAD Command-Line Interface
//!
//! Drivers for the HBB secret-sharing experiments: a single protocol run,
//! the decoherence noise sweep, the secret-bias sweep, and single-qubit
//! state tomography of the reconstructed secret.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{bias, noise, run, tomography};

/// TRIAD - three-party quantum secret sharing experiments
#[derive(Parser)]
#[command(name = "triad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the protocol on the ideal simulator and report the
    /// reconstructed secret per instance
    Run {
        /// Number of batched protocol instances
        #[arg(short, long, default_value = "1")]
        instances: u32,

        /// Number of shots
        #[arg(short, long, default_value = "1000")]
        shots: u32,

        /// Secret bias P(0); the reference H-T-H secret when omitted
        #[arg(short, long)]
        p0: Option<f64>,

        /// Use unitary (coherent) corrections instead of measured ones
        #[arg(long)]
        coherent: bool,

        /// Write results as JSON to this file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Sweep reconstruction fidelity across decoherence times
    Noise {
        /// Number of shots per sweep point
        #[arg(short, long, default_value = "10000")]
        shots: u32,

        /// Number of sweep points
        #[arg(long, default_value = "30")]
        points: usize,

        /// log10 of the smallest T1 in seconds
        #[arg(long, default_value = "-7", allow_hyphen_values = true)]
        start_exp: f64,

        /// log10 of the largest T1 in seconds
        #[arg(long, default_value = "-3", allow_hyphen_values = true)]
        stop_exp: f64,

        /// Dephasing ratio, T2 = T1 / ratio
        #[arg(long, default_value = "1.5")]
        ratio: f64,

        /// Readout assignment fidelity
        #[arg(long, default_value = "0.95")]
        ro_fidelity: f64,

        /// Secret bias P(0); the reference H-T-H secret when omitted
        #[arg(short, long)]
        p0: Option<f64>,

        /// Maximum concurrently executing points
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Per-point timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Write the sweep result as JSON to this file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Sweep the prepared secret bias under fixed noise
    Bias {
        /// Number of shots per grid point
        #[arg(short, long, default_value = "1000")]
        shots: u32,

        /// Grid step for p0 in [0, 1]
        #[arg(long, default_value = "0.05")]
        step: f64,

        /// Relaxation time T1 in seconds
        #[arg(long, default_value = "27.07e-6")]
        t1: f64,

        /// Dephasing time T2 in seconds
        #[arg(long, default_value = "21.43e-6")]
        t2: f64,

        /// Write the bias curve as JSON to this file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Reconstruct the shared secret's Bloch vector and density matrix
    Tomography {
        /// Number of shots per measurement basis
        #[arg(short, long, default_value = "10000")]
        shots: u32,

        /// Secret bias P(0); the reference H-T-H secret when omitted
        #[arg(short, long)]
        p0: Option<f64>,

        /// Write the estimate as JSON to this file
        #[arg(short, long)]
        export: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            instances,
            shots,
            p0,
            coherent,
            export,
        } => run::execute(instances, shots, p0, coherent, export.as_deref()).await,

        Commands::Noise {
            shots,
            points,
            start_exp,
            stop_exp,
            ratio,
            ro_fidelity,
            p0,
            concurrency,
            timeout,
            export,
        } => {
            noise::execute(
                shots,
                points,
                start_exp,
                stop_exp,
                ratio,
                ro_fidelity,
                p0,
                concurrency,
                timeout,
                export.as_deref(),
            )
            .await
        }

        Commands::Bias {
            shots,
            step,
            t1,
            t2,
            export,
        } => bias::execute(shots, step, t1, t2, export.as_deref()).await,

        Commands::Tomography { shots, p0, export } => {
            tomography::execute(shots, p0, export.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

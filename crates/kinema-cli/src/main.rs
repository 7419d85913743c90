//! Kinema CLI: benchmarking, simulation, snapshot inspection and config validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kinema")]
#[command(version, about = "Kinema: semi-implicit particle and rigid-body time stepping")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmark scenarios and report metrics.
    Benchmark {
        /// Scenario to run (hanging_cloth, pendulum_chain, soft_block, box_drop, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,

        /// Also write metrics as JSON to this path.
        #[arg(long)]
        json: Option<String>,

        /// Solver config (TOML) overriding each scenario's own.
        #[arg(short, long)]
        config: Option<String>,

        /// Cloth or solid material from the built-in library.
        #[arg(short, long)]
        material: Option<String>,

        /// Override the number of steps.
        #[arg(long)]
        steps: Option<u32>,
    },

    /// Run one scenario with telemetry and snapshot output.
    Simulate {
        /// Scenario to run.
        #[arg(short, long, default_value = "hanging_cloth")]
        scenario: String,

        /// Solver config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Override the number of steps.
        #[arg(long)]
        steps: Option<u32>,

        /// Write a snapshot every N steps into `snapshot_dir`.
        #[arg(long, default_value_t = 0)]
        snapshot_every: u64,

        /// Directory for snapshot files.
        #[arg(long, default_value = "snapshots")]
        snapshot_dir: String,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a solver config or a material library file (TOML).
    Validate {
        /// Path to the file.
        path: String,

        /// Treat the file as a material library.
        #[arg(long)]
        materials: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Benchmark {
            scenario,
            output,
            json,
            config,
            material,
            steps,
        } => commands::benchmark(&commands::BenchmarkArgs {
            scenario: &scenario,
            output: output.as_deref(),
            json: json.as_deref(),
            config: config.as_deref(),
            material: material.as_deref(),
            steps,
        }),
        Commands::Simulate {
            scenario,
            config,
            steps,
            snapshot_every,
            snapshot_dir,
        } => commands::simulate(&scenario, config.as_deref(), steps, snapshot_every, &snapshot_dir),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path, materials } => commands::validate(&path, materials),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

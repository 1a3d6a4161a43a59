//! Planar CLI — simulation, validation, and snapshot inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "planar")]
#[command(version, about = "Planar — 2D rigid-body contact resolution engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the stacking scene from a config file.
    Simulate {
        /// Path to world config (TOML). Defaults are used if absent.
        #[arg(short, long, default_value = "planar.toml")]
        config: String,

        /// Number of steps to simulate.
        #[arg(short, long, default_value_t = 600)]
        steps: u64,

        /// Number of boxes in the stack.
        #[arg(short = 'n', long, default_value_t = 5)]
        boxes: u32,

        /// Write a JSON snapshot of the final state.
        #[arg(short, long)]
        output: Option<String>,

        /// Emit per-step telemetry through tracing.
        #[arg(long)]
        telemetry: bool,
    },

    /// Validate a world config (TOML) or polygon vertex list (JSON).
    Validate {
        /// Path to config or polygon file.
        path: String,
    },

    /// Inspect a JSON state snapshot.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            steps,
            boxes,
            output,
            telemetry,
        } => commands::simulate(&config, steps, boxes, output.as_deref(), telemetry),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Inspect { path } => commands::inspect(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

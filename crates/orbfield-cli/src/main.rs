//! Orbfield CLI - Headless driver for the orb field simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, count, message, simulate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orbfield")]
#[command(about = "Drifting-orb background simulation, run headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Read configuration from this file instead of the layered defaults
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation on a recording surface and print FPS reports
    Simulate {
        /// Surface width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Surface height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// How long to run, in seconds
        #[arg(long, default_value = "3")]
        seconds: f64,

        /// Orb density factor (0.1 - 3)
        #[arg(long)]
        density: Option<f64>,

        /// Max orb size (1 - 3)
        #[arg(long)]
        size: Option<f64>,

        /// XY speed (1 - 10)
        #[arg(long)]
        speed: Option<f64>,

        /// Z depth (0 - 3)
        #[arg(long)]
        depth: Option<f64>,

        /// Hide the surface after this many seconds
        #[arg(long)]
        pause_after: Option<f64>,

        /// How long to stay hidden, in seconds
        #[arg(long, default_value = "1")]
        pause_for: f64,

        /// Print FPS reports as JSON events
        #[arg(long)]
        json: bool,
    },

    /// Print how many orbs a surface gets
    Count {
        /// Surface width in pixels
        width: u32,

        /// Surface height in pixels
        height: u32,

        /// Orb density factor; defaults to the configured value
        #[arg(long)]
        density: Option<f64>,
    },

    /// Print the resolved configuration as TOML
    Config,

    /// Check a JSON control message and print its normalized form
    Message {
        /// Message text, e.g. '{"type":"PAUSE"}'
        json: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            width,
            height,
            seconds,
            density,
            size,
            speed,
            depth,
            pause_after,
            pause_for,
            json,
        } => simulate::run(
            simulate::SimulateArgs {
                width,
                height,
                seconds,
                density,
                size,
                speed,
                depth,
                pause_after,
                pause_for,
                json,
            },
            cli.config.as_deref(),
        ),
        Commands::Count {
            width,
            height,
            density,
        } => count::run(width, height, density, cli.config.as_deref()),
        Commands::Config => config::run(cli.config.as_deref()),
        Commands::Message { json } => message::run(&json),
    }
}

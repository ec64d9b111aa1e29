//! Swipe CLI
//!
//! Replay recorded touch traces through the swipe engine, inspect fling
//! plans, and dump the engine configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use swipe_animation::FlingCurvePlanner;
use swipe_core::SwipeConfig;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod host;
mod replay;
mod trace;

use trace::Trace;

#[derive(Parser)]
#[command(name = "swipe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Swipe-to-dismiss engine tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded touch trace and print the host callbacks
    Replay {
        /// Trace file (TOML)
        trace: PathBuf,

        /// Engine configuration (defaults to ./swipe.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the animation the fling planner picks for a release
    Plan {
        /// Current translation (px)
        #[arg(long, allow_hyphen_values = true)]
        from: f32,

        /// Off-screen target translation (px)
        #[arg(long, allow_hyphen_values = true)]
        to: f32,

        /// Release velocity (px/s)
        #[arg(long, allow_hyphen_values = true)]
        velocity: f32,

        /// Item extent along the drag axis (px)
        #[arg(long)]
        extent: f32,

        /// Engine configuration (defaults to ./swipe.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective engine configuration as TOML
    Config {
        /// Engine configuration (defaults to ./swipe.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay {
            trace,
            config,
            json,
        } => cmd_replay(&trace, config.as_deref(), json),

        Commands::Plan {
            from,
            to,
            velocity,
            extent,
            config,
        } => cmd_plan(from, to, velocity, extent, config.as_deref()),

        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn cmd_replay(trace_path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load(config_path)?;
    let trace = Trace::load(trace_path)?;

    info!(
        "Replaying {} ({} items, {} events)",
        trace_path.display(),
        trace.items.len(),
        trace.events.len()
    );

    let report = replay::replay(&trace, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Callbacks:");
    if report.events.is_empty() {
        println!("  (none)");
    }
    for event in &report.events {
        println!("  {:>6}ms  item {:<4} {:?}", event.time_ms, event.item, event.kind);
    }

    println!();
    println!("Items:");
    for item in &report.items {
        println!(
            "  item {:<4} translation {:>8.1}  alpha {:.2}  progress {:.2}",
            item.id, item.translation, item.alpha, item.progress
        );
    }

    println!();
    println!("Settled at {}ms", report.settled_at_ms);
    if report.unsettled > 0 {
        anyhow::bail!("{} animation(s) never settled", report.unsettled);
    }

    Ok(())
}

fn cmd_plan(from: f32, to: f32, velocity: f32, extent: f32, config_path: Option<&Path>) -> Result<()> {
    if !(extent.is_finite() && extent > 0.0) {
        anyhow::bail!("Extent must be positive, got {}", extent);
    }

    let config = config::load(config_path)?;
    let planner = FlingCurvePlanner::new(config.fling_config());
    let plan = planner.plan_dismiss(from, to, velocity, extent);

    println!("Mode:     {:?}", plan.fling_mode);
    println!("Duration: {}ms", plan.duration_ms);
    println!();
    println!("  t      value");
    for step in 0..=10 {
        let t = step as f32 / 10.0;
        let value = from + (to - from) * plan.curve.apply(t);
        println!("  {:.1}  {:>9.1}", t, value);
    }

    Ok(())
}

fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config: SwipeConfig = config::load(config_path)?;
    print!("{}", config::to_toml(&config)?);
    Ok(())
}

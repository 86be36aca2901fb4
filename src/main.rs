/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};

use marimba::config;
use marimba::optimizer::{AnnealConfig, Annealer};
use marimba::report::MappingReport;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Marimba MCP task-mapping optimizer.
///
/// Example:
///   marimba model.yaml --seed 7 -o mapping.yaml
#[derive(Debug, Parser)]
#[command(
    name = "marimba",
    about = "Marimba MCP task-mapping optimizer – laxity-driven simulated annealing",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML system model (application tasks + platform MCPs).
    model: PathBuf,

    /// Write the mapping report to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Seed for the random generator; omit for a fresh entropy seed.
    /// Runs with the same seed and model are reproducible.
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Starting annealing temperature.
    #[arg(long = "initial-temperature")]
    initial_temperature: Option<f64>,

    /// Geometric cooling factor in (0, 1), applied once per iteration.
    #[arg(long = "cooling-factor")]
    cooling_factor: Option<f64>,

    /// Temperature floor that ends the run.
    #[arg(long = "temperature-floor")]
    temperature_floor: Option<f64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        model = ?cli.model,
        output = ?cli.output,
        seed = ?cli.seed,
        "Configuration"
    );

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let model = config::load_model(&cli.model)?;

    let mut anneal = AnnealConfig::default();
    if let Some(t) = cli.initial_temperature {
        anneal.initial_temperature = t;
    }
    if let Some(a) = cli.cooling_factor {
        anneal.cooling_factor = a;
    }
    if let Some(f) = cli.temperature_floor {
        anneal.temperature_floor = f;
    }

    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut annealer = Annealer::new(&model, anneal, rng)?;
    let outcome = annealer.run()?;

    info!(
        iterations = outcome.iterations,
        accepted = outcome.accepted,
        final_laxity = outcome.laxity,
        best_laxity = outcome.best_laxity,
        "Optimization finished"
    );

    // The report carries the best solution observed across the run.
    let report = MappingReport::from_solution(&model, &outcome.best_solution);
    let yaml =
        serde_yaml::to_string(&report).context("Failed to serialise the mapping report")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &yaml)
                .with_context(|| format!("Cannot write report to: {}", path.display()))?;
            info!("Mapping report written to: {}", path.display());
        }
        None => print!("{yaml}"),
    }

    Ok(())
}

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use evo_walkers::simulation::brain::Genome;
use evo_walkers::simulation::driver::Simulation;
use evo_walkers::simulation::error::SimulationError;
use evo_walkers::simulation::params::Params;

/// Evolve soft-body walkers without a window.
#[derive(Debug, Parser)]
#[command(name = "evo-walkers", version)]
struct Cli {
    /// JSON parameter file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to evolve before exiting.
    #[arg(long, default_value_t = 20)]
    generations: u32,
    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Override the population size.
    #[arg(long)]
    population: Option<usize>,
    /// Run at warp speed.
    #[arg(long)]
    warp: bool,
    /// Seed every creature from a saved genome.
    #[arg(long)]
    load_best: Option<PathBuf>,
    /// Write the best genome here when done.
    #[arg(long)]
    save_best: Option<PathBuf>,
    /// Write a render snapshot of the final world state here.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), SimulationError> {
    let mut params = match &cli.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }
    if let Some(size) = cli.population {
        params.population_size = size;
        params.elite_count = params.elite_count.min(size);
    }

    let mut sim = Simulation::new(params)?;
    if let Some(path) = &cli.load_best {
        let genome = Genome::load_from_file(path)?;
        sim.load_best(&genome)?;
    }
    if cli.warp {
        sim.toggle_warp();
    }

    info!(
        "evolving {} creatures for {} generations",
        sim.population().size(),
        cli.generations
    );

    while sim.generation() < cli.generations {
        let report = sim.step();
        if report.retired > 0 {
            info!("{} creatures retired after diverging", report.retired);
        }
    }

    if let Some(best) = sim.history().best_ever() {
        info!(
            "best generation: {} with fitness {:.1}",
            best.generation, best.best_fitness
        );
    }

    if let Some(path) = &cli.save_best {
        if let Some(genome) = sim.save_best() {
            genome.save_to_file(path)?;
            info!("saved best genome to {}", path.display());
        }
    }

    if let Some(path) = &cli.snapshot {
        let json = serde_json::to_string_pretty(&sim.snapshot())?;
        std::fs::write(path, json)?;
        info!("wrote snapshot to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

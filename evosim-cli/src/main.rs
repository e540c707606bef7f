mod worldgen;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use evosim_config::{
    load_simulation_config_from_path, validate_simulation_config, SimulationConfig,
};
use evosim_core::Simulation;
use evosim_types::{GenerationSummary, WeekReport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "evosim")]
#[command(about = "EvoSim grid-world evolution driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the configured number of generations and print their summaries.
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Resolve a handful of weeks and print each week's report.
    Week {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        weeks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    generations: Vec<GenerationSummary>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            format,
        } => run_command(config, seed, format),
        Commands::Week {
            config,
            weeks,
            seed,
        } => week_command(config, weeks, seed),
    }
}

fn run_command(config_path: Option<PathBuf>, seed: u64, format: OutputFormat) -> Result<()> {
    let mut sim = build_simulation(config_path, seed)?;
    let generations = sim.run()?;

    match format {
        OutputFormat::Pretty => {
            for summary in &generations {
                let outcome = if summary.extinction {
                    "extinction".to_owned()
                } else if let Some(winner) = summary.winner {
                    format!("winner={}", winner.0)
                } else {
                    "time limit".to_owned()
                };
                println!(
                    "generation={} weeks={} survivors={} casualties={} outcome={}",
                    summary.generation,
                    summary.weeks_completed,
                    summary.survivors,
                    summary.casualties,
                    outcome
                );
            }
        }
        OutputFormat::Json => {
            let summary = RunSummary { seed, generations };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn week_command(config_path: Option<PathBuf>, weeks: u32, seed: u64) -> Result<()> {
    let mut sim = build_simulation(config_path, seed)?;

    let mut reports: Vec<WeekReport> = Vec::with_capacity(weeks.max(1) as usize);
    for _ in 0..weeks.max(1) {
        reports.push(sim.resolve_week());
    }
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn build_simulation(config_path: Option<PathBuf>, seed: u64) -> Result<Simulation> {
    let config = load_config(config_path)?;
    validate_simulation_config(&config).map_err(anyhow::Error::msg)?;

    // World and population generation live out here, on their own stream;
    // the core only ever sees the finished parts.
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x7E0_51A1);
    let world = worldgen::generate_world(&config, &mut rng);
    let animals = worldgen::generate_population(&config, &world, &mut rng)?;

    Ok(Simulation::from_parts(config, world, animals, seed)?)
}

fn load_config(path: Option<PathBuf>) -> Result<SimulationConfig> {
    match path {
        Some(path) => load_simulation_config_from_path(&path),
        None => Ok(SimulationConfig::default()),
    }
}

//! Balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                               # defaults
//!   cargo run --bin simulate -- -n 100 --level 10 --dungeon dungeon_frozen_cavern
//!   cargo run --bin simulate -- --seed 42 --arena 50 --no-dungeon
//!   RUST_LOG=mindquest=debug cargo run --bin simulate -- -n 1

use clap::Parser;
use mindquest::build_info::version_string;
use mindquest::character::CharacterClass;
use mindquest::simulator::{run_simulation_with, SimConfig};
use mindquest::{EngineConfig, GameEngine};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Monte Carlo balance runs over dungeons and the arena")]
struct Args {
    /// Number of simulated characters
    #[arg(short = 'n', long, default_value_t = 200)]
    runs: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Character level
    #[arg(short, long, default_value_t = 5)]
    level: u32,

    /// Character class id (warrior, ranger, iceMage, ...)
    #[arg(short, long, default_value = "warrior", value_parser = parse_class)]
    class: CharacterClass,

    /// Dungeon id to attempt each run
    #[arg(short, long, default_value = "dungeon_forest_crypt")]
    dungeon: String,

    /// Skip the dungeon attempt
    #[arg(long)]
    no_dungeon: bool,

    /// Arena matches per run
    #[arg(short, long, default_value_t = 20)]
    arena: u32,

    /// JSON file with engine config overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log every run
    #[arg(short, long)]
    verbose: bool,
}

fn parse_class(s: &str) -> Result<CharacterClass, String> {
    CharacterClass::ALL
        .into_iter()
        .find(|c| c.id().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown class '{}'", s))
}

fn load_engine(path: Option<&PathBuf>) -> Result<GameEngine, String> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            EngineConfig::from_json(&text).map_err(|e| e.to_string())?
        }
        None => EngineConfig::default(),
    };
    GameEngine::new(config).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let engine = match load_engine(args.config.as_ref()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        level: args.level.max(1),
        class: args.class,
        dungeon_id: (!args.no_dungeon).then(|| args.dungeon.clone()),
        arena_matches: args.arena,
        verbosity: if args.verbose { 2 } else { 1 },
    };

    if !args.json {
        println!("mindquest simulator {}", version_string());
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Class / Level:  {} / {}", config.class.name(), config.level);
        if let Some(dungeon) = &config.dungeon_id {
            println!("  Dungeon:        {}", dungeon);
        }
        println!("  Arena Matches:  {}", config.arena_matches);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    match run_simulation_with(&engine, &config) {
        Ok(report) if args.json => {
            println!("{}", report.to_json());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            println!("{}", report.to_text());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use skirmish_app::game_loop::{self, LoopOptions};
use skirmish_app::logging;
use skirmish_core::commands::SimCommand;
use skirmish_core::constants::TICK_RATE;
use skirmish_sim::{Scenario, SimConfig, SimulationEngine};

/// Headless two-team tank battle
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file; the built-in skirmish is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Battle length limit in simulated seconds
    #[arg(short, long, default_value_t = 300)]
    duration: u64,

    /// Simulation speed multiplier
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Run at wall-clock speed instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Disable random ammo crate drops
    #[arg(long)]
    no_ammo_drops: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Print the scenario as JSON and exit
    #[arg(long)]
    print_scenario: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::default(),
    };

    if args.print_scenario {
        println!("{}", serde_json::to_string_pretty(&scenario)?);
        return Ok(());
    }

    let config = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        ammo_drops: !args.no_ammo_drops,
    };
    let mut engine = SimulationEngine::with_scenario(config, &scenario)
        .with_context(|| format!("building scenario `{}`", scenario.name))?;
    engine.queue_command(SimCommand::StartAll);

    info!("running `{}` with seed {}", scenario.name, args.seed);
    let outcome = game_loop::run_battle(
        &mut engine,
        &LoopOptions {
            max_ticks: args.duration * u64::from(TICK_RATE),
            realtime: args.realtime,
        },
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.last)?);
        return Ok(());
    }

    match outcome.winner {
        Some(team) => println!("Team {team} wins after {} ticks", outcome.ticks),
        None => println!("No winner after {} ticks", outcome.ticks),
    }
    let tally = outcome.tally;
    println!(
        "{} shots, {} hits, {} kills, {} crates dropped, {} collected",
        tally.shots, tally.hits, tally.kills, tally.crates_dropped, tally.crates_collected
    );
    for line in game_loop::summary_lines(&outcome.last) {
        println!("{line}");
    }
    Ok(())
}

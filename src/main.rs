//! Headless battle driver
//!
//! Builds two rosters from the catalog and lets the scoring AI play both
//! sides, printing the battle log and the final report.

use battle_tower::{
    Battle, BattleResult, Behavior, CreatureCatalog, EngineConfig, GameSession, JsonFileStore,
    PlayerAction, RonCatalog, ScoringAi, Side, build_roster,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Battle Tower - AI vs AI creature battles
#[derive(Parser, Debug)]
#[command(name = "battle-tower")]
#[command(about = "Run an AI vs AI battle and print the log")]
struct Args {
    /// Random seed for deterministic runs (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config file (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog ids for team 1, comma separated
    #[arg(long, value_delimiter = ',', default_value = "charmander,squirtle,pikachu")]
    team1: Vec<String>,

    /// Catalog ids for team 2, comma separated
    #[arg(long, value_delimiter = ',', default_value = "bulbasaur,gengar,onix")]
    team2: Vec<String>,

    /// Maximum actions before the run is abandoned
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Save the session to the configured snapshot path when done
    #[arg(long)]
    save: bool,

    /// List the catalog ids and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("battle_tower=info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(kind = ?err.kind(), "{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> BattleResult<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }

    let catalog = match &config.catalog_path {
        Some(path) => RonCatalog::load(path)?,
        None => RonCatalog::builtin()?,
    };
    if args.list {
        for id in catalog.creature_ids() {
            println!("{}", id);
        }
        return Ok(());
    }

    let team1 = build_roster(&catalog, "Challenger", &as_ids(&args.team1))?;
    let team2 = build_roster(&catalog, "Tower Guard", &as_ids(&args.team2))?;
    let snapshot_path = config.snapshot_path.clone();

    let mut session = GameSession::new(config);
    session.select_team(Side::Team1, team1)?;
    session.select_team(Side::Team2, team2)?;
    println!("{}", session.start_battle()?);

    let ai = ScoringAi::new();
    for _ in 0..args.max_turns {
        let Some(battle) = session.battle() else {
            break;
        };
        if battle.is_over() {
            break;
        }
        let side = battle.turn();
        let Some(action) = ai.decide_action(side, battle) else {
            println!("{} has nothing left to do.", side);
            break;
        };

        let lines = match action {
            PlayerAction::UseMove { slot } => session.use_move(slot)?.messages,
            PlayerAction::SwitchCreature { index } => vec![session.switch_creature(index)?.message],
        };
        for line in lines {
            println!("{}", line);
        }
    }

    if session.battle().is_some_and(Battle::is_over) {
        let result = session.finish_battle()?;
        println!();
        println!("{}", result.report.message);
        println!(
            "Tower level: {} (high score {})",
            result.tower_level, result.high_score
        );
    } else {
        println!("No result after {} actions.", args.max_turns);
    }

    if args.save {
        let mut store = JsonFileStore::new(snapshot_path);
        session.save(&mut store)?;
        println!("Saved to {}", store.path().display());
    }
    Ok(())
}

fn as_ids(ids: &[String]) -> Vec<&str> {
    ids.iter().map(String::as_str).collect()
}

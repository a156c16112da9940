//! Checkers Keeper - Unified CLI
//!
//! Creates and plays checkers games persisted in a SQLite database.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use checkers_keeper::{
    Bech32Rule, Event, EventManager, EventSink, GenesisState, Keeper, KeeperConfig, KeeperError,
    MsgCreateGame, MsgPlayMove, SqliteStore, TracingSink,
};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => KeeperConfig::from_file(path)?,
        None => KeeperConfig::default(),
    };
    let mut keeper = open_keeper(&cli.db_path, &config)?;

    match cli.command {
        Command::Init => run_init(&mut keeper),
        Command::Create {
            creator,
            red,
            black,
        } => run_create(&mut keeper, MsgCreateGame::new(creator, red, black)),
        Command::Play {
            creator,
            game_id,
            from_x,
            from_y,
            to_x,
            to_y,
        } => run_play(
            &mut keeper,
            MsgPlayMove::new(creator, game_id, from_x, from_y, to_x, to_y),
        ),
        Command::Show { game_id } => print_json(&keeper.stored_game(&game_id)?),
        Command::List => print_json(&keeper.all_stored_games()?),
    }
}

/// Opens the database and builds a keeper from the config.
#[instrument(skip(config))]
fn open_keeper(db_path: &str, config: &KeeperConfig) -> Result<Keeper<SqliteStore, Bech32Rule>> {
    let store = SqliteStore::open(db_path.to_string())
        .with_context(|| format!("Failed to open database at {}", db_path))?;
    Ok(Keeper::new(store, config.identity_rule(), *config.rules()))
}

/// Writes the default genesis state unless the store is already initialized.
#[instrument(skip(keeper))]
fn run_init(keeper: &mut Keeper<SqliteStore, Bech32Rule>) -> Result<()> {
    match keeper.next_game() {
        Ok(next) => {
            warn!(next_id = next.id_value, "Store already initialized");
            print_json(&keeper.export_genesis()?)
        }
        Err(KeeperError::MissingNextGame) => {
            let genesis = GenesisState::default();
            keeper.init_genesis(&genesis)?;
            info!(db_path = %keeper.store().db_path(), "Store initialized");
            print_json(&genesis)
        }
        Err(e) => Err(e.into()),
    }
}

/// Output of a state-changing command.
#[derive(Serialize)]
struct Outcome<T> {
    response: T,
    events: Vec<Event>,
}

/// Creates a game and prints the new id.
#[instrument(skip(keeper, msg), fields(creator = %msg.creator))]
fn run_create(keeper: &mut Keeper<SqliteStore, Bech32Rule>, msg: MsgCreateGame) -> Result<()> {
    let mut events = EventManager::new();
    let response = keeper.create_game(&msg, &mut events)?;
    print_outcome(response, events)
}

/// Plays one move and prints the capture and winner.
#[instrument(skip(keeper, msg), fields(game_id = %msg.id_value, creator = %msg.creator))]
fn run_play(keeper: &mut Keeper<SqliteStore, Bech32Rule>, msg: MsgPlayMove) -> Result<()> {
    let mut events = EventManager::new();
    let response = keeper.play_move(&msg, &mut events)?;
    print_outcome(response, events)
}

/// Logs the emitted events and prints them with the response.
fn print_outcome<T: Serialize>(response: T, mut events: EventManager) -> Result<()> {
    let events = events.drain();
    let mut log = TracingSink;
    for event in &events {
        log.emit(event.clone());
    }
    print_json(&Outcome { response, events })
}

/// Prints a value as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", json);
    Ok(())
}

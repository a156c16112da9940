//! Command-line interface for checkers_keeper.

use clap::{Parser, Subcommand};

/// Checkers Keeper - checkers games stored in a SQLite key-value store
#[derive(Parser, Debug)]
#[command(name = "checkers_keeper")]
#[command(about = "Create and play checkers games kept in a local store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long, global = true, default_value = "checkers_keeper.db")]
    pub db_path: String,

    /// Path to a keeper config TOML file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the store with an empty genesis state
    Init,

    /// Create a game
    Create {
        /// Account creating the game
        #[arg(long)]
        creator: String,

        /// Participant playing red
        #[arg(long)]
        red: String,

        /// Participant playing black
        #[arg(long)]
        black: String,
    },

    /// Play one move
    Play {
        /// Participant making the move
        #[arg(long)]
        creator: String,

        /// Game id
        #[arg(long)]
        game_id: String,

        /// Source column
        #[arg(long, allow_hyphen_values = true)]
        from_x: i32,

        /// Source row
        #[arg(long, allow_hyphen_values = true)]
        from_y: i32,

        /// Destination column
        #[arg(long, allow_hyphen_values = true)]
        to_x: i32,

        /// Destination row
        #[arg(long, allow_hyphen_values = true)]
        to_y: i32,
    },

    /// Print one stored game
    Show {
        /// Game id
        #[arg(long)]
        game_id: String,
    },

    /// Print every stored game
    List,
}

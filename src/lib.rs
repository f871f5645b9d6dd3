//! # Mansion
//!
//! A single-player, turn-based mansion-exploration survival game.
//!
//! ## Architecture Overview
//!
//! The simulation core is built from a few tightly scoped subsystems:
//!
//! - **Level**: a tile graph grown lazily as the player explores, kept
//!   geometrically consistent (unique coordinates, two-way connections)
//! - **Deck**: a draw pile and discard pile of effect cards with
//!   reshuffle-on-exhaustion semantics
//! - **Game**: the turn and combat state machine sequencing movement, card
//!   resolution, combat, and win/loss checks
//! - **Persistence**: an explicit snapshot schema that round-trips the
//!   entire simulation, including the random stream position
//!
//! The core never prints and never prompts. Every public operation returns
//! plain data (`TurnOutcome`, `CombatOutcome`) or a typed error, leaving
//! presentation to the thin command shell in `main.rs`. All randomness
//! flows through an injected, seedable [`GameRng`], so any playthrough can
//! be replayed exactly from its seed.

pub mod cards;
pub mod game;
pub mod input;
pub mod persistence;

pub use cards::{standard_catalog, Card, Deck, EventEffect};
pub use game::{
    CardResolution, CombatOutcome, CombatRound, Direction, Game, GameConfig, GameRng,
    GameStatus, HeldItem, Level, LossReason, MoveOutcome, Player, Position, RngState, Side,
    Tile, TileId, TileType, TurnOutcome,
};
pub use input::{AliasTable, ShellCommand};
pub use persistence::{GameSnapshot, SnapshotStore};

/// Core error type for the mansion simulation.
#[derive(thiserror::Error, Debug)]
pub enum MansionError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A tile could not be placed: the target coordinate is occupied or the
    /// source side is a wall. Callers treat this as bumping into a wall.
    #[error("Placement conflict: {0}")]
    PlacementConflict(String),

    /// Both deck piles are empty. The card catalog was never loaded; this is
    /// a setup error, not a runtime one.
    #[error("Both deck piles are empty; the card pool was never populated")]
    EmptyDeck,

    /// A save or load was requested without a file name.
    #[error("No file name supplied")]
    MissingFileName,

    /// The named snapshot does not exist on disk.
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    /// An operation was attempted on a finished game.
    #[error("The game is over: {0}")]
    GameOver(String),

    /// Game state is internally inconsistent
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the mansion codebase.
pub type MansionResult<T> = Result<T, MansionError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game tuning constants.
pub mod config {
    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: i32 = 10;

    /// Default player attack score
    pub const DEFAULT_ATTACK_SCORE: i32 = 2;

    /// Default number of turns before the game is lost
    pub const DEFAULT_MAX_TURNS: u32 = 9;

    /// Damage each zombie deals per combat round, before the player's
    /// attack score is subtracted
    pub const ZOMBIE_DAMAGE: i32 = 2;

    /// Minimum attack score required to kill zombies. Each full multiple of
    /// this threshold removes one zombie per round. Must stay at or below
    /// [`ZOMBIE_DAMAGE`] so a zero-damage round still clears zombies and
    /// combat always terminates.
    pub const ZOMBIE_KILL_THRESHOLD: i32 = 2;

    /// Item the player must hold when reaching the exit to win
    pub const REQUIRED_RELIC: &str = "Brass Totem";
}

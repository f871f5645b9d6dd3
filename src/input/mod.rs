//! # Input Module
//!
//! Command parsing for the interactive shell.
//!
//! This is presentation glue, not simulation: the parser turns a line of
//! text into a [`ShellCommand`], a closed enumeration of core operations.
//! The runtime rename feature is a mapping edit on the alias table, never
//! reflection over handlers, so every reachable command is known at
//! compile time.

use crate::Direction;
use std::collections::HashMap;

/// The closed set of operations the shell can invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Advance one turn, moving in the given direction
    Move(Direction),
    /// Fight the zombies on the current tile before moving on
    Attack,
    /// Show player health
    Health,
    /// Show player attack score
    AttackScore,
    /// Show both stats
    Stats,
    /// Save the game under a file name
    Save { file_name: Option<String> },
    /// Load a saved game, replacing the current one on success
    Load { file_name: Option<String> },
    /// Rebind a command word
    Rename {
        from: Option<String>,
        to: Option<String>,
    },
    /// List commands
    Help,
    /// Exit the shell
    Quit,
}

/// Command verbs, the targets of the alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Move,
    Attack,
    Health,
    AttackScore,
    Stats,
    Save,
    Load,
    Rename,
    Help,
    Quit,
}

/// Why a line failed to parse. Shell-local; never reaches the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingDirection,
    BadDirection(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::UnknownCommand(word) => write!(f, "--- Unknown command: {}", word),
            ParseError::MissingDirection => {
                write!(f, "which way? (north, south, east, west)")
            }
            ParseError::BadDirection(word) => write!(f, "not a direction: {}", word),
        }
    }
}

/// Why a rename was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    UnknownCommand(String),
    NameInUse(String),
    BlankName,
}

impl std::fmt::Display for RenameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameError::UnknownCommand(word) => write!(f, "--- Unknown command: {}", word),
            RenameError::NameInUse(word) => {
                write!(f, "Command name is already in use: {}", word)
            }
            RenameError::BlankName => write!(f, "Blank response"),
        }
    }
}

/// Mutable mapping from command words to command kinds.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, CommandKind>,
}

impl AliasTable {
    /// The default command set.
    pub fn new() -> Self {
        let mut aliases = HashMap::new();
        for (word, kind) in [
            ("move", CommandKind::Move),
            ("fight", CommandKind::Attack),
            ("health", CommandKind::Health),
            ("attack", CommandKind::AttackScore),
            ("stats", CommandKind::Stats),
            ("save", CommandKind::Save),
            ("load", CommandKind::Load),
            ("rename", CommandKind::Rename),
            ("help", CommandKind::Help),
            ("quit", CommandKind::Quit),
        ] {
            aliases.insert(word.to_string(), kind);
        }
        Self { aliases }
    }

    /// The current command words, sorted for stable help output.
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Moves the binding of `from` to the new word `to`.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), RenameError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(RenameError::BlankName);
        }
        if self.aliases.contains_key(to) {
            return Err(RenameError::NameInUse(to.to_string()));
        }
        let kind = self
            .aliases
            .remove(from)
            .ok_or_else(|| RenameError::UnknownCommand(from.to_string()))?;
        self.aliases.insert(to.to_string(), kind);
        Ok(())
    }

    /// Parses one line of input against the current bindings.
    ///
    /// # Examples
    ///
    /// ```
    /// use mansion::{AliasTable, Direction, ShellCommand};
    ///
    /// let table = AliasTable::new();
    /// let command = table.parse_line("move north").unwrap();
    /// assert_eq!(command, ShellCommand::Move(Direction::North));
    /// ```
    pub fn parse_line(&self, line: &str) -> Result<ShellCommand, ParseError> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseError::Empty)?.to_lowercase();
        let kind = self
            .aliases
            .get(&verb)
            .copied()
            .ok_or(ParseError::UnknownCommand(verb))?;

        let command = match kind {
            CommandKind::Move => {
                let word = words.next().ok_or(ParseError::MissingDirection)?;
                ShellCommand::Move(parse_direction(word)?)
            }
            CommandKind::Attack => ShellCommand::Attack,
            CommandKind::Health => ShellCommand::Health,
            CommandKind::AttackScore => ShellCommand::AttackScore,
            CommandKind::Stats => ShellCommand::Stats,
            CommandKind::Save => ShellCommand::Save {
                file_name: words.next().map(str::to_string),
            },
            CommandKind::Load => ShellCommand::Load {
                file_name: words.next().map(str::to_string),
            },
            CommandKind::Rename => ShellCommand::Rename {
                from: words.next().map(str::to_string),
                to: words.next().map(str::to_string),
            },
            CommandKind::Help => ShellCommand::Help,
            CommandKind::Quit => ShellCommand::Quit,
        };
        Ok(command)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_direction(word: &str) -> Result<Direction, ParseError> {
    match word.to_lowercase().as_str() {
        "north" | "n" => Ok(Direction::North),
        "east" | "e" => Ok(Direction::East),
        "south" | "s" => Ok(Direction::South),
        "west" | "w" => Ok(Direction::West),
        other => Err(ParseError::BadDirection(other.to_string())),
    }
}

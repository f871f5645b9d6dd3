//! # Mansion Main Entry Point
//!
//! Parses startup configuration, initializes logging, and runs the
//! interactive command shell. Everything here is presentation: the shell
//! reads lines, invokes the core's public operations, and prints the
//! structured outcomes they return.

use clap::Parser;
use mansion::{
    AliasTable, CardResolution, CombatOutcome, Game, GameConfig, GameStatus, MansionResult,
    MoveOutcome, ShellCommand, SnapshotStore, TurnOutcome,
};
use std::io::{BufRead, Write};

/// Command line arguments for the mansion game.
#[derive(Parser, Debug)]
#[command(name = "mansion")]
#[command(about = "A turn-based mansion-exploration survival game")]
#[command(version)]
struct Args {
    /// Player starting health
    #[arg(long, default_value_t = mansion::config::DEFAULT_PLAYER_HEALTH)]
    health: i32,

    /// Player starting attack score
    #[arg(long, default_value_t = mansion::config::DEFAULT_ATTACK_SCORE)]
    attack: i32,

    /// Turn budget before the game is lost
    #[arg(long, default_value_t = mansion::config::DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Random seed for a reproducible playthrough
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> MansionResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&args.log_level),
    )
    .init();

    let seed = args.seed.unwrap_or(12345);
    let config = GameConfig {
        seed,
        starting_health: args.health,
        starting_attack: args.attack,
        max_turns: args.max_turns,
    };

    let mut game = Game::new(config);
    let store = SnapshotStore::new();
    let mut aliases = AliasTable::new();

    println!("Mansion v{} -- type 'help' for commands", mansion::VERSION);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("mansion$ ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let command = match aliases.parse_line(&line) {
            Ok(command) => command,
            Err(mansion::input::ParseError::Empty) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match command {
            ShellCommand::Move(direction) => match game.advance_turn(direction) {
                Ok(outcome) => print_turn(&outcome),
                Err(err) => println!("{}", err),
            },
            ShellCommand::Attack => match game.player_attack() {
                Ok(outcome) => print_combat(&outcome),
                Err(err) => println!("{}", err),
            },
            ShellCommand::Health => println!("Health: {}", game.player_health()),
            ShellCommand::AttackScore => println!("Attack: {}", game.attack_score()),
            ShellCommand::Stats => {
                println!("Health: {}\nAttack: {}", game.player_health(), game.attack_score());
            }
            ShellCommand::Save { file_name } => {
                match store.save(file_name.as_deref(), &game) {
                    Ok(()) => println!("Saved."),
                    Err(mansion::MansionError::MissingFileName) => {
                        println!("You need a file name! 'save [file_name]' Try again");
                    }
                    Err(err) => println!("{}", err),
                }
            }
            ShellCommand::Load { file_name } => {
                // Only a successful load replaces the running game.
                match store.load(file_name.as_deref()) {
                    Ok(loaded) => {
                        game = loaded;
                        println!("Loaded. Turn {}, {}.", game.turn(), game.status());
                    }
                    Err(mansion::MansionError::MissingFileName) => {
                        println!("You need a file name! 'load [file_name]' Try again");
                    }
                    Err(mansion::MansionError::SnapshotNotFound(name)) => {
                        println!("File not found '{}'", name);
                    }
                    Err(err) => println!("{}", err),
                }
            }
            ShellCommand::Rename { from, to } => match (from, to) {
                (Some(from), Some(to)) => match aliases.rename(&from, &to) {
                    Ok(()) => println!("Successfully changed {} to {}", from, to),
                    Err(err) => println!("{}", err),
                },
                _ => println!("rename <command> <newcommand>"),
            },
            ShellCommand::Help => {
                println!("Documented commands:");
                for word in aliases.words() {
                    println!("$ {}", word);
                }
            }
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}

fn print_turn(outcome: &TurnOutcome) {
    match outcome.movement {
        MoveOutcome::Blocked => println!("You bump into a wall."),
        MoveOutcome::Moved {
            newly_placed: true, ..
        } => println!("You step into an unexplored room."),
        MoveOutcome::Moved { .. } => println!("You walk back into familiar territory."),
    }

    match &outcome.card {
        Some(CardResolution::ZombiesSpawned { count }) => {
            println!("{} zombies shamble out of the dark!", count);
        }
        Some(CardResolution::ItemTaken { name, attack_bonus }) => {
            println!("You found: {} ({:+} attack)", name, attack_bonus);
        }
        Some(CardResolution::EventApplied { name, .. }) => {
            println!("Event: {}", name);
        }
        None => {}
    }

    if let Some(combat) = &outcome.combat {
        print_combat(combat);
    }

    match outcome.status {
        GameStatus::InProgress => println!("Turn {} complete.", outcome.turn),
        status => println!("Game over: {}.", status),
    }
}

fn print_combat(outcome: &CombatOutcome) {
    if outcome.rounds.is_empty() {
        println!("Nothing here to fight.");
        return;
    }
    for (i, round) in outcome.rounds.iter().enumerate() {
        println!(
            "Round {}: took {} damage, slew {} zombies",
            i + 1,
            round.damage_taken,
            round.zombies_slain
        );
    }
    if outcome.zombies_remaining == 0 {
        println!("The tile is clear. Health: {}", outcome.health_remaining);
    } else {
        println!(
            "{} zombies remain. Health: {}",
            outcome.zombies_remaining, outcome.health_remaining
        );
    }
}

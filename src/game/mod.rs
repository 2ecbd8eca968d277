//! The game engine: command dispatch over the mission and player stores.
//!
//! [`GameEngine`] owns the command registry, the two state stores, and a
//! seedable RNG, and exposes one entrypoint: [`GameEngine::process`]. The
//! caller (a terminal front-end) hands it a typed line; the engine splits it
//! into a command token and arguments, resolves the token in the registry,
//! runs argument validation, and executes the handler. Handlers run one at a
//! time; the caller is responsible for serializing input while a command is
//! in flight.
//!
//! Randomness is injected: construct with [`GameEngine::with_seed`] to make
//! mission batches and scan results reproducible.

pub mod commands;
pub mod missions;
pub mod player;
pub mod registry;
pub mod render;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::logutil::escape_log;

use commands::CommandAction;
use missions::MissionBoard;
use player::PlayerProgress;
use registry::{CommandRegistry, CommandSpec, ValidationRule};

pub use commands::CLEAR_SENTINEL;

/// Scales the simulated network delays. Tests run instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Normal,
    Instant,
}

impl Pacing {
    pub fn delay(&self, ms: u64) -> Duration {
        match self {
            Pacing::Normal => Duration::from_millis(ms),
            Pacing::Instant => Duration::ZERO,
        }
    }
}

/// Receives intermediate progress lines emitted between simulated delays.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Default sink: drops progress lines.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn emit(&self, _line: &str) {}
}

/// The assembled game: registry, stores, RNG, pacing, progress sink.
pub struct GameEngine {
    registry: CommandRegistry,
    player: PlayerProgress,
    board: MissionBoard,
    rng: StdRng,
    pacing: Pacing,
    progress: Arc<dyn ProgressSink>,
    /// Play time carried over from a restored save, in seconds.
    play_time_base: u64,
    started: Instant,
}

impl GameEngine {
    /// Engine with OS-seeded randomness and real delays.
    pub fn new() -> Self {
        Self::build(StdRng::from_entropy(), Pacing::Normal)
    }

    /// Deterministic engine for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed), Pacing::Normal)
    }

    fn build(rng: StdRng, pacing: Pacing) -> Self {
        let mut engine = GameEngine {
            registry: CommandRegistry::new(),
            player: PlayerProgress::default(),
            board: MissionBoard::new(),
            rng,
            pacing,
            progress: Arc::new(NullProgress),
            play_time_base: 0,
            started: Instant::now(),
        };
        for spec in default_commands() {
            engine.registry.register(spec);
        }
        engine.board.generate_missions(&mut engine.rng, 1);
        engine
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    pub fn set_progress_sink(&mut self, sink: Arc<dyn ProgressSink>) {
        self.progress = sink;
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn player(&self) -> &PlayerProgress {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerProgress {
        &mut self.player
    }

    pub fn board(&self) -> &MissionBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut MissionBoard {
        &mut self.board
    }

    /// Seed the play-time counter from a restored save.
    pub fn set_play_time_base(&mut self, secs: u64) {
        self.play_time_base = secs;
        self.started = Instant::now();
    }

    /// Total play time: the restored base plus this session's elapsed time.
    pub fn play_time_secs(&self) -> u64 {
        self.play_time_base + self.started.elapsed().as_secs()
    }

    /// Refill the available-mission list for the player's current level.
    pub fn refresh_missions(&mut self) {
        let level = self.player.player().level;
        self.board.generate_missions(&mut self.rng, level);
    }

    /// Fresh player (new id), cleared board, and a new level-1 batch.
    pub fn reset(&mut self) {
        self.player.reset();
        self.board.reset();
        self.refresh_missions();
        self.play_time_base = 0;
        self.started = Instant::now();
        info!("game state reset");
    }

    /// Process one typed line and return the rendered output. Empty input
    /// returns an empty string. Unknown commands and validation failures are
    /// user-facing messages, not errors; `Err` is reserved for internal
    /// faults.
    pub async fn process(&mut self, line: &str) -> Result<String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(String::new());
        }
        debug!("command input: {}", escape_log(line));

        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(|t| t.to_string()).collect();

        let Some(spec) = self.registry.get(name) else {
            return Ok(format!(
                "Command not found: {name}. Type 'help' for available commands."
            ));
        };
        if let Err(message) = CommandRegistry::validate_command(&spec, &args) {
            return Ok(message);
        }

        let progress = Arc::clone(&self.progress);
        let output = match spec.action {
            CommandAction::Help => commands::help(&args),
            CommandAction::Clear => CLEAR_SENTINEL.to_string(),
            CommandAction::Info => commands::info(&self.player),
            CommandAction::Game => commands::game_info(&self.board, self.play_time_secs()),
            CommandAction::Version => commands::version(),
            CommandAction::Scan => {
                commands::scan(&mut self.rng, &self.pacing, progress.as_ref(), &args).await
            }
            CommandAction::Connect => {
                commands::connect(
                    &mut self.rng,
                    &self.board,
                    &self.pacing,
                    progress.as_ref(),
                    &args,
                )
                .await
            }
            CommandAction::Hack => {
                commands::hack(
                    &mut self.rng,
                    &mut self.board,
                    &mut self.player,
                    &self.pacing,
                    progress.as_ref(),
                    &args,
                )
                .await
            }
            CommandAction::Missions => commands::missions(&self.board),
            CommandAction::Accept => commands::accept(&mut self.board, &args),
            CommandAction::Status => commands::status(&self.board),
            CommandAction::Abandon => commands::abandon(&mut self.board),
        };
        Ok(output)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine::new()
    }
}

/// The built-in command set with its aliases and argument bounds.
pub fn default_commands() -> Vec<CommandSpec> {
    let one_address = ValidationRule {
        min_args: Some(1),
        max_args: Some(1),
        check: None,
    };
    let no_args = ValidationRule {
        min_args: None,
        max_args: Some(0),
        check: None,
    };
    vec![
        CommandSpec::new(
            "help",
            "Show available commands",
            "help [command]",
            CommandAction::Help,
        )
        .with_validation(ValidationRule {
            min_args: None,
            max_args: Some(1),
            check: None,
        }),
        CommandSpec::new(
            "clear",
            "Clear the terminal screen",
            "clear",
            CommandAction::Clear,
        )
        .with_aliases(&["cls"])
        .with_validation(no_args),
        CommandSpec::new("info", "Show player information", "info", CommandAction::Info)
            .with_validation(no_args),
        CommandSpec::new("game", "Show game information", "game", CommandAction::Game)
            .with_validation(no_args),
        CommandSpec::new(
            "version",
            "Show version information",
            "version",
            CommandAction::Version,
        )
        .with_validation(no_args),
        CommandSpec::new(
            "scan",
            "Scan a target IP address",
            "scan <IP>",
            CommandAction::Scan,
        )
        .with_validation(one_address),
        CommandSpec::new(
            "connect",
            "Connect to a target system",
            "connect <IP>",
            CommandAction::Connect,
        )
        .with_validation(one_address),
        CommandSpec::new(
            "hack",
            "Hack a target system",
            "hack <IP>",
            CommandAction::Hack,
        )
        .with_validation(one_address),
        CommandSpec::new(
            "missions",
            "Show available missions",
            "missions",
            CommandAction::Missions,
        )
        .with_aliases(&["quest", "tasks"])
        .with_validation(no_args),
        CommandSpec::new(
            "accept",
            "Accept a mission by ID or index",
            "accept <ID|index>",
            CommandAction::Accept,
        )
        .with_validation(ValidationRule {
            min_args: Some(1),
            max_args: Some(1),
            check: None,
        }),
        CommandSpec::new(
            "status",
            "Show current mission status",
            "status",
            CommandAction::Status,
        )
        .with_validation(no_args),
        CommandSpec::new(
            "abandon",
            "Abandon the current mission",
            "abandon",
            CommandAction::Abandon,
        )
        .with_validation(no_args),
    ]
}

//! # HackSim - a terminal hacking simulator
//!
//! HackSim is a command-line "hacking" game: the player types commands such
//! as `scan`, `connect`, `hack`, `missions` and `accept`, which drive a
//! mission lifecycle (available → active → completed) coupled to a player
//! levelling system (experience, credits, reputation). Nothing touches a
//! real network; targets, open ports and security ratings are all simulated.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hacksim::game::GameEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut engine = GameEngine::new();
//!     let output = engine.process("missions").await?;
//!     println!("{output}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - The engine: command registry, mission board, player
//!   progression, handlers, rendering
//! - [`storage`] - Save snapshot export/import and on-disk persistence
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Target address validation
//!
//! ## Architecture
//!
//! A front-end (the bundled REPL, or any embedding) hands typed lines to
//! [`game::GameEngine::process`]. The engine resolves the command token in
//! its registry, checks argument bounds, and runs the handler, which reads
//! and mutates the mission board and the player record and returns a
//! rendered string. One command runs at a time; the front-end serializes
//! input while a handler is in flight.

pub mod config;
pub mod game;
pub mod logutil;
pub mod storage;
pub mod validation;

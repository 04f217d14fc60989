//! # stablerace-engine: Stabling & Racing Simulation Core
//!
//! A deterministic engine for the stabling-and-racing dice game. Players are
//! dealt cards standing for horses (two-dice sums 2..12), pay fees into a
//! shared pot as horses are stabled, and split the pot when one of the
//! remaining horses finishes the race. Rounds repeat until a round cap is hit
//! or fewer than two players have tokens left.
//!
//! ## Core Modules
//!
//! - [`engine`] - Configuration and the step-driven state machine
//! - [`game`] - Stage enum and per-round table state
//! - [`snapshot`] - Owned views handed to renderers and drivers
//! - [`cards`] - Suit, Rank and Card, and shoe construction
//! - [`deck`] - Fisher–Yates shuffling and round-robin dealing
//! - [`dice`] - Two-dice rolls
//! - [`track`] - Steps each horse needs to win
//! - [`player`] - Token balance, hand and elimination
//! - [`rules`] - Stabling fees and pot division
//! - [`history`] - Per-player token checkpoints
//! - [`rng`] - Swappable pseudorandom streams
//! - [`logger`] - Rolling event log and JSONL run traces
//! - [`errors`] - Configuration validation errors
//!
//! ## Quick Start
//!
//! ```rust
//! use stablerace_engine::engine::{Engine, GameConfig};
//!
//! let mut engine = Engine::new(GameConfig {
//!     players: 2,
//!     rounds: 1,
//!     seed: Some(1),
//!     ..GameConfig::default()
//! })
//! .expect("valid config");
//!
//! while !engine.is_done() {
//!     let snap = engine.step();
//!     println!("{}", snap.last_event);
//! }
//! ```
//!
//! ## Deterministic Runs
//!
//! Seeded engines replay identically:
//!
//! ```rust
//! use stablerace_engine::engine::{Engine, GameConfig};
//!
//! let cfg = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut a = Engine::new(cfg.clone()).unwrap();
//! let mut b = Engine::new(cfg).unwrap();
//! for _ in 0..500 {
//!     assert_eq!(a.step(), b.step());
//! }
//! ```

pub mod cards;
pub mod deck;
pub mod dice;
pub mod engine;
pub mod errors;
pub mod game;
pub mod history;
pub mod logger;
pub mod player;
pub mod rng;
pub mod rules;
pub mod snapshot;
pub mod track;

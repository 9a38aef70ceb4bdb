//! Backgammon rules engine
//!
//! This crate provides the core game logic for two-player backgammon:
//! - Board representation with the bar and borne-off trays
//! - Dice rolling and the consumable die pool
//! - Move validation and candidate generation
//! - Forced-move resolution (use both dice if possible, else the higher one)
//! - The turn state machine with single-level undo
//!
//! # Architecture
//!
//! The engine is a functional core: every action maps one `GameState` to a
//! new one. Callers own the current state and submit one action at a time.
//! It can be compiled to:
//! - Native Rust behind a terminal or server shell
//! - WebAssembly for a browser front end (feature `wasm`)
//!
//! # Modules
//!
//! - [`player`]: The two sides and their movement geometry
//! - [`board`]: Points, bar and borne-off trays
//! - [`dice`]: Rolling and the die pool
//! - [`rules`]: Move legality
//! - [`moves`]: Candidate move generation
//! - [`forced`]: Forced-move lookahead
//! - [`game`]: Turn state machine

pub mod actions;
pub mod board;
pub mod dice;
pub mod forced;
pub mod game;
pub mod moves;
pub mod player;
pub mod position;
pub mod rules;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::GameAction;
pub use board::{Board, BoardError, Destination, Origin, Point, CHECKERS_PER_PLAYER, NUM_POINTS};
pub use dice::{Dice, DiceError};
pub use game::{GameError, GamePhase, GameState, TurnSnapshot};
pub use moves::Move;
pub use player::{Player, PlayerCounts};
pub use position::Position;

//! Rules collaborator interface.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each game state
//! - How a move produces the successor state
//! - Turn order and victory conditions
//!
//! The turn driver calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, IllegalMoveError, RulesEngine};

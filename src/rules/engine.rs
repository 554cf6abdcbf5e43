//! Rules collaborator trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What moves are legal
//! - How a move turns one state into the next
//! - Turn order and victory (reflected in the successor state)

use thiserror::Error;

use crate::core::{GameState, Move, PlayerId};

/// A move the rules collaborator refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal move ({mv}): {reason}")]
pub struct IllegalMoveError {
    /// The rejected move.
    pub mv: Move,
    /// Human-readable reason.
    pub reason: String,
}

impl IllegalMoveError {
    pub fn new(mv: Move, reason: impl Into<String>) -> Self {
        Self {
            mv,
            reason: reason.into(),
        }
    }
}

/// Result of a completed game.
///
/// The engine never builds one; rules collaborators report it once the
/// victory flag is set. The chase rules answer `Winner(FUGITIVE)` for an
/// escape and `Winners` with every detective for a capture or a trapped
/// fugitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Game over with nobody winning, e.g. a collaborator that caps the
    /// number of moves and calls the game off when the cap is hit. The
    /// chase rules never return it.
    Draw,
    /// Several players share the win.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Rules collaborator.
///
/// The engine calls these methods during play; it never interprets
/// game-specific concepts directly.
///
/// ## Implementation Notes
///
/// - `apply`: Must not mutate its inputs. On success the returned state must be
///   complete: next `current_player`, `turn` and `victory_flag` all set.
/// - `legal_moves` and `has_legal_move` are optional. A collaborator that
///   only implements `apply` gets an empty move list (so `RandomAgent` can't
///   play it) and is always assumed to have a move, so the engine keeps
///   asking agents.
/// - Collaborators that enumerate moves should override both; the engine
///   stops a run early only when `has_legal_move` says no.
pub trait RulesEngine {
    /// Check `mv` against `state` and produce the successor state.
    fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, IllegalMoveError>;

    /// Enumerate the legal moves of the current player.
    fn legal_moves(&self, _state: &GameState) -> Vec<Move> {
        Vec::new()
    }

    /// False only when the current player is known to be stuck.
    fn has_legal_move(&self, _state: &GameState) -> bool {
        true
    }
}

impl<R: RulesEngine + ?Sized> RulesEngine for std::sync::Arc<R> {
    fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, IllegalMoveError> {
        (**self).apply(state, mv)
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        (**self).legal_moves(state)
    }

    fn has_legal_move(&self, state: &GameState) -> bool {
        (**self).has_legal_move(state)
    }
}

//! Uniform random agent.
//!
//! Picks one of the rules collaborator's legal moves with a seeded RNG. Useful
//! as an opponent baseline and for driving games in tests and benchmarks.

use std::sync::{Arc, Mutex, PoisonError};

use super::dispatch::Agent;
use super::error::{AgentError, AgentKind};
use crate::core::{GameRng, GameState, Move};
use crate::rules::RulesEngine;

/// Native agent choosing uniformly among legal moves.
pub struct RandomAgent<R> {
    rules: R,
    rng: Mutex<GameRng>,
}

impl<R> RandomAgent<R>
where
    R: RulesEngine + Send + Sync + 'static,
{
    /// Create a random agent consulting `rules` for legal moves.
    pub fn new(rules: R, seed: u64) -> Self {
        Self::with_rng(rules, GameRng::new(seed))
    }

    /// Create a random agent from an existing RNG stream.
    pub fn with_rng(rules: R, rng: GameRng) -> Self {
        Self {
            rules,
            rng: Mutex::new(rng),
        }
    }

    /// Pick a move for the current player.
    pub fn choose(&self, state: &GameState) -> Result<Move, AgentError> {
        let moves = self.rules.legal_moves(state);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.choose(&moves).copied().ok_or_else(|| {
            AgentError::callback(
                AgentKind::Native,
                format!("no legal moves for {}", state.current_player()),
            )
        })
    }

    /// Wrap into a native `Agent`.
    pub fn into_agent(self) -> Agent {
        let this = Arc::new(self);
        Agent::Native(Arc::new(move |state: &GameState| this.choose(state)))
    }
}

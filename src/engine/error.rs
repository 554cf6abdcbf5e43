//! Turn driver errors.

use thiserror::Error;

use crate::agent::AgentError;
use crate::core::PlayerId;
use crate::rules::IllegalMoveError;

/// Failure of `Engine::step` or of engine construction.
///
/// Whenever a step fails, the engine's current state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `step` called after the victory flag was set.
    #[error("game already finished at turn {turn}")]
    AlreadyTerminal { turn: u32 },

    /// The rules collaborator rejected the agent's move.
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),

    /// The current player's agent could not produce a move.
    #[error("agent for {player} failed: {source}")]
    Agent {
        player: PlayerId,
        #[source]
        source: AgentError,
    },

    #[error("expected {expected} agents, got {actual}")]
    AgentCountMismatch { expected: usize, actual: usize },

    #[error("no agent seat for {player}")]
    NoSuchPlayer { player: PlayerId },

    /// The rules collaborator returned a state the engine cannot continue from.
    #[error("rules produced an invalid successor: {reason}")]
    InvalidSuccessor { reason: String },
}

impl EngineError {
    /// The agent error behind this failure, if any.
    #[must_use]
    pub fn agent_error(&self) -> Option<&AgentError> {
        match self {
            EngineError::Agent { source, .. } => Some(source),
            _ => None,
        }
    }
}

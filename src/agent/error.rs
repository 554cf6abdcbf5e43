//! Agent invocation errors.

use thiserror::Error;

/// Which variant an agent currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Unset,
    Native,
    ForeignBoundary,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentKind::Unset => "unset",
            AgentKind::Native => "native",
            AgentKind::ForeignBoundary => "foreign",
        };
        f.write_str(name)
    }
}

/// Failure to obtain a move from an agent.
///
/// Every variant is fatal for the turn; the engine never retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Invoked before a callback was bound.
    #[error("callback not configured")]
    NotConfigured,

    /// A foreign value did not structurally match what the engine expects.
    #[error("foreign value does not match a move: {reason}")]
    Conversion { reason: String },

    /// The callable itself reported an error.
    #[error("{kind} agent failed: {message}")]
    Callback { kind: AgentKind, message: String },

    /// The callable panicked.
    #[error("{kind} agent panicked: {message}")]
    Panicked { kind: AgentKind, message: String },
}

impl AgentError {
    pub fn conversion(reason: impl Into<String>) -> Self {
        AgentError::Conversion {
            reason: reason.into(),
        }
    }

    pub fn callback(kind: AgentKind, message: impl std::fmt::Display) -> Self {
        AgentError::Callback {
            kind,
            message: message.to_string(),
        }
    }
}

//! Engine configuration.

/// Configuration for the turn driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Keep a record of every applied move.
    pub record_history: bool,

    /// Before each step of `run_until_terminal`, ask the rules collaborator
    /// whether the current player can move at all, and stop if not.
    pub stop_on_no_legal_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            stop_on_no_legal_moves: true,
        }
    }
}

impl EngineConfig {
    /// Create a new engine config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable move history.
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Enable or disable the legal-move check in `run_until_terminal`.
    pub fn with_stop_on_no_legal_moves(mut self, stop: bool) -> Self {
        self.stop_on_no_legal_moves = stop;
        self
    }
}

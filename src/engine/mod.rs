//! Turn driver: owns the agents and the current state, and advances play.
//!
//! The engine is synchronous. `step` blocks until the current player's agent
//! answers (for a foreign-boundary agent, that includes waiting for the
//! process-wide boundary lock) and the rules collaborator has ruled on the
//! move. There is no timeout: a hung agent blocks the calling thread, so any
//! watchdog belongs above the engine.
//!
//! Independent engines may run on separate threads.

pub mod config;
pub mod driver;
pub mod error;

pub use config::EngineConfig;
pub use driver::{Engine, EngineStatus, MoveRecord, RunOutcome};
pub use error::EngineError;

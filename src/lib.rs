//! # yard-engine
//!
//! A turn-based game engine for multi-player pursuit games.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: A `GameState` is never mutated. Rules produce a
//!    new state per move, so a rejected move leaves nothing behind.
//!
//! 2. **Rules as Collaborators**: The engine knows nothing about boards or
//!    tickets. Any `RulesEngine` decides legality and successors.
//!
//! 3. **Pluggable Agents**: Each seat holds an `Agent`: unset, a native
//!    closure, or a handle into a foreign runtime. Foreign calls are
//!    serialized process-wide by the boundary lock.
//!
//! ## Modules
//!
//! - `core`: Players, stations, moves, tickets, state, RNG
//! - `rules`: RulesEngine trait and move errors
//! - `agent`: Agent dispatch and the foreign-call boundary
//! - `engine`: The turn driver
//! - `games`: Bundled rules (the chase game)
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod rules;
pub mod agent;
pub mod engine;
pub mod games;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, StationId,
    Move, TransportType, PlayerCards,
    GameState, StateError, Transition,
    GameRng,
};

pub use crate::rules::{RulesEngine, GameResult, IllegalMoveError};

pub use crate::agent::{
    Agent, AgentError, AgentKind, NativeFn,
    ForeignCallable, JsonCallable, RandomAgent,
    BoundaryGuard, BoundaryStats,
};

pub use crate::engine::{
    Engine, EngineConfig, EngineError, EngineStatus,
    MoveRecord, RunOutcome,
};

//! Python bindings for the yard-engine chase game.
//!
//! Python callables become foreign-boundary agents: every call into them
//! happens under the process-wide boundary lock, so at most one Python
//! agent runs at a time no matter how many engines are stepping.
//!
//! # Quick Start
//!
//! ```python
//! import yard_engine as ye
//!
//! routes = [(1, 2, ye.TransportType.Taxi), (2, 3, ye.TransportType.Bus)]
//! engine = ye.ChaseEngine(routes, player_count=2, start_locations=[1, 3])
//!
//! def fugitive(state):
//!     return ye.Move(0, state.player_locs[0], 2, ye.TransportType.Taxi)
//!
//! engine.bind_agent(0, fugitive)
//! engine.bind_random(1, seed=7)
//! print(engine.run(max_turns=100), engine.winners())
//! ```

use pyo3::prelude::*;

mod py_agent;
mod py_core;
mod py_engine;
mod py_errors;

pub use py_agent::*;
pub use py_core::*;
pub use py_engine::*;
pub use py_errors::{AgentError, AlreadyTerminalError, IllegalMoveError, StateError};

/// yard_engine: turn-based pursuit game engine.
///
/// This module provides:
/// - Immutable game state and move types
/// - The chase game engine with pluggable agents
/// - Exceptions mirroring engine error variants
#[pymodule]
fn yard_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core types
    m.add_class::<PyTransportType>()?;
    m.add_class::<PyMove>()?;
    m.add_class::<PyPlayerCards>()?;
    m.add_class::<PyGameState>()?;

    // Engine
    m.add_class::<PyChaseEngine>()?;

    // Exceptions
    let py = m.py();
    m.add("IllegalMoveError", py.get_type_bound::<IllegalMoveError>())?;
    m.add("AlreadyTerminalError", py.get_type_bound::<AlreadyTerminalError>())?;
    m.add("AgentError", py.get_type_bound::<AgentError>())?;
    m.add("StateError", py.get_type_bound::<StateError>())?;

    Ok(())
}

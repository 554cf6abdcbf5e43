//! Python exception types and error conversion.

use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::PyErr;

use crate::core::StateError as CoreStateError;
use crate::engine::EngineError;
use crate::games::chase::SetupError;

create_exception!(yard_engine, IllegalMoveError, PyException, "The rules rejected a move.");
create_exception!(yard_engine, AlreadyTerminalError, PyException, "The game is already over.");
create_exception!(yard_engine, AgentError, PyException, "An agent could not produce a move.");
create_exception!(yard_engine, StateError, PyValueError, "Invalid game state construction.");

pub(crate) fn state_err(err: CoreStateError) -> PyErr {
    StateError::new_err(err.to_string())
}

pub(crate) fn setup_err(err: SetupError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub(crate) fn engine_err(err: EngineError) -> PyErr {
    let message = err.to_string();
    match err {
        EngineError::IllegalMove(_) => IllegalMoveError::new_err(message),
        EngineError::AlreadyTerminal { .. } => AlreadyTerminalError::new_err(message),
        EngineError::Agent { .. } => AgentError::new_err(message),
        EngineError::AgentCountMismatch { .. }
        | EngineError::NoSuchPlayer { .. }
        | EngineError::InvalidSuccessor { .. } => PyValueError::new_err(message),
    }
}

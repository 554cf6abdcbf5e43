//! Python callables as foreign-boundary agents.

use pyo3::prelude::*;

use crate::agent::{AgentError, AgentKind, ForeignCallable};
use crate::core::{GameState, Move, PlayerId, StationId};

use super::py_core::{PyGameState, PyMove, PyTransportType};

/// Python-implemented agent.
///
/// The callable receives a `GameState` and must return a `Move` or a
/// `(player, from_station, to_station, TransportType)` tuple.
///
/// `Agent::invoke` holds the boundary lock around `call`, and the GIL is
/// taken inside it, so the lock order is always boundary lock, then GIL.
/// Engine entry points called from Python release the GIL first
/// (`allow_threads`) to keep that order.
pub struct PyCallable {
    callback: PyObject,
}

impl PyCallable {
    pub fn new(callback: PyObject) -> Self {
        Self { callback }
    }
}

impl ForeignCallable for PyCallable {
    fn call(&self, state: &GameState) -> Result<Move, AgentError> {
        Python::with_gil(|py| {
            let answer = self
                .callback
                .call1(py, (PyGameState(state.clone()),))
                .map_err(|e| AgentError::callback(AgentKind::ForeignBoundary, e))?;
            extract_move(answer.bind(py))
        })
    }
}

fn extract_move(obj: &Bound<'_, PyAny>) -> Result<Move, AgentError> {
    if let Ok(mv) = obj.extract::<PyMove>() {
        return Ok(mv.0);
    }
    obj.extract::<(u8, u32, u32, PyTransportType)>()
        .map(|(player, from, to, kind)| {
            Move::new(PlayerId::new(player), StationId::new(from), StationId::new(to), kind.into())
        })
        .map_err(|e| {
            AgentError::conversion(format!(
                "expected Move or (player, from_station, to_station, TransportType): {e}"
            ))
        })
}

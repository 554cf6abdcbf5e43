//! Foreign-boundary callables.
//!
//! The core asks only one thing of a foreign handle: given a `GameState`,
//! produce a `Move`, converting both ways at the boundary. Implementations are
//! called with the boundary lock already held (see [`super::boundary`]) and
//! must not take it themselves.
//!
//! `JsonCallable` covers any environment reachable through a JSON value
//! (an embedded script engine, a bridge to another process). The Python
//! bindings provide their own implementation on top of PyO3.

use std::marker::PhantomData;

use serde_json::Value;

use super::error::{AgentError, AgentKind};
use crate::core::{GameState, Move};

/// A decision function living on the other side of a foreign call boundary.
pub trait ForeignCallable: Send + Sync {
    /// Convert `state`, call across the boundary, convert the answer back.
    ///
    /// A return value that doesn't structurally match a `Move` must be
    /// reported as `AgentError::Conversion`.
    fn call(&self, state: &GameState) -> Result<Move, AgentError>;
}

/// Foreign callable speaking JSON.
///
/// The state is passed as the serialized `GameState` object, and the answer
/// must be an object of the shape
/// `{"player": 0, "from_station": 1, "to_station": 2, "type": "Taxi"}`.
///
/// ```
/// use serde_json::{json, Value};
/// use yard_engine::agent::{Agent, JsonCallable};
///
/// let agent = Agent::foreign(JsonCallable::new(|state: Value| {
///     let from = state["player_locs"][0].clone();
///     Ok::<_, String>(json!({"player": 0, "from_station": from, "to_station": 2, "type": "Taxi"}))
/// }));
/// assert!(agent.is_bound());
/// ```
pub struct JsonCallable<F, E> {
    func: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> JsonCallable<F, E>
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync,
    E: std::fmt::Display,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _error: PhantomData,
        }
    }
}

impl<F, E> ForeignCallable for JsonCallable<F, E>
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync,
    E: std::fmt::Display,
{
    fn call(&self, state: &GameState) -> Result<Move, AgentError> {
        let arg = serde_json::to_value(state)
            .map_err(|e| AgentError::conversion(format!("cannot encode state: {e}")))?;
        let answer = (self.func)(arg).map_err(|e| AgentError::callback(AgentKind::ForeignBoundary, e))?;
        serde_json::from_value(answer).map_err(|e| AgentError::conversion(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerCards, PlayerId, StationId, TransportType};
    use serde_json::json;

    fn state() -> GameState {
        GameState::new(
            3,
            vec![StationId(1), StationId(50)],
            vec![PlayerCards::new(2, 0, 0, 0, 0); 2],
            PlayerId(0),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_json_callable_sees_state() {
        let callable = JsonCallable::new(|state: Value| {
            assert_eq!(state["turn"], json!(3));
            assert_eq!(state["player_locs"], json!([1, 50]));
            assert_eq!(state["current_player"], json!(0));
            Ok::<_, String>(json!({"player": 0, "from_station": 1, "to_station": 2, "type": "Bus"}))
        });

        let mv = callable.call(&state()).unwrap();
        assert_eq!(
            mv,
            Move::new(PlayerId(0), StationId(1), StationId(2), TransportType::Bus)
        );
    }

    #[test]
    fn test_json_callable_mismatch_is_conversion_error() {
        let callable = JsonCallable::new(|_| Ok::<_, String>(json!({"player": 0, "to": 2})));

        let err = callable.call(&state()).unwrap_err();
        assert!(matches!(err, AgentError::Conversion { .. }));
    }

    #[test]
    fn test_json_callable_unknown_transport() {
        let callable = JsonCallable::new(|_| {
            Ok::<_, String>(json!({"player": 0, "from_station": 1, "to_station": 2, "type": "Rocket"}))
        });

        assert!(matches!(callable.call(&state()), Err(AgentError::Conversion { .. })));
    }

    #[test]
    fn test_json_callable_error_is_wrapped() {
        let callable = JsonCallable::new(|_| Err::<Value, _>("script raised"));

        let err = callable.call(&state()).unwrap_err();
        assert_eq!(
            err,
            AgentError::Callback {
                kind: AgentKind::ForeignBoundary,
                message: "script raised".to_string(),
            }
        );
    }
}

//! The `Agent` tagged union and its uniform invocation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::boundary;
use super::error::{AgentError, AgentKind};
use super::foreign::ForeignCallable;
use crate::core::{GameState, Move};

/// Native decision function.
pub type NativeFn = dyn Fn(&GameState) -> Result<Move, AgentError> + Send + Sync;

/// Decision-making unit for one player.
///
/// Holds a single callback of one of three kinds. Whatever the kind, callers
/// use [`Agent::invoke`]; the locking discipline of foreign-boundary calls
/// lives entirely inside that method.
///
/// Cloning an agent shares the underlying callable.
#[derive(Clone, Default)]
pub enum Agent {
    /// No callback bound yet.
    #[default]
    Unset,
    /// Runs in-process; no synchronization imposed.
    Native(Arc<NativeFn>),
    /// Reached through a foreign call boundary; serialized process-wide.
    ForeignBoundary(Arc<dyn ForeignCallable>),
}

impl Agent {
    /// Agent backed by an infallible native function.
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&GameState) -> Move + Send + Sync + 'static,
    {
        Agent::Native(Arc::new(move |state: &GameState| Ok::<_, AgentError>(f(state))))
    }

    /// Agent backed by a native function that may fail.
    ///
    /// Errors are wrapped as `AgentError::Callback`.
    pub fn native_fallible<F, E>(f: F) -> Self
    where
        F: Fn(&GameState) -> Result<Move, E> + Send + Sync + 'static,
        E: std::fmt::Display,
    {
        Agent::Native(Arc::new(move |state: &GameState| {
            f(state).map_err(|e| AgentError::callback(AgentKind::Native, e))
        }))
    }

    /// Agent backed by a foreign-boundary handle.
    pub fn foreign<H>(handle: H) -> Self
    where
        H: ForeignCallable + 'static,
    {
        Agent::ForeignBoundary(Arc::new(handle))
    }

    /// Replace the current callback with a native function.
    pub fn bind_native<F>(&mut self, f: F)
    where
        F: Fn(&GameState) -> Move + Send + Sync + 'static,
    {
        *self = Agent::native(f);
    }

    /// Replace the current callback with a fallible native function.
    pub fn bind_native_fallible<F, E>(&mut self, f: F)
    where
        F: Fn(&GameState) -> Result<Move, E> + Send + Sync + 'static,
        E: std::fmt::Display,
    {
        *self = Agent::native_fallible(f);
    }

    /// Replace the current callback with a foreign-boundary handle.
    pub fn bind_foreign<H>(&mut self, handle: H)
    where
        H: ForeignCallable + 'static,
    {
        *self = Agent::foreign(handle);
    }

    /// Which variant is held.
    #[must_use]
    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Unset => AgentKind::Unset,
            Agent::Native(_) => AgentKind::Native,
            Agent::ForeignBoundary(_) => AgentKind::ForeignBoundary,
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !matches!(self, Agent::Unset)
    }

    /// Ask the agent for a move.
    ///
    /// - `Unset`: `AgentError::NotConfigured`.
    /// - `Native`: calls the function directly on the calling thread.
    /// - `ForeignBoundary`: holds the process-wide boundary lock for the call
    ///   and both conversions, and releases it on every exit path.
    ///
    /// A panic inside either callable is caught and returned as
    /// `AgentError::Panicked`.
    pub fn invoke(&self, state: &GameState) -> Result<Move, AgentError> {
        match self {
            Agent::Unset => Err(AgentError::NotConfigured),
            Agent::Native(f) => guarded(AgentKind::Native, || f(state)),
            Agent::ForeignBoundary(handle) => {
                let _guard = boundary::enter();
                guarded(AgentKind::ForeignBoundary, || handle.call(state))
            }
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Agent({})", self.kind())
    }
}

fn guarded<F>(kind: AgentKind, call: F) -> Result<Move, AgentError>
where
    F: FnOnce() -> Result<Move, AgentError>,
{
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        Err(AgentError::Panicked {
            kind,
            message: panic_message(payload.as_ref()),
        })
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerCards, PlayerId, StationId, TransportType};

    fn state() -> GameState {
        GameState::new(
            0,
            vec![StationId(1), StationId(50)],
            vec![PlayerCards::new(2, 0, 0, 0, 0); 2],
            PlayerId(0),
            false,
        )
        .unwrap()
    }

    fn step_one(state: &GameState) -> Move {
        let player = state.current_player();
        let from = state.location(player).unwrap_or(StationId(0));
        Move::new(player, from, StationId(from.0 + 1), TransportType::Taxi)
    }

    struct Fixed(Move);

    impl ForeignCallable for Fixed {
        fn call(&self, _state: &GameState) -> Result<Move, AgentError> {
            assert!(boundary::held_by_current_thread());
            Ok(self.0)
        }
    }

    #[test]
    fn test_unset_agent_fails() {
        let agent = Agent::default();

        assert_eq!(agent.kind(), AgentKind::Unset);
        assert!(!agent.is_bound());
        assert_eq!(agent.invoke(&state()), Err(AgentError::NotConfigured));
    }

    #[test]
    fn test_native_agent_matches_function() {
        let agent = Agent::native(step_one);
        let s = state();

        assert_eq!(agent.kind(), AgentKind::Native);
        assert_eq!(agent.invoke(&s).unwrap(), step_one(&s));
    }

    #[test]
    fn test_native_agent_does_not_take_boundary() {
        let agent = Agent::native(|s| {
            assert!(!boundary::held_by_current_thread());
            step_one(s)
        });

        assert!(agent.invoke(&state()).is_ok());
    }

    #[test]
    fn test_native_fallible_wraps_error() {
        let agent = Agent::native_fallible(|_| Err::<Move, _>("out of ideas"));

        assert_eq!(
            agent.invoke(&state()),
            Err(AgentError::Callback {
                kind: AgentKind::Native,
                message: "out of ideas".to_string(),
            })
        );
    }

    #[test]
    fn test_foreign_agent_holds_boundary_during_call() {
        let mv = Move::new(PlayerId(0), StationId(1), StationId(2), TransportType::Taxi);
        let agent = Agent::foreign(Fixed(mv));

        assert_eq!(agent.kind(), AgentKind::ForeignBoundary);
        assert_eq!(agent.invoke(&state()), Ok(mv));
        assert!(!boundary::held_by_current_thread());
    }

    #[test]
    fn test_panic_is_wrapped() {
        let agent = Agent::native(|_| panic!("agent exploded"));

        let err = agent.invoke(&state()).unwrap_err();
        assert_eq!(
            err,
            AgentError::Panicked {
                kind: AgentKind::Native,
                message: "agent exploded".to_string(),
            }
        );
    }

    #[test]
    fn test_rebinding_replaces_variant() {
        let mut agent = Agent::default();
        agent.bind_native(step_one);
        assert_eq!(agent.kind(), AgentKind::Native);

        let mv = Move::new(PlayerId(1), StationId(50), StationId(49), TransportType::Bus);
        agent.bind_foreign(Fixed(mv));
        assert_eq!(agent.kind(), AgentKind::ForeignBoundary);
        assert_eq!(agent.invoke(&state()), Ok(mv));
    }

    #[test]
    fn test_debug_shows_kind() {
        assert_eq!(format!("{:?}", Agent::native(step_one)), "Agent(native)");
    }
}

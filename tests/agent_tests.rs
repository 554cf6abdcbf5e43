//! Agent dispatch tests.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};
use yard_engine::agent::{Agent, AgentError, AgentKind, JsonCallable};
use yard_engine::core::{GameState, Move, PlayerCards, PlayerId, StationId, TransportType};

fn state() -> GameState {
    GameState::new(
        4,
        vec![StationId(7), StationId(9)],
        vec![PlayerCards::new(4, 3, 3, 1, 2), PlayerCards::new(10, 8, 4, 0, 0)],
        PlayerId(1),
        false,
    )
    .unwrap()
}

fn step_right(s: &GameState) -> Move {
    let p = s.current_player();
    let at = s.location(p).unwrap();
    Move::new(p, at, StationId(at.0 + 1), TransportType::Bus)
}

#[test]
fn test_native_invoke_matches_function() {
    let agent = Agent::native(step_right);
    let s = state();

    assert_eq!(agent.invoke(&s), Ok(step_right(&s)));
    assert_eq!(agent.kind(), AgentKind::Native);
}

#[test]
fn test_default_agent_is_unset() {
    let agent = Agent::default();

    assert!(!agent.is_bound());
    assert_eq!(agent.invoke(&state()), Err(AgentError::NotConfigured));
}

#[test]
fn test_bind_replaces_variant() {
    let mut agent = Agent::Unset;

    agent.bind_native(step_right);
    assert_eq!(agent.kind(), AgentKind::Native);

    agent.bind_foreign(JsonCallable::new(|_: Value| {
        Ok::<_, String>(json!({"player": 1, "from_station": 9, "to_station": 3, "type": "Tube"}))
    }));
    assert_eq!(agent.kind(), AgentKind::ForeignBoundary);
    assert_eq!(
        agent.invoke(&state()),
        Ok(Move::new(PlayerId(1), StationId(9), StationId(3), TransportType::Tube))
    );
}

#[test]
fn test_foreign_sees_converted_state() {
    let agent = Agent::foreign(JsonCallable::new(|s: Value| {
        let current = s["current_player"].as_u64().unwrap_or(0);
        let from = s["player_locs"][current as usize].clone();
        Ok::<_, String>(json!({"player": current, "from_station": from, "to_station": 1, "type": "Taxi"}))
    }));

    assert_eq!(
        agent.invoke(&state()),
        Ok(Move::new(PlayerId(1), StationId(9), StationId(1), TransportType::Taxi))
    );
}

#[test]
fn test_foreign_shape_mismatch_fails_loudly() {
    let agent = Agent::foreign(JsonCallable::new(|_: Value| Ok::<_, String>(json!([1, 2, 3]))));

    assert!(matches!(agent.invoke(&state()), Err(AgentError::Conversion { .. })));
}

#[test]
fn test_native_panic_is_reported() {
    let agent = Agent::native(|_| panic!("lost the map"));

    assert_eq!(
        agent.invoke(&state()),
        Err(AgentError::Panicked {
            kind: AgentKind::Native,
            message: "lost the map".to_string(),
        })
    );
}

#[test]
fn test_clone_shares_callable() {
    let calls = Arc::new(Mutex::new(0));
    let counted = Arc::clone(&calls);
    let agent = Agent::native(move |s| {
        *counted.lock().unwrap() += 1;
        step_right(s)
    });
    let copy = agent.clone();

    agent.invoke(&state()).unwrap();
    copy.invoke(&state()).unwrap();
    assert_eq!(*calls.lock().unwrap(), 2);
}

/// Each agent announces itself, then waits for the other. If native calls
/// were serialized, the first one would time out.
#[test]
fn test_native_agents_run_concurrently() {
    fn rendezvous(announce: mpsc::Sender<()>, wait: mpsc::Receiver<()>) -> Agent {
        let wait = Mutex::new(wait);
        Agent::native_fallible(move |s: &GameState| -> Result<Move, String> {
            announce.send(()).map_err(|e| e.to_string())?;
            wait.lock()
                .unwrap()
                .recv_timeout(Duration::from_secs(5))
                .map_err(|e| e.to_string())?;
            Ok(step_right(s))
        })
    }

    let (a_tx, a_rx) = mpsc::channel();
    let (b_tx, b_rx) = mpsc::channel();
    let a = rendezvous(a_tx, b_rx);
    let b = rendezvous(b_tx, a_rx);

    let s = state();
    let (ra, rb) = thread::scope(|scope| {
        let ha = scope.spawn(|| a.invoke(&s));
        let hb = scope.spawn(|| b.invoke(&s));
        (ha.join().unwrap(), hb.join().unwrap())
    });

    assert_eq!(ra, Ok(step_right(&s)));
    assert_eq!(rb, Ok(step_right(&s)));
}

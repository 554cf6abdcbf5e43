//! Chase engine bindings for Python.

use std::sync::Arc;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::agent::{Agent, RandomAgent};
use crate::core::{GameRng, PlayerId, StationId};
use crate::engine::{Engine, EngineStatus, RunOutcome};
use crate::games::chase::{Board, ChaseBuilder, ChaseRules};
use crate::rules::{GameResult, RulesEngine};

use super::py_agent::PyCallable;
use super::py_core::{PyGameState, PyMove, PyTransportType};
use super::py_errors::{engine_err, setup_err};

/// Engine running the chase game.
///
/// Seats start unset; bind each one with `bind_agent` (a Python callable)
/// or `bind_random` before stepping.
#[pyclass(name = "ChaseEngine")]
pub struct PyChaseEngine {
    engine: Engine<Arc<ChaseRules>>,
    /// Game seed; unseeded random agents get a fork of it.
    agent_rng: GameRng,
}

#[pymethods]
impl PyChaseEngine {
    /// Create a new chase game.
    ///
    /// # Arguments
    /// - routes: list of (station_a, station_b, TransportType); Black marks a ferry
    /// - player_count: number of players (2-6), seat 0 is the fugitive
    /// - seed: RNG seed for random start stations and unseeded random agents
    /// - start_locations: explicit start stations, one per player
    /// - max_rounds: rounds the fugitive must survive
    #[new]
    #[pyo3(signature = (
        routes,
        player_count = 4,
        seed = 42,
        start_locations = None,
        max_rounds = 24
    ))]
    fn new(
        routes: Vec<(u32, u32, PyTransportType)>,
        player_count: usize,
        seed: u64,
        start_locations: Option<Vec<u32>>,
        max_rounds: u32,
    ) -> PyResult<Self> {
        if !(2..=6).contains(&player_count) {
            return Err(PyValueError::new_err("player_count must be 2-6"));
        }
        if max_rounds == 0 {
            return Err(PyValueError::new_err("max_rounds must be positive"));
        }

        let board = Board::from_routes(
            routes
                .into_iter()
                .map(|(a, b, kind)| (StationId::new(a), StationId::new(b), kind.into())),
        )
        .map_err(setup_err)?;

        let mut builder = ChaseBuilder::new(board)
            .player_count(player_count)
            .max_rounds(max_rounds);
        if let Some(locations) = start_locations {
            builder = builder.start_locations(locations.into_iter().map(StationId::new).collect());
        }
        let (rules, state) = builder.build(seed).map_err(setup_err)?;

        Ok(Self {
            engine: Engine::new(Arc::new(rules), state),
            agent_rng: GameRng::new(seed),
        })
    }

    /// Seat a Python callable for `player`.
    ///
    /// The callable receives a GameState and returns a Move (or a
    /// `(player, from_station, to_station, TransportType)` tuple).
    fn bind_agent(&mut self, player: u8, callback: PyObject) -> PyResult<()> {
        self.engine
            .seat(PlayerId::new(player), Agent::foreign(PyCallable::new(callback)))
            .map_err(engine_err)
    }

    /// Seat a native random agent for `player`.
    ///
    /// Without a seed the agent draws from a fork of the game seed, so a
    /// game with the same seed and binding order replays exactly.
    #[pyo3(signature = (player, seed = None))]
    fn bind_random(&mut self, player: u8, seed: Option<u64>) -> PyResult<()> {
        let rules = Arc::clone(self.engine.rules());
        let rng = match seed {
            Some(seed) => GameRng::new(seed),
            None => self.agent_rng.fork(),
        };
        self.engine
            .seat(PlayerId::new(player), RandomAgent::with_rng(rules, rng).into_agent())
            .map_err(engine_err)
    }

    /// Play one move and return it.
    fn step(&mut self, py: Python<'_>) -> PyResult<PyMove> {
        let engine = &mut self.engine;
        py.allow_threads(|| engine.step()).map(PyMove).map_err(engine_err)
    }

    /// Play until terminal, `max_turns` steps, or no legal move.
    ///
    /// Returns (outcome, steps) with outcome one of "terminal",
    /// "turn_limit", "no_legal_moves".
    #[pyo3(signature = (max_turns = 1000))]
    fn run(&mut self, py: Python<'_>, max_turns: usize) -> PyResult<(&'static str, usize)> {
        let engine = &mut self.engine;
        let outcome = py
            .allow_threads(|| engine.run_until_terminal(max_turns))
            .map_err(engine_err)?;
        let name = match outcome {
            RunOutcome::Terminal { .. } => "terminal",
            RunOutcome::TurnLimit { .. } => "turn_limit",
            RunOutcome::NoLegalMoves { .. } => "no_legal_moves",
        };
        Ok((name, outcome.steps()))
    }

    /// Legal moves of the current player.
    fn legal_moves(&self) -> Vec<PyMove> {
        self.engine
            .rules()
            .legal_moves(self.engine.current_state())
            .into_iter()
            .map(PyMove)
            .collect()
    }

    #[getter]
    fn state(&self) -> PyGameState {
        PyGameState(self.engine.current_state().clone())
    }

    fn is_terminal(&self) -> bool {
        self.engine.status() == EngineStatus::Terminal
    }

    /// Winning seats once the game is over, None while it runs.
    fn winners(&self) -> Option<Vec<u8>> {
        match self.engine.rules().outcome(self.engine.current_state())? {
            GameResult::Winner(p) => Some(vec![p.0]),
            GameResult::Winners(ps) => Some(ps.into_iter().map(|p| p.0).collect()),
            GameResult::Draw => Some(vec![]),
        }
    }

    /// Applied moves, oldest first.
    fn history(&self) -> Vec<PyMove> {
        self.engine.history().iter().map(|r| PyMove(r.mv)).collect()
    }

    fn __repr__(&self) -> String {
        let state = self.engine.current_state();
        let status = if self.is_terminal() { "terminal" } else { "running" };
        format!(
            "ChaseEngine(turn={}, current=P{}, status={})",
            state.turn(),
            state.current_player().0,
            status
        )
    }
}

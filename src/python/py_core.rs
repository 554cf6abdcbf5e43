//! Core type bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::{GameState, Move, PlayerCards, PlayerId, StationId, TransportType};

use super::py_errors::state_err;

/// Python mirror of TransportType.
#[pyclass(name = "TransportType", eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PyTransportType {
    Taxi,
    Bus,
    Tube,
    Black,
    Double,
}

impl From<PyTransportType> for TransportType {
    fn from(kind: PyTransportType) -> Self {
        match kind {
            PyTransportType::Taxi => TransportType::Taxi,
            PyTransportType::Bus => TransportType::Bus,
            PyTransportType::Tube => TransportType::Tube,
            PyTransportType::Black => TransportType::Black,
            PyTransportType::Double => TransportType::Double,
        }
    }
}

impl From<TransportType> for PyTransportType {
    fn from(kind: TransportType) -> Self {
        match kind {
            TransportType::Taxi => PyTransportType::Taxi,
            TransportType::Bus => PyTransportType::Bus,
            TransportType::Tube => PyTransportType::Tube,
            TransportType::Black => PyTransportType::Black,
            TransportType::Double => PyTransportType::Double,
        }
    }
}

/// Python wrapper for Move.
#[pyclass(name = "Move", frozen)]
#[derive(Clone, Debug)]
pub struct PyMove(pub Move);

#[pymethods]
impl PyMove {
    #[new]
    fn new(player: u8, from_station: u32, to_station: u32, transport: PyTransportType) -> Self {
        Self(Move::new(
            PlayerId::new(player),
            StationId::new(from_station),
            StationId::new(to_station),
            transport.into(),
        ))
    }

    #[getter]
    fn player(&self) -> u8 {
        self.0.player().0
    }

    #[getter]
    fn from_station(&self) -> u32 {
        self.0.from_station().raw()
    }

    #[getter]
    fn to_station(&self) -> u32 {
        self.0.to_station().raw()
    }

    /// Transport kind (named `type` on the Rust side).
    #[getter]
    fn transport(&self) -> PyTransportType {
        self.0.transport().into()
    }

    fn __repr__(&self) -> String {
        format!(
            "Move(player={}, from_station={}, to_station={}, type={})",
            self.0.player().0,
            self.0.from_station().raw(),
            self.0.to_station().raw(),
            self.0.transport()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

/// Python wrapper for PlayerCards.
#[pyclass(name = "PlayerCards", frozen)]
#[derive(Clone, Debug)]
pub struct PyPlayerCards(pub PlayerCards);

#[pymethods]
impl PyPlayerCards {
    #[new]
    #[pyo3(signature = (taxi = 0, bus = 0, tube = 0, black = 0, double = 0))]
    fn new(taxi: u32, bus: u32, tube: u32, black: u32, double: u32) -> Self {
        Self(PlayerCards::new(taxi, bus, tube, black, double))
    }

    #[getter]
    fn taxi(&self) -> u32 {
        self.0.taxi()
    }

    #[getter]
    fn bus(&self) -> u32 {
        self.0.bus()
    }

    #[getter]
    fn tube(&self) -> u32 {
        self.0.tube()
    }

    #[getter]
    fn black(&self) -> u32 {
        self.0.black()
    }

    #[getter]
    fn double(&self) -> u32 {
        self.0.double()
    }

    fn count(&self, kind: PyTransportType) -> u32 {
        self.0.count(kind.into())
    }

    /// New inventory with one ticket spent, or None if none are left.
    fn spend(&self, kind: PyTransportType) -> Option<Self> {
        self.0.spend(kind.into()).map(Self)
    }

    fn __repr__(&self) -> String {
        format!(
            "PlayerCards(taxi={}, bus={}, tube={}, black={}, double={})",
            self.0.taxi(),
            self.0.bus(),
            self.0.tube(),
            self.0.black(),
            self.0.double()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Python wrapper for GameState (read-only).
#[pyclass(name = "GameState", frozen)]
#[derive(Clone, Debug)]
pub struct PyGameState(pub GameState);

#[pymethods]
impl PyGameState {
    /// Build a validated state. Raises StateError on mismatched lengths or an
    /// out-of-range current player.
    #[new]
    #[pyo3(signature = (turn, player_locs, player_cards, current_player = 0, victory_flag = false))]
    fn new(
        turn: u32,
        player_locs: Vec<u32>,
        player_cards: Vec<PyPlayerCards>,
        current_player: u8,
        victory_flag: bool,
    ) -> PyResult<Self> {
        GameState::new(
            turn,
            player_locs.into_iter().map(StationId::new).collect(),
            player_cards.into_iter().map(|c| c.0).collect(),
            PlayerId::new(current_player),
            victory_flag,
        )
        .map(Self)
        .map_err(state_err)
    }

    #[getter]
    fn turn(&self) -> u32 {
        self.0.turn()
    }

    /// Locations, indexed by player.
    #[getter]
    fn player_locs(&self) -> Vec<u32> {
        self.0.player_locs().iter().map(|s| s.raw()).collect()
    }

    #[getter]
    fn player_cards(&self) -> Vec<PyPlayerCards> {
        self.0.player_cards().iter().copied().map(PyPlayerCards).collect()
    }

    #[getter]
    fn current_player(&self) -> u8 {
        self.0.current_player().0
    }

    #[getter]
    fn victory_flag(&self) -> bool {
        self.0.victory_flag()
    }

    fn player_count(&self) -> usize {
        self.0.player_count()
    }

    /// Flat encoding for model input:
    /// `[turn, current_player, victory, locs..., tickets (5 per player)...]`.
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        let state = &self.0;
        let mut data = Vec::with_capacity(3 + state.player_count() * 6);
        data.push(i64::from(state.turn()));
        data.push(i64::from(state.current_player().0));
        data.push(i64::from(state.victory_flag()));
        data.extend(state.player_locs().iter().map(|s| i64::from(s.raw())));
        for cards in state.player_cards() {
            data.extend(cards.as_array().iter().map(|&n| i64::from(n)));
        }
        PyArray1::from_vec_bound(py, data)
    }

    fn __repr__(&self) -> String {
        format!(
            "GameState(turn={}, player_locs={:?}, current_player={}, victory_flag={})",
            self.0.turn(),
            self.player_locs(),
            self.0.current_player().0,
            self.0.victory_flag()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

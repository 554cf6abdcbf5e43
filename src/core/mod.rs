//! Core value types: players, stations, moves, ticket inventories, state, RNG.
//!
//! Everything here is an immutable value. Transitions produce new values; the
//! engine and the rules collaborator never mutate a state in place.

pub mod player;
pub mod station;
pub mod moves;
pub mod cards;
pub mod state;
pub mod rng;

pub use player::PlayerId;
pub use station::StationId;
pub use moves::{Move, TransportType};
pub use cards::PlayerCards;
pub use state::{GameState, StateError, Transition};
pub use rng::GameRng;

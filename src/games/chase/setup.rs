//! Setup collaborator for the chase game.

use thiserror::Error;

use super::board::Board;
use super::rules::{ChaseRules, FUGITIVE};
use crate::core::{GameRng, GameState, PlayerCards, PlayerId, StateError, StationId, TransportType};

/// Rejected board or game setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("invalid {kind} route from {from} to {to}")]
    InvalidRoute {
        from: StationId,
        to: StationId,
        kind: TransportType,
    },

    #[error("expected {expected} start locations, got {actual}")]
    WrongLocationCount { expected: usize, actual: usize },

    #[error("{0} is not on the board")]
    UnknownStation(StationId),

    #[error("two players start on {0}")]
    SharedStartStation(StationId),

    #[error("board has {available} stations, need {needed} distinct start stations")]
    NotEnoughStations { needed: usize, available: usize },

    #[error(transparent)]
    State(#[from] StateError),
}

/// Builder for a chase game.
///
/// Seat 0 is the fugitive, every other seat a detective.
pub struct ChaseBuilder {
    board: Board,
    player_count: usize,
    start_locations: Option<Vec<StationId>>,
    max_rounds: u32,
    fugitive_tickets: Option<PlayerCards>,
    detective_tickets: PlayerCards,
}

impl ChaseBuilder {
    /// Start from the default setup on `board`: four players, 24 rounds,
    /// random start stations.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            player_count: 4,
            start_locations: None,
            max_rounds: 24,
            fugitive_tickets: None,
            detective_tickets: PlayerCards::new(10, 8, 4, 0, 0),
        }
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=6).contains(&count), "Player count must be 2-6");
        self.player_count = count;
        self
    }

    /// Fix the start stations instead of drawing them at random.
    pub fn start_locations(mut self, locations: Vec<StationId>) -> Self {
        self.start_locations = Some(locations);
        self
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        assert!(rounds > 0, "Max rounds must be positive");
        self.max_rounds = rounds;
        self
    }

    /// Override the fugitive's starting tickets.
    pub fn fugitive_tickets(mut self, tickets: PlayerCards) -> Self {
        self.fugitive_tickets = Some(tickets);
        self
    }

    /// Override every detective's starting tickets.
    pub fn detective_tickets(mut self, tickets: PlayerCards) -> Self {
        self.detective_tickets = tickets;
        self
    }

    /// Starting inventory for a seat.
    ///
    /// By default the fugitive holds 4 taxi, 3 bus, 3 tube, one black ticket
    /// per detective and 2 double-move cards.
    #[must_use]
    pub fn starting_tickets(&self, player: PlayerId) -> PlayerCards {
        if player == FUGITIVE {
            let detectives = (self.player_count - 1) as u32;
            self.fugitive_tickets
                .unwrap_or_else(|| PlayerCards::new(4, 3, 3, detectives, 2))
        } else {
            self.detective_tickets
        }
    }

    /// Build the rules and the initial state.
    ///
    /// Random start stations are drawn from `seed`; the same seed always
    /// yields the same setup.
    pub fn build(self, seed: u64) -> Result<(ChaseRules, GameState), SetupError> {
        let locations = match &self.start_locations {
            Some(locations) => self.check_locations(locations)?,
            None => self.draw_locations(seed)?,
        };
        let cards = PlayerId::all(self.player_count)
            .map(|p| self.starting_tickets(p))
            .collect();

        let state = GameState::new(0, locations, cards, FUGITIVE, false)?;
        log::debug!(
            "chase setup: {} players on {} stations, starts {:?}",
            self.player_count,
            self.board.station_count(),
            state.player_locs()
        );

        Ok((ChaseRules::new(self.board, self.max_rounds), state))
    }

    fn check_locations(&self, locations: &[StationId]) -> Result<Vec<StationId>, SetupError> {
        if locations.len() != self.player_count {
            return Err(SetupError::WrongLocationCount {
                expected: self.player_count,
                actual: locations.len(),
            });
        }
        for (i, &station) in locations.iter().enumerate() {
            if !self.board.contains(station) {
                return Err(SetupError::UnknownStation(station));
            }
            if locations[..i].contains(&station) {
                return Err(SetupError::SharedStartStation(station));
            }
        }
        Ok(locations.to_vec())
    }

    fn draw_locations(&self, seed: u64) -> Result<Vec<StationId>, SetupError> {
        let stations = self.board.stations();
        GameRng::new(seed)
            .sample_distinct(&stations, self.player_count)
            .ok_or(SetupError::NotEnoughStations {
                needed: self.player_count,
                available: stations.len(),
            })
    }
}

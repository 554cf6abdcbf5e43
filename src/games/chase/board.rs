//! Route graph for the chase game.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::setup::SetupError;
use crate::core::{StationId, TransportType};

/// One end of an undirected route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Route {
    pub to: StationId,
    /// Taxi, Bus or Tube; `Black` marks a ferry.
    pub kind: TransportType,
}

/// Undirected graph of stations and the routes between them.
///
/// The board is supplied by the caller; nothing about the topology is built
/// in.
#[derive(Clone, Debug, Default)]
pub struct Board {
    routes: FxHashMap<StationId, SmallVec<[Route; 6]>>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from `(a, b, kind)` triples.
    pub fn from_routes<I>(routes: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = (StationId, StationId, TransportType)>,
    {
        let mut board = Self::new();
        for (a, b, kind) in routes {
            board.add_route(a, b, kind)?;
        }
        Ok(board)
    }

    /// Add a station with no routes (yet).
    pub fn add_station(&mut self, station: StationId) {
        self.routes.entry(station).or_default();
    }

    /// Connect `a` and `b` in both directions.
    ///
    /// Adding an existing route again is a no-op. `Double` is a card, not a
    /// route kind, and self-loops are rejected.
    pub fn add_route(&mut self, a: StationId, b: StationId, kind: TransportType) -> Result<(), SetupError> {
        if kind == TransportType::Double || a == b {
            return Err(SetupError::InvalidRoute { from: a, to: b, kind });
        }
        self.push_route(a, Route { to: b, kind });
        self.push_route(b, Route { to: a, kind });
        Ok(())
    }

    /// Routes leaving `station`. Empty for unknown stations.
    #[must_use]
    pub fn routes_from(&self, station: StationId) -> &[Route] {
        self.routes.get(&station).map(|r| r.as_slice()).unwrap_or(&[])
    }

    #[must_use]
    pub fn contains(&self, station: StationId) -> bool {
        self.routes.contains_key(&station)
    }

    /// All stations, sorted.
    #[must_use]
    pub fn stations(&self) -> Vec<StationId> {
        let mut stations: Vec<_> = self.routes.keys().copied().collect();
        stations.sort_unstable();
        stations
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.routes.len()
    }

    fn push_route(&mut self, from: StationId, route: Route) {
        let routes = self.routes.entry(from).or_default();
        if !routes.contains(&route) {
            routes.push(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_are_undirected() {
        let board = Board::from_routes([(StationId(1), StationId(2), TransportType::Taxi)]).unwrap();

        assert_eq!(board.routes_from(StationId(1)), &[Route { to: StationId(2), kind: TransportType::Taxi }]);
        assert_eq!(board.routes_from(StationId(2)), &[Route { to: StationId(1), kind: TransportType::Taxi }]);
        assert!(board.routes_from(StationId(3)).is_empty());
    }

    #[test]
    fn test_duplicate_route_ignored() {
        let mut board = Board::new();
        board.add_route(StationId(1), StationId(2), TransportType::Bus).unwrap();
        board.add_route(StationId(2), StationId(1), TransportType::Bus).unwrap();
        board.add_route(StationId(1), StationId(2), TransportType::Taxi).unwrap();

        assert_eq!(board.routes_from(StationId(1)).len(), 2);
    }

    #[test]
    fn test_invalid_routes_rejected() {
        let mut board = Board::new();

        assert!(board.add_route(StationId(1), StationId(2), TransportType::Double).is_err());
        assert!(board.add_route(StationId(1), StationId(1), TransportType::Taxi).is_err());
        assert_eq!(board.station_count(), 0);
    }

    #[test]
    fn test_stations_sorted() {
        let mut board = Board::from_routes([
            (StationId(9), StationId(3), TransportType::Taxi),
            (StationId(3), StationId(5), TransportType::Tube),
        ])
        .unwrap();
        board.add_station(StationId(1));

        assert_eq!(board.stations(), vec![StationId(1), StationId(3), StationId(5), StationId(9)]);
        assert!(board.contains(StationId(1)));
        assert!(!board.contains(StationId(2)));
    }
}

//! Move representation: one ply of play.
//!
//! A move names the acting player, where they start, where they end up, and
//! the means of transport (which doubles as the ticket they spend). The engine
//! doesn't interpret moves - it hands them to the rules collaborator, which
//! decides whether they are legal.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::station::StationId;

/// Means of transport used for a move.
///
/// Each kind corresponds to one ticket counter in `PlayerCards`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportType {
    Taxi,
    Bus,
    Tube,
    /// Wildcard ticket, also the only way to ride a ferry route.
    Black,
    /// Double-move card.
    Double,
}

impl TransportType {
    /// All transport kinds, in ticket order.
    pub const ALL: [TransportType; 5] = [
        TransportType::Taxi,
        TransportType::Bus,
        TransportType::Tube,
        TransportType::Black,
        TransportType::Double,
    ];

    /// Position of this kind in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            TransportType::Taxi => 0,
            TransportType::Bus => 1,
            TransportType::Tube => 2,
            TransportType::Black => 3,
            TransportType::Double => 4,
        }
    }
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransportType::Taxi => "taxi",
            TransportType::Bus => "bus",
            TransportType::Tube => "tube",
            TransportType::Black => "black",
            TransportType::Double => "double",
        };
        f.write_str(name)
    }
}

/// A single move.
///
/// Immutable once constructed. Serialized with the field names
/// `player`, `from_station`, `to_station` and `type`.
///
/// ## Example
///
/// ```
/// use yard_engine::core::{Move, PlayerId, StationId, TransportType};
///
/// let mv = Move::new(PlayerId::new(0), StationId::new(1), StationId::new(2), TransportType::Taxi);
/// assert_eq!(mv.to_station(), StationId::new(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Move {
    player: PlayerId,
    from_station: StationId,
    to_station: StationId,
    #[serde(rename = "type")]
    transport: TransportType,
}

impl Move {
    /// Create a new move.
    #[must_use]
    pub const fn new(
        player: PlayerId,
        from_station: StationId,
        to_station: StationId,
        transport: TransportType,
    ) -> Self {
        Self {
            player,
            from_station,
            to_station,
            transport,
        }
    }

    /// The acting player.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Where the player starts.
    #[must_use]
    pub const fn from_station(&self) -> StationId {
        self.from_station
    }

    /// Where the player ends up.
    #[must_use]
    pub const fn to_station(&self) -> StationId {
        self.to_station
    }

    /// The transport (and ticket) used.
    #[must_use]
    pub const fn transport(&self) -> TransportType {
        self.transport
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} -> {} by {}",
            self.player, self.from_station, self.to_station, self.transport
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxi_move() -> Move {
        Move::new(PlayerId::new(0), StationId::new(1), StationId::new(2), TransportType::Taxi)
    }

    #[test]
    fn test_move_accessors() {
        let mv = taxi_move();

        assert_eq!(mv.player(), PlayerId::new(0));
        assert_eq!(mv.from_station(), StationId::new(1));
        assert_eq!(mv.to_station(), StationId::new(2));
        assert_eq!(mv.transport(), TransportType::Taxi);
    }

    #[test]
    fn test_move_equality() {
        let bus = Move::new(PlayerId::new(0), StationId::new(1), StationId::new(2), TransportType::Bus);

        assert_eq!(taxi_move(), taxi_move());
        assert_ne!(taxi_move(), bus);
    }

    #[test]
    fn test_move_json_shape() {
        let value = serde_json::to_value(taxi_move()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"player": 0, "from_station": 1, "to_station": 2, "type": "Taxi"})
        );
    }

    #[test]
    fn test_move_rejects_unknown_fields() {
        let value = serde_json::json!({
            "player": 0, "from_station": 1, "to_station": 2, "type": "Taxi", "extra": 1
        });
        assert!(serde_json::from_value::<Move>(value).is_err());
    }

    #[test]
    fn test_transport_index_matches_all() {
        for (i, kind) in TransportType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_move_display() {
        assert_eq!(taxi_move().to_string(), "Player 0: Station(1) -> Station(2) by taxi");
    }
}

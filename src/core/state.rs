//! Immutable game state.
//!
//! ## GameState
//!
//! A snapshot of everything the engine tracks:
//! - Turn counter
//! - Per-player location and ticket inventory
//! - Whose turn it is
//! - Terminal (victory) flag
//!
//! All fields are set at construction and validated there. There are no
//! mutators: every transition produces a brand-new value through
//! [`GameState::transition`], and the accessors only hand out read views, so a
//! state can be shared freely between readers and threads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cards::PlayerCards;
use super::player::PlayerId;
use super::station::StationId;

/// Rejected `GameState` construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("player_locs has {locs} entries but player_cards has {cards}")]
    LengthMismatch { locs: usize, cards: usize },

    #[error("current player {current} out of range for {player_count} players")]
    CurrentPlayerOutOfRange { current: PlayerId, player_count: usize },

    #[error("{player} is out of range for {player_count} players")]
    UnknownPlayer { player: PlayerId, player_count: usize },

    #[error("at most 255 players supported, got {0}")]
    TooManyPlayers(usize),
}

/// Immutable game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    turn: u32,
    player_locs: Vec<StationId>,
    player_cards: Vec<PlayerCards>,
    current_player: PlayerId,
    victory_flag: bool,
}

/// Unvalidated mirror of `GameState` used for deserialization.
#[derive(Deserialize)]
struct RawGameState {
    turn: u32,
    player_locs: Vec<StationId>,
    player_cards: Vec<PlayerCards>,
    current_player: PlayerId,
    victory_flag: bool,
}

impl TryFrom<RawGameState> for GameState {
    type Error = StateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        GameState::new(
            raw.turn,
            raw.player_locs,
            raw.player_cards,
            raw.current_player,
            raw.victory_flag,
        )
    }
}

impl GameState {
    /// Create a validated game state.
    ///
    /// Fails if the location and inventory sequences differ in length or if
    /// `current_player` does not index into them.
    pub fn new(
        turn: u32,
        player_locs: Vec<StationId>,
        player_cards: Vec<PlayerCards>,
        current_player: PlayerId,
        victory_flag: bool,
    ) -> Result<Self, StateError> {
        if player_locs.len() != player_cards.len() {
            return Err(StateError::LengthMismatch {
                locs: player_locs.len(),
                cards: player_cards.len(),
            });
        }
        if player_locs.len() > 255 {
            return Err(StateError::TooManyPlayers(player_locs.len()));
        }
        if current_player.index() >= player_locs.len() {
            return Err(StateError::CurrentPlayerOutOfRange {
                current: current_player,
                player_count: player_locs.len(),
            });
        }

        Ok(Self {
            turn,
            player_locs,
            player_cards,
            current_player,
            victory_flag,
        })
    }

    /// Turn counter.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Locations, indexed by player.
    #[must_use]
    pub fn player_locs(&self) -> &[StationId] {
        &self.player_locs
    }

    /// Ticket inventories, indexed by player.
    #[must_use]
    pub fn player_cards(&self) -> &[PlayerCards] {
        &self.player_cards
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// True once the game has reached a terminal condition.
    #[must_use]
    pub fn victory_flag(&self) -> bool {
        self.victory_flag
    }

    /// Alias for `victory_flag`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.victory_flag
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_locs.len()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// Location of a player, if the player exists.
    #[must_use]
    pub fn location(&self, player: PlayerId) -> Option<StationId> {
        self.player_locs.get(player.index()).copied()
    }

    /// Inventory of a player, if the player exists.
    #[must_use]
    pub fn cards(&self, player: PlayerId) -> Option<PlayerCards> {
        self.player_cards.get(player.index()).copied()
    }

    /// Players standing on `station`.
    pub fn players_at(&self, station: StationId) -> impl Iterator<Item = PlayerId> + '_ {
        self.player_locs
            .iter()
            .enumerate()
            .filter(move |(_, &loc)| loc == station)
            .map(|(i, _)| PlayerId(i as u8))
    }

    /// Start building a successor state.
    ///
    /// The builder works on its own copy; `self` is never affected.
    #[must_use]
    pub fn transition(&self) -> Transition {
        Transition {
            turn: self.turn,
            player_locs: self.player_locs.clone(),
            player_cards: self.player_cards.clone(),
            current_player: self.current_player,
            victory_flag: self.victory_flag,
            error: None,
        }
    }
}

/// Builder for a successor `GameState`.
///
/// Setters never fail; the first problem (an unknown player) is remembered
/// and reported by `build`, which also re-runs the constructor checks.
#[derive(Clone, Debug)]
pub struct Transition {
    turn: u32,
    player_locs: Vec<StationId>,
    player_cards: Vec<PlayerCards>,
    current_player: PlayerId,
    victory_flag: bool,
    error: Option<StateError>,
}

impl Transition {
    #[must_use]
    pub fn turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Move `player` to `station`.
    #[must_use]
    pub fn location(mut self, player: PlayerId, station: StationId) -> Self {
        match self.player_locs.get_mut(player.index()) {
            Some(slot) => *slot = station,
            None => self.record_unknown(player),
        }
        self
    }

    /// Replace the inventory of `player`.
    #[must_use]
    pub fn cards(mut self, player: PlayerId, cards: PlayerCards) -> Self {
        match self.player_cards.get_mut(player.index()) {
            Some(slot) => *slot = cards,
            None => self.record_unknown(player),
        }
        self
    }

    #[must_use]
    pub fn current_player(mut self, player: PlayerId) -> Self {
        self.current_player = player;
        self
    }

    #[must_use]
    pub fn victory(mut self, victory_flag: bool) -> Self {
        self.victory_flag = victory_flag;
        self
    }

    /// Validate and produce the successor.
    pub fn build(self) -> Result<GameState, StateError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        GameState::new(
            self.turn,
            self.player_locs,
            self.player_cards,
            self.current_player,
            self.victory_flag,
        )
    }

    fn record_unknown(&mut self, player: PlayerId) {
        if self.error.is_none() {
            self.error = Some(StateError::UnknownPlayer {
                player,
                player_count: self.player_locs.len(),
            });
        }
    }
}

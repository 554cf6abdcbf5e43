//! Per-player ticket inventory.
//!
//! `PlayerCards` is a plain bundle of five counters. It never validates and it
//! is never mutated in place: spending or receiving a ticket produces a new
//! value. Counters are unsigned, so a negative inventory cannot be built; an
//! attempt to spend a ticket the player doesn't hold yields `None` and it is up
//! to the rules collaborator to reject the move.

use serde::{Deserialize, Serialize};

use super::moves::TransportType;

/// Ticket counts for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCards {
    taxi: u32,
    bus: u32,
    tube: u32,
    black: u32,
    double: u32,
}

impl PlayerCards {
    /// Create an inventory from explicit counts.
    #[must_use]
    pub const fn new(taxi: u32, bus: u32, tube: u32, black: u32, double: u32) -> Self {
        Self {
            taxi,
            bus,
            tube,
            black,
            double,
        }
    }

    #[must_use]
    pub const fn taxi(&self) -> u32 {
        self.taxi
    }

    #[must_use]
    pub const fn bus(&self) -> u32 {
        self.bus
    }

    #[must_use]
    pub const fn tube(&self) -> u32 {
        self.tube
    }

    #[must_use]
    pub const fn black(&self) -> u32 {
        self.black
    }

    #[must_use]
    pub const fn double(&self) -> u32 {
        self.double
    }

    /// Count of tickets of the given kind.
    #[must_use]
    pub const fn count(&self, kind: TransportType) -> u32 {
        match kind {
            TransportType::Taxi => self.taxi,
            TransportType::Bus => self.bus,
            TransportType::Tube => self.tube,
            TransportType::Black => self.black,
            TransportType::Double => self.double,
        }
    }

    /// Total tickets held.
    #[must_use]
    pub fn total(&self) -> u32 {
        TransportType::ALL.iter().map(|&k| self.count(k)).sum()
    }

    /// Copy with the given counter replaced.
    #[must_use]
    pub fn with_count(mut self, kind: TransportType, count: u32) -> Self {
        *self.slot(kind) = count;
        self
    }

    /// Copy with `amount` tickets of `kind` added (saturating).
    #[must_use]
    pub fn with_added(self, kind: TransportType, amount: u32) -> Self {
        let current = self.count(kind);
        self.with_count(kind, current.saturating_add(amount))
    }

    /// Copy with one ticket of `kind` removed.
    ///
    /// Returns `None` if the player holds no ticket of that kind.
    #[must_use]
    pub fn spend(self, kind: TransportType) -> Option<Self> {
        let remaining = self.count(kind).checked_sub(1)?;
        Some(self.with_count(kind, remaining))
    }

    /// Counters in ticket order (taxi, bus, tube, black, double).
    #[must_use]
    pub fn as_array(&self) -> [u32; 5] {
        [self.taxi, self.bus, self.tube, self.black, self.double]
    }

    fn slot(&mut self, kind: TransportType) -> &mut u32 {
        match kind {
            TransportType::Taxi => &mut self.taxi,
            TransportType::Bus => &mut self.bus,
            TransportType::Tube => &mut self.tube,
            TransportType::Black => &mut self.black,
            TransportType::Double => &mut self.double,
        }
    }
}

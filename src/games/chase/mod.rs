//! Chase: a pursuit game on a route graph, used to exercise the engine.
//!
//! - Seat 0 is the fugitive, the other seats are detectives (2-6 players)
//! - Moving along a taxi, bus or tube route spends a matching ticket;
//!   a black ticket rides any route, ferries included
//! - The fugitive may play a double-move card along any route and then
//!   moves again
//! - Detectives never share a station; the fugitive can't step onto one
//! - Tickets spent by detectives are handed to the fugitive
//! - Detectives win by landing on the fugitive; the fugitive wins by lasting
//!   `max_rounds` rounds
//!
//! The board is always supplied by the caller.

mod board;
mod rules;
mod setup;

pub use board::{Board, Route};
pub use rules::{ChaseRules, FUGITIVE};
pub use setup::{ChaseBuilder, SetupError};

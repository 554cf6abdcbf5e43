//! Chase rules: the reference rules collaborator.

use super::board::Board;
use crate::core::{GameState, Move, PlayerId, StateError, TransportType};
use crate::rules::{GameResult, IllegalMoveError, RulesEngine};

/// The fugitive always sits in seat 0.
pub const FUGITIVE: PlayerId = PlayerId(0);

/// Rules of the chase game.
#[derive(Clone, Debug)]
pub struct ChaseRules {
    board: Board,
    max_rounds: u32,
}

impl ChaseRules {
    /// Rules over `board`; the fugitive wins once `turn` reaches `max_rounds`.
    pub fn new(board: Board, max_rounds: u32) -> Self {
        Self { board, max_rounds }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    #[must_use]
    pub fn is_fugitive(player: PlayerId) -> bool {
        player == FUGITIVE
    }

    /// Who won, once the victory flag is set.
    ///
    /// Detectives win together if one of them stands on the fugitive's
    /// station, or if the fugitive is left without a move before the round
    /// limit. The fugitive wins on the round limit or once no detective can
    /// move.
    #[must_use]
    pub fn outcome(&self, state: &GameState) -> Option<GameResult> {
        if !state.victory_flag() {
            return None;
        }
        let detectives = || GameResult::Winners(state.player_ids().filter(|&p| !Self::is_fugitive(p)).collect());
        if self.captured(state) {
            Some(detectives())
        } else if state.turn() >= self.max_rounds {
            Some(GameResult::Winner(FUGITIVE))
        } else if !self.can_move(state, FUGITIVE) {
            Some(detectives())
        } else {
            Some(GameResult::Winner(FUGITIVE))
        }
    }

    /// Whether `player` would have a legal move if it were their turn.
    fn can_move(&self, state: &GameState, player: PlayerId) -> bool {
        state
            .transition()
            .current_player(player)
            .victory(false)
            .build()
            .is_ok_and(|their_turn| self.has_legal_move(&their_turn))
    }

    /// Finish a successor: pass over detectives who cannot move, then set the
    /// victory flag if the game is decided.
    fn settle(&self, mut state: GameState) -> Result<GameState, StateError> {
        let count = state.player_count();
        loop {
            if self.captured(&state) || state.turn() >= self.max_rounds {
                return state.transition().victory(true).build();
            }
            let current = state.current_player();
            if Self::is_fugitive(current) || self.can_move(&state, current) {
                break;
            }
            log::debug!("{} has no legal move and is passed over", current);
            let next = current.next(count);
            let turn = if next == FUGITIVE { state.turn() + 1 } else { state.turn() };
            state = state.transition().current_player(next).turn(turn).build()?;
        }

        let trapped = Self::is_fugitive(state.current_player()) && !self.can_move(&state, FUGITIVE);
        let detectives_stuck = state
            .player_ids()
            .filter(|&p| !Self::is_fugitive(p))
            .all(|p| !self.can_move(&state, p));
        if trapped || detectives_stuck {
            return state.transition().victory(true).build();
        }
        Ok(state)
    }

    fn captured(&self, state: &GameState) -> bool {
        match state.location(FUGITIVE) {
            Some(hideout) => state.players_at(hideout).any(|p| !Self::is_fugitive(p)),
            None => false,
        }
    }

    /// Whether a `ticket` may be used on a route of `route_kind`.
    fn rides(ticket: TransportType, route_kind: TransportType) -> bool {
        match ticket {
            TransportType::Black | TransportType::Double => true,
            other => other == route_kind,
        }
    }

    fn check(&self, state: &GameState, mv: &Move) -> Result<(), IllegalMoveError> {
        let reject = |reason: String| Err(IllegalMoveError::new(*mv, reason));
        let player = mv.player();
        let ticket = mv.transport();

        if state.victory_flag() {
            return reject("the game is over".to_string());
        }
        if player != state.current_player() {
            return reject(format!("it is {}'s turn", state.current_player()));
        }
        if state.location(player) != Some(mv.from_station()) {
            return reject(format!("{} is not at {}", player, mv.from_station()));
        }
        if ticket == TransportType::Double && !Self::is_fugitive(player) {
            return reject("only the fugitive may play a double move".to_string());
        }
        if state.cards(player).map_or(0, |c| c.count(ticket)) == 0 {
            return reject(format!("no {} tickets left", ticket));
        }

        let routed = self
            .board
            .routes_from(mv.from_station())
            .iter()
            .any(|r| r.to == mv.to_station() && Self::rides(ticket, r.kind));
        if !routed {
            return reject(format!(
                "no route from {} to {} for a {} ticket",
                mv.from_station(),
                mv.to_station(),
                ticket
            ));
        }

        let blocked = state
            .players_at(mv.to_station())
            .any(|other| other != player && !Self::is_fugitive(other));
        if blocked {
            return reject(format!("{} is occupied by a detective", mv.to_station()));
        }

        Ok(())
    }
}

impl RulesEngine for ChaseRules {
    fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, IllegalMoveError> {
        self.check(state, mv)?;

        let player = mv.player();
        let ticket = mv.transport();
        let spent = state
            .cards(player)
            .and_then(|cards| cards.spend(ticket))
            .ok_or_else(|| IllegalMoveError::new(*mv, format!("no {} tickets left", ticket)))?;

        let mut next = state.transition().location(player, mv.to_station()).cards(player, spent);

        // Detective tickets go to the fugitive.
        if !Self::is_fugitive(player) {
            if let Some(fugitive_cards) = state.cards(FUGITIVE) {
                next = next.cards(FUGITIVE, fugitive_cards.with_added(ticket, 1));
            }
        }

        let next_player = if ticket == TransportType::Double {
            player
        } else {
            player.next(state.player_count())
        };
        let round_complete = next_player == FUGITIVE && ticket != TransportType::Double;
        let turn = if round_complete { state.turn() + 1 } else { state.turn() };

        next.turn(turn)
            .current_player(next_player)
            .build()
            .and_then(|moved| self.settle(moved))
            .map_err(|e| IllegalMoveError::new(*mv, e.to_string()))
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        if state.victory_flag() {
            return Vec::new();
        }
        let player = state.current_player();
        let Some(from) = state.location(player) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        for route in self.board.routes_from(from) {
            for ticket in TransportType::ALL {
                if !Self::rides(ticket, route.kind) {
                    continue;
                }
                let mv = Move::new(player, from, route.to, ticket);
                if !moves.contains(&mv) && self.check(state, &mv).is_ok() {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    fn has_legal_move(&self, state: &GameState) -> bool {
        !self.legal_moves(state).is_empty()
    }
}

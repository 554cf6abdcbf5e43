//! The turn driver.
//!
//! ## Turn sequence
//!
//! 1. Read `current_player` from the current state
//! 2. Invoke that player's agent
//! 3. Hand move + state to the rules collaborator
//! 4. Replace the current state with the successor
//!
//! Steps 2 and 3 may fail; either way nothing changes. Turn order and victory
//! belong to the rules collaborator and show up in the successor state.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::error::EngineError;
use crate::agent::{Agent, AgentKind, ForeignCallable};
use crate::core::{GameState, Move, PlayerId};
use crate::rules::RulesEngine;

/// Engine-visible lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    /// Victory flag not set; `step` may be called.
    Running,
    /// Victory flag set; `step` fails.
    Terminal,
}

/// How `run_until_terminal` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The victory flag is set.
    Terminal { steps: usize },
    /// `max_turns` steps were taken without reaching a terminal state.
    TurnLimit { steps: usize },
    /// The current player has no legal move.
    NoLegalMoves { steps: usize },
}

impl RunOutcome {
    /// Steps taken during the run.
    #[must_use]
    pub fn steps(&self) -> usize {
        match *self {
            RunOutcome::Terminal { steps }
            | RunOutcome::TurnLimit { steps }
            | RunOutcome::NoLegalMoves { steps } => steps,
        }
    }
}

/// An applied move, as kept in the engine history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn counter of the state the move was applied to.
    pub turn: u32,
    pub player: PlayerId,
    pub mv: Move,
}

/// Owns one agent per player plus the current state, and drives play.
///
/// ## Example
///
/// ```
/// use yard_engine::core::{GameState, Move, PlayerCards, PlayerId, StationId, TransportType};
/// use yard_engine::engine::Engine;
/// use yard_engine::rules::{IllegalMoveError, RulesEngine};
///
/// struct Anything;
///
/// impl RulesEngine for Anything {
///     fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, IllegalMoveError> {
///         state
///             .transition()
///             .location(mv.player(), mv.to_station())
///             .build()
///             .map_err(|e| IllegalMoveError::new(*mv, e.to_string()))
///     }
/// }
///
/// let initial = GameState::new(0, vec![StationId(1)], vec![PlayerCards::default()], PlayerId(0), false)?;
/// let mut engine = Engine::new(Anything, initial);
/// engine.agent_mut(PlayerId(0)).unwrap().bind_native(|s| {
///     Move::new(PlayerId(0), s.player_locs()[0], StationId(2), TransportType::Taxi)
/// });
///
/// engine.step()?;
/// assert_eq!(engine.current_state().player_locs(), &[StationId(2)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Engine<R: RulesEngine> {
    rules: R,
    agents: Vec<Agent>,
    state: GameState,
    config: EngineConfig,
    history: Vector<MoveRecord>,
}

impl<R: RulesEngine> Engine<R> {
    /// Create an engine with every agent seat unset.
    pub fn new(rules: R, initial: GameState) -> Self {
        let agents = vec![Agent::Unset; initial.player_count()];
        Self {
            rules,
            agents,
            state: initial,
            config: EngineConfig::default(),
            history: Vector::new(),
        }
    }

    /// Create an engine with one agent per player, in player order.
    pub fn with_agents(rules: R, initial: GameState, agents: Vec<Agent>) -> Result<Self, EngineError> {
        if agents.len() != initial.player_count() {
            return Err(EngineError::AgentCountMismatch {
                expected: initial.player_count(),
                actual: agents.len(),
            });
        }
        let mut engine = Self::new(rules, initial);
        engine.agents = agents;
        Ok(engine)
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // === Agents ===

    #[must_use]
    pub fn agent(&self, player: PlayerId) -> Option<&Agent> {
        self.agents.get(player.index())
    }

    pub fn agent_mut(&mut self, player: PlayerId) -> Option<&mut Agent> {
        self.agents.get_mut(player.index())
    }

    /// Seat `agent` for `player`, replacing whatever was there.
    pub fn seat(&mut self, player: PlayerId, agent: Agent) -> Result<(), EngineError> {
        let slot = self
            .agents
            .get_mut(player.index())
            .ok_or(EngineError::NoSuchPlayer { player })?;
        *slot = agent;
        Ok(())
    }

    /// Seat a native function for `player`.
    pub fn bind_native<F>(&mut self, player: PlayerId, f: F) -> Result<(), EngineError>
    where
        F: Fn(&GameState) -> Move + Send + Sync + 'static,
    {
        self.seat(player, Agent::native(f))
    }

    /// Seat a foreign-boundary handle for `player`.
    pub fn bind_foreign<H>(&mut self, player: PlayerId, handle: H) -> Result<(), EngineError>
    where
        H: ForeignCallable + 'static,
    {
        self.seat(player, Agent::foreign(handle))
    }

    /// Players whose seat is still unset.
    pub fn unset_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.kind() == AgentKind::Unset)
            .map(|(i, _)| PlayerId(i as u8))
    }

    // === State ===

    #[must_use]
    pub fn current_state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        if self.state.victory_flag() {
            EngineStatus::Terminal
        } else {
            EngineStatus::Running
        }
    }

    /// Applied moves, oldest first. Empty if history is disabled.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consume the engine, keeping only the current state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    // === Play ===

    /// Play one move.
    ///
    /// Returns the applied move. On any error the current state is left
    /// exactly as it was.
    pub fn step(&mut self) -> Result<Move, EngineError> {
        if self.state.victory_flag() {
            return Err(EngineError::AlreadyTerminal {
                turn: self.state.turn(),
            });
        }

        let player = self.state.current_player();
        let agent = self
            .agents
            .get(player.index())
            .ok_or(EngineError::NoSuchPlayer { player })?;

        log::debug!("turn {}: asking {} ({} agent)", self.state.turn(), player, agent.kind());
        let mv = agent.invoke(&self.state).map_err(|source| {
            log::warn!("agent for {} failed: {}", player, source);
            EngineError::Agent { player, source }
        })?;

        let next = self.rules.apply(&self.state, &mv).map_err(|err| {
            log::warn!("rejected: {}", err);
            EngineError::IllegalMove(err)
        })?;
        self.check_successor(&next)?;

        if self.config.record_history {
            self.history.push_back(MoveRecord {
                turn: self.state.turn(),
                player,
                mv,
            });
        }
        if next.victory_flag() {
            log::info!("game over at turn {} after {}", next.turn(), mv);
        }
        self.state = next;

        Ok(mv)
    }

    /// Step until the game is terminal, `max_turns` steps have been taken, or
    /// (if configured) the current player has no legal move.
    ///
    /// The first error from `step` ends the run and is returned as-is.
    pub fn run_until_terminal(&mut self, max_turns: usize) -> Result<RunOutcome, EngineError> {
        let mut steps = 0;
        while steps < max_turns {
            if self.status() == EngineStatus::Terminal {
                return Ok(RunOutcome::Terminal { steps });
            }
            if self.config.stop_on_no_legal_moves && !self.rules.has_legal_move(&self.state) {
                log::info!("{} has no legal move, stopping", self.state.current_player());
                return Ok(RunOutcome::NoLegalMoves { steps });
            }
            self.step()?;
            steps += 1;
        }

        Ok(match self.status() {
            EngineStatus::Terminal => RunOutcome::Terminal { steps },
            EngineStatus::Running => RunOutcome::TurnLimit { steps },
        })
    }

    /// The successor must seat the same players and must not run the turn
    /// counter backwards.
    fn check_successor(&self, next: &GameState) -> Result<(), EngineError> {
        if next.player_count() != self.state.player_count() {
            return Err(EngineError::InvalidSuccessor {
                reason: format!(
                    "player count changed from {} to {}",
                    self.state.player_count(),
                    next.player_count()
                ),
            });
        }
        if next.turn() < self.state.turn() {
            return Err(EngineError::InvalidSuccessor {
                reason: format!("turn went from {} back to {}", self.state.turn(), next.turn()),
            });
        }
        Ok(())
    }
}

impl<R: RulesEngine> std::fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("agents", &self.agents)
            .field("state", &self.state)
            .field("history_len", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerCards, StationId, TransportType};
    use crate::rules::IllegalMoveError;

    /// Accepts any move of the current player; round robin; never ends.
    struct Permissive;

    impl RulesEngine for Permissive {
        fn apply(&self, state: &GameState, mv: &Move) -> Result<GameState, IllegalMoveError> {
            if mv.player() != state.current_player() {
                return Err(IllegalMoveError::new(*mv, "not your turn"));
            }
            state
                .transition()
                .location(mv.player(), mv.to_station())
                .current_player(mv.player().next(state.player_count()))
                .turn(state.turn() + 1)
                .build()
                .map_err(|e| IllegalMoveError::new(*mv, e.to_string()))
        }

        fn legal_moves(&self, state: &GameState) -> Vec<Move> {
            let p = state.current_player();
            let at = state.location(p).unwrap_or(StationId(0));
            vec![Move::new(p, at, StationId(at.0 + 1), TransportType::Taxi)]
        }
    }

    /// Hands back a state with a different player count; claims nobody can move.
    struct Shrinking;

    impl RulesEngine for Shrinking {
        fn apply(&self, _state: &GameState, mv: &Move) -> Result<GameState, IllegalMoveError> {
            GameState::new(0, vec![StationId(1)], vec![PlayerCards::default()], PlayerId(0), false)
                .map_err(|e| IllegalMoveError::new(*mv, e.to_string()))
        }

        fn has_legal_move(&self, _state: &GameState) -> bool {
            false
        }
    }

    fn initial() -> GameState {
        GameState::new(
            0,
            vec![StationId(1), StationId(50)],
            vec![PlayerCards::new(2, 0, 0, 0, 0); 2],
            PlayerId(0),
            false,
        )
        .unwrap()
    }

    fn forward(state: &GameState) -> Move {
        let p = state.current_player();
        let at = state.location(p).unwrap();
        Move::new(p, at, StationId(at.0 + 1), TransportType::Taxi)
    }

    #[test]
    fn test_new_engine_has_unset_seats() {
        let engine = Engine::new(Permissive, initial());

        assert_eq!(engine.unset_players().collect::<Vec<_>>(), vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(engine.status(), EngineStatus::Running);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_with_agents_checks_count() {
        let err = Engine::with_agents(Permissive, initial(), vec![Agent::native(forward)]).unwrap_err();

        assert_eq!(err, EngineError::AgentCountMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_seat_out_of_range() {
        let mut engine = Engine::new(Permissive, initial());

        assert_eq!(
            engine.seat(PlayerId(5), Agent::native(forward)),
            Err(EngineError::NoSuchPlayer { player: PlayerId(5) })
        );
    }

    #[test]
    fn test_step_records_history() {
        let agents = vec![Agent::native(forward), Agent::native(forward)];
        let mut engine = Engine::with_agents(Permissive, initial(), agents).unwrap();

        let first = engine.step().unwrap();
        let second = engine.step().unwrap();

        let history: Vec<_> = engine.history().iter().copied().collect();
        assert_eq!(
            history,
            vec![
                MoveRecord { turn: 0, player: PlayerId(0), mv: first },
                MoveRecord { turn: 1, player: PlayerId(1), mv: second },
            ]
        );
    }

    #[test]
    fn test_history_can_be_disabled() {
        let agents = vec![Agent::native(forward), Agent::native(forward)];
        let mut engine = Engine::with_agents(Permissive, initial(), agents)
            .unwrap()
            .with_config(EngineConfig::new().with_history(false));

        engine.step().unwrap();
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_unset_agent_leaves_state() {
        let mut engine = Engine::new(Permissive, initial());

        let err = engine.step().unwrap_err();
        assert_eq!(err.agent_error(), Some(&crate::agent::AgentError::NotConfigured));
        assert_eq!(engine.current_state(), &initial());
    }

    #[test]
    fn test_invalid_successor_rejected() {
        let agents = vec![Agent::native(forward), Agent::native(forward)];
        let mut engine = Engine::with_agents(Shrinking, initial(), agents).unwrap();

        assert!(matches!(engine.step(), Err(EngineError::InvalidSuccessor { .. })));
        assert_eq!(engine.current_state(), &initial());
    }

    #[test]
    fn test_run_hits_turn_limit() {
        let agents = vec![Agent::native(forward), Agent::native(forward)];
        let mut engine = Engine::with_agents(Permissive, initial(), agents).unwrap();

        assert_eq!(engine.run_until_terminal(6).unwrap(), RunOutcome::TurnLimit { steps: 6 });
        assert_eq!(engine.current_state().turn(), 6);
        assert_eq!(engine.current_state().player_locs(), &[StationId(4), StationId(53)]);
    }

    #[test]
    fn test_run_stops_without_legal_moves() {
        let agents = vec![Agent::native(forward), Agent::native(forward)];
        let mut engine = Engine::with_agents(Shrinking, initial(), agents).unwrap();

        assert_eq!(engine.run_until_terminal(10).unwrap(), RunOutcome::NoLegalMoves { steps: 0 });
    }

    #[test]
    fn test_run_without_move_check_keeps_asking() {
        let agents = vec![Agent::native(forward), Agent::native(forward)];
        let mut engine = Engine::with_agents(Shrinking, initial(), agents)
            .unwrap()
            .with_config(EngineConfig::default().with_stop_on_no_legal_moves(false));

        // The check is off, so the agent is asked and the bad successor surfaces.
        let err = engine.run_until_terminal(10).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSuccessor { .. }));
    }

    #[test]
    fn test_run_outcome_steps() {
        assert_eq!(RunOutcome::Terminal { steps: 3 }.steps(), 3);
        assert_eq!(RunOutcome::TurnLimit { steps: 0 }.steps(), 0);
    }
}

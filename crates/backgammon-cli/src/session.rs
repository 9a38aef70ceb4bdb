//! One local game session.

use backgammon_core::{GameAction, GameError, GameState, Move};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::command::ActionRequest;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Engine invariant violated: {0}")]
    Engine(#[from] GameError),
}

/// State as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub session_id: Uuid,
    pub state: &'a GameState,
}

/// A game plus the dice generator that drives it.
pub struct Session {
    pub id: Uuid,
    state: GameState,
    rng: StdRng,
}

impl Session {
    /// Start a session; a seed makes every roll reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let id = Uuid::new_v4();
        info!(session = %id, "Session started");

        Self {
            id,
            state: GameState::new(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            session_id: self.id,
            state: &self.state,
        }
    }

    /// Turn a typed request into an engine action.
    ///
    /// A typed move takes its hit flag from the matching legal move. Moves
    /// with no match are passed through unflagged and the engine ignores them.
    pub fn resolve(&self, request: ActionRequest) -> GameAction {
        match request {
            ActionRequest::Roll => GameAction::Roll,
            ActionRequest::Select(origin) => GameAction::Select(origin),
            ActionRequest::Move { from, to, die } => {
                let typed = Move::new(from, to, die, false);
                let mv = self
                    .state
                    .legal_moves
                    .iter()
                    .find(|legal| legal.same_play(&typed))
                    .copied()
                    .unwrap_or_else(|| {
                        warn!(session = %self.id, mv = %typed, "Move is not in the legal set");
                        typed
                    });
                GameAction::Move(mv)
            }
            ActionRequest::EndTurn => GameAction::EndTurn,
            ActionRequest::Undo => GameAction::Undo,
            ActionRequest::NewGame => GameAction::NewGame,
            ActionRequest::ClearMessage => GameAction::ClearMessage,
        }
    }

    /// Apply a request. Returns whether the state changed.
    pub fn dispatch(&mut self, request: ActionRequest) -> Result<bool, SessionError> {
        let action = self.resolve(request);
        debug!(session = %self.id, ?action, "Applying action");

        let next = self.state.apply_action_with_rng(action.clone(), &mut self.rng)?;
        let changed = next != self.state;
        self.state = next;

        if action == GameAction::NewGame {
            self.id = Uuid::new_v4();
            info!(session = %self.id, "New game started");
        }
        if let Some(winner) = self.state.get_winner().filter(|_| changed) {
            info!(session = %self.id, %winner, "Game over");
        }

        Ok(changed)
    }
}

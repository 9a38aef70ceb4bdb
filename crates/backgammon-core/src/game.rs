//! Core game state machine.
//!
//! This module contains the `GameState` struct and the turn transitions.
//! Every transition takes `&self` and returns a new state; the input is never
//! mutated.

use crate::actions::GameAction;
use crate::board::{Board, BoardError, Origin, CHECKERS_PER_PLAYER};
use crate::dice::{Dice, DiceError};
use crate::forced;
use crate::moves::Move;
use crate::player::Player;
use crate::position::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Player who rolls first in a new game
const STARTING_PLAYER: Player = Player::White;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the current player to roll
    Rolling,
    /// Dice rolled, at least one move to play
    Moving,
    /// Someone has borne off all fifteen checkers
    GameOver,
}

/// Internal invariant violations.
///
/// Legitimate input never produces these: rule outcomes such as a blocked
/// move or a skipped turn are plain state, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Dice invariant violated: {0}")]
    Dice(#[from] DiceError),

    #[error("Board invariant violated: {0}")]
    Board(#[from] BoardError),

    #[error("Remaining dice {remaining:?} are not drawn from roll {values:?}")]
    InconsistentDice {
        values: Option<(u8, u8)>,
        remaining: Vec<u8>,
    },

    #[error("Selection {0} held outside the moving phase")]
    StraySelection(Origin),

    #[error("Selection {0} does not match the offered moves")]
    UnmovableSelection(Origin),

    #[error("Game over without a player bearing off all checkers")]
    UnearnedGameOver,
}

/// Board and dice captured when a roll yields a playable turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub board: Board,
    pub dice: Dice,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Board, dice and the player to move
    pub position: Position,
    /// Current game phase
    pub phase: GamePhase,
    /// Set once the game is over
    pub winner: Option<Player>,
    /// Origin the player has picked, if any
    pub selected: Option<Origin>,
    /// Moves currently offered (all required moves, or those from `selected`)
    pub legal_moves: Vec<Move>,
    /// Moves played so far this turn
    pub turn_moves: Vec<Move>,
    /// Advisory text for the player
    pub message: Option<String>,
    /// Start-of-turn position for undo
    pub snapshot: Option<TurnSnapshot>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a new game in the standard starting position
    pub fn new() -> Self {
        Self::from_board(Board::standard(), STARTING_PLAYER)
    }

    /// Start from an arbitrary layout with `player` about to roll
    pub fn from_board(board: Board, player: Player) -> Self {
        Self {
            position: Position::new(board, Dice::new(), player),
            phase: GamePhase::Rolling,
            winner: None,
            selected: None,
            legal_moves: Vec::new(),
            turn_moves: Vec::new(),
            message: None,
            snapshot: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn dice(&self) -> &Dice {
        &self.position.dice
    }

    pub fn current_player(&self) -> Player {
        self.position.player
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Get the winner if the game is finished
    pub fn get_winner(&self) -> Option<Player> {
        self.winner
    }

    /// Whether `Undo` would currently do anything
    pub fn can_undo(&self) -> bool {
        self.phase == GamePhase::Moving && !self.turn_moves.is_empty() && self.snapshot.is_some()
    }

    /// Moves the forced-move rules allow right now, ignoring any selection
    pub fn required_moves(&self) -> Result<Vec<Move>, GameError> {
        forced::required_moves(&self.position)
    }

    /// Get all actions that would currently change the state
    pub fn valid_actions(&self) -> Result<Vec<GameAction>, GameError> {
        let mut actions = Vec::new();

        match self.phase {
            GamePhase::Rolling => {
                actions.push(GameAction::Roll);
            }
            GamePhase::Moving => {
                let mut origins: Vec<Origin> = Vec::new();
                for mv in self.required_moves()? {
                    if !origins.contains(&mv.from) {
                        origins.push(mv.from);
                    }
                }
                actions.extend(origins.into_iter().map(GameAction::Select));
                actions.extend(self.legal_moves.iter().copied().map(GameAction::Move));
                actions.push(GameAction::EndTurn);
                if self.can_undo() {
                    actions.push(GameAction::Undo);
                }
            }
            GamePhase::GameOver => {}
        }

        actions.push(GameAction::NewGame);
        if self.message.is_some() {
            actions.push(GameAction::ClearMessage);
        }

        Ok(actions)
    }

    /// Apply an action, rolling with the thread-local generator.
    ///
    /// Actions that do not fit the current phase return the state unchanged.
    /// An `Err` means an internal invariant broke and the session should stop.
    pub fn apply_action(&self, action: GameAction) -> Result<GameState, GameError> {
        self.apply_action_with_rng(action, &mut rand::thread_rng())
    }

    /// Apply an action using `rng` for any dice roll
    pub fn apply_action_with_rng<R: Rng>(
        &self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<GameState, GameError> {
        let next = match action {
            GameAction::Roll => {
                if self.phase != GamePhase::Rolling {
                    trace!(phase = ?self.phase, "roll ignored outside rolling phase");
                    return Ok(self.clone());
                }
                self.roll(Dice::roll(rng))?
            }
            GameAction::Select(origin) => self.select(origin)?,
            GameAction::Move(mv) => self.make_move(mv)?,
            GameAction::EndTurn => self.end_turn(),
            GameAction::Undo => self.undo()?,
            GameAction::NewGame => {
                debug!("new game");
                GameState::new()
            }
            GameAction::ClearMessage => GameState {
                message: None,
                ..self.clone()
            },
        };

        next.verify_invariants()?;
        Ok(next)
    }

    /// The roll transition with predetermined dice, for replays and tests
    pub fn apply_roll(&self, dice: Dice) -> Result<GameState, GameError> {
        if self.phase != GamePhase::Rolling {
            return Ok(self.clone());
        }
        let next = self.roll(dice)?;
        next.verify_invariants()?;
        Ok(next)
    }

    /// Check conservation, exclusivity, dice-pool and phase invariants
    pub fn verify_invariants(&self) -> Result<(), GameError> {
        self.position.board.validate()?;

        let dice = &self.position.dice;
        if !dice.is_consistent() {
            return Err(GameError::InconsistentDice {
                values: dice.values,
                remaining: dice.remaining.clone(),
            });
        }

        if let Some(origin) = self.selected {
            if self.phase != GamePhase::Moving {
                return Err(GameError::StraySelection(origin));
            }
            // a selection narrows the offered set to moves from that origin
            if self.legal_moves.is_empty() || self.legal_moves.iter().any(|m| m.from != origin) {
                return Err(GameError::UnmovableSelection(origin));
            }
        }

        if self.phase == GamePhase::GameOver {
            let earned = self
                .winner
                .is_some_and(|w| self.position.board.borne_off[w] == CHECKERS_PER_PLAYER);
            if !earned {
                return Err(GameError::UnearnedGameOver);
            }
        }

        Ok(())
    }

    // ==================== Transitions ====================

    fn roll(&self, dice: Dice) -> Result<GameState, GameError> {
        let player = self.current_player();
        let mut next = self.clone();
        next.position.dice = dice;

        let required = next.required_moves()?;
        if required.is_empty() {
            let rolled = match next.position.dice.values {
                Some((d1, d2)) => format!("{}-{}", d1, d2),
                None => "nothing".to_string(),
            };
            debug!(%player, %rolled, "no legal moves, turn skipped");
            next.hand_over();
            next.message = Some(format!(
                "{} rolled {} and has no valid moves - turn skipped",
                player, rolled
            ));
            return Ok(next);
        }

        debug!(
            %player,
            dice = ?next.position.dice.values,
            moves = required.len(),
            "dice rolled"
        );
        next.phase = GamePhase::Moving;
        next.snapshot = Some(TurnSnapshot {
            board: next.position.board.clone(),
            dice: next.position.dice.clone(),
        });
        next.legal_moves = required;
        next.message = None;
        Ok(next)
    }

    fn select(&self, origin: Origin) -> Result<GameState, GameError> {
        if self.phase != GamePhase::Moving {
            return Ok(self.clone());
        }

        if self.selected == Some(origin) {
            return Ok(GameState {
                selected: None,
                legal_moves: self.required_moves()?,
                ..self.clone()
            });
        }

        let board = &self.position.board;
        let player = self.current_player();
        let selectable = match origin {
            Origin::Bar => board.bar[player] > 0,
            Origin::Point(n) => {
                board.bar[player] == 0 && board.get_point(n).is_some_and(|p| p.is_owned_by(player))
            }
        };
        if !selectable {
            trace!(%origin, "selection rejected");
            return Ok(self.clone());
        }

        let from_here: Vec<Move> = self
            .required_moves()?
            .into_iter()
            .filter(|m| m.from == origin)
            .collect();
        if from_here.is_empty() {
            trace!(%origin, "selection has no required moves");
            return Ok(self.clone());
        }

        Ok(GameState {
            selected: Some(origin),
            legal_moves: from_here,
            ..self.clone()
        })
    }

    fn make_move(&self, mv: Move) -> Result<GameState, GameError> {
        if self.phase != GamePhase::Moving {
            return Ok(self.clone());
        }
        if !self.legal_moves.contains(&mv) {
            trace!(%mv, "move not in the offered set");
            return Ok(self.clone());
        }

        let player = self.current_player();
        let mut next = self.clone();
        next.position = self.position.play(&mv)?;
        next.turn_moves.push(mv);
        next.selected = None;
        debug!(%player, %mv, "move played");

        if next.position.board.borne_off[player] == CHECKERS_PER_PLAYER {
            debug!(%player, "game over");
            next.phase = GamePhase::GameOver;
            next.winner = Some(player);
            next.legal_moves.clear();
            next.snapshot = None;
            return Ok(next);
        }

        let required = next.required_moves()?;
        let dice_left = !next.position.dice.is_exhausted();
        if !dice_left || required.is_empty() {
            next.hand_over();
            next.message = dice_left.then(|| format!("{} has no more valid moves", player));
            return Ok(next);
        }

        next.legal_moves = required;
        Ok(next)
    }

    fn end_turn(&self) -> GameState {
        if self.phase != GamePhase::Moving {
            return self.clone();
        }
        let mut next = self.clone();
        next.hand_over();
        next
    }

    fn undo(&self) -> Result<GameState, GameError> {
        if !self.can_undo() {
            return Ok(self.clone());
        }
        let Some(snapshot) = &self.snapshot else {
            return Ok(self.clone());
        };

        let mut next = self.clone();
        next.position.board = snapshot.board.clone();
        next.position.dice = snapshot.dice.clone();
        next.turn_moves.clear();
        next.selected = None;
        next.snapshot = None;
        next.legal_moves = next.required_moves()?;
        debug!(player = %self.current_player(), "turn undone");
        Ok(next)
    }

    /// Pass the dice to the opponent and clear all per-turn state
    fn hand_over(&mut self) {
        let player = self.current_player();
        self.position.player = player.opponent();
        self.position.dice = Dice::new();
        self.phase = GamePhase::Rolling;
        self.selected = None;
        self.legal_moves.clear();
        self.turn_moves.clear();
        self.snapshot = None;
        debug!(from = %player, to = %self.position.player, "turn ended");
    }
}

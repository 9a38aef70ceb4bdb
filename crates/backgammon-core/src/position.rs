//! The search node shared by the validator, calculator and resolver.

use crate::board::Board;
use crate::dice::Dice;
use crate::game::GameError;
use crate::moves::Move;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Board, dice and side to move: everything move legality depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub dice: Dice,
    /// Player whose checkers are being moved
    pub player: Player,
}

impl Position {
    pub fn new(board: Board, dice: Dice, player: Player) -> Self {
        Self {
            board,
            dice,
            player,
        }
    }

    /// Successor position after playing `mv`: checker relocated, die consumed.
    ///
    /// `self` is left untouched.
    pub fn play(&self, mv: &Move) -> Result<Self, GameError> {
        let mut board = self.board.clone();
        board.apply_move(self.player, mv)?;
        let dice = self.dice.consume(mv.die)?;

        Ok(Self {
            board,
            dice,
            player: self.player,
        })
    }
}

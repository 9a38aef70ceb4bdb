//! Actions a presentation layer can submit to the engine.
//!
//! Each action is applied whole by [`crate::GameState::apply_action`]; one
//! action must finish before the next is submitted.

use crate::board::Origin;
use crate::moves::Move;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Turn Actions ====================
    /// Roll the dice (only while rolling)
    Roll,
    /// Pick the origin to move from, or deselect it when picked again
    Select(Origin),
    /// Play one of the currently exposed legal moves
    Move(Move),
    /// Hand the dice to the other player
    EndTurn,
    /// Restore the position from the start of this turn
    Undo,

    // ==================== Session ====================
    /// Discard the game and start over from the opening layout
    NewGame,
    /// Dismiss the advisory message
    ClearMessage,
}

//! Player identities and per-player geometry.
//!
//! This module contains:
//! - The two player identities and their movement direction
//! - Home board and bar-entry ranges
//! - `PlayerCounts` for per-player tallies (bar, borne off)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, RangeInclusive};

/// One of the two sides.
///
/// White moves from point 24 down to point 1 and bears off below point 1.
/// Black moves from point 1 up to point 24 and bears off above point 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Both players, white first
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// The other side
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Sign applied to a die value when moving (-1 for white, +1 for black)
    pub fn direction(self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// The six points this player must gather on before bearing off
    pub fn home_board(self) -> RangeInclusive<u8> {
        match self {
            Player::White => 1..=6,
            Player::Black => 19..=24,
        }
    }

    /// Whether a point lies in this player's home board
    pub fn is_home(self, point: u8) -> bool {
        self.home_board().contains(&point)
    }

    /// Point a checker enters on from the bar with the given die.
    ///
    /// White enters in black's home board (die 1 = point 24), black enters
    /// in white's home board (die 1 = point 1).
    pub fn bar_entry_point(self, die: u8) -> u8 {
        match self {
            Player::White => 25 - die,
            Player::Black => die,
        }
    }

    /// Pips a checker on `point` still needs to travel to be borne off
    pub fn distance_to_off(self, point: u8) -> u8 {
        match self {
            Player::White => point,
            Player::Black => 25 - point,
        }
    }

    /// Lowercase display name
    pub fn name(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-negative tally kept separately for each player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCounts {
    pub white: u8,
    pub black: u8,
}

impl PlayerCounts {
    /// Both tallies at zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl Index<Player> for PlayerCounts {
    type Output = u8;

    fn index(&self, player: Player) -> &u8 {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }
}

impl IndexMut<Player> for PlayerCounts {
    fn index_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }
}

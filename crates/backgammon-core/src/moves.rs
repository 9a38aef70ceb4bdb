//! Candidate move generation.
//!
//! Produces single-step moves (one checker, one die) for the side to move.
//! Forced-move filtering happens on top of this in [`crate::forced`].

use crate::board::{Destination, Origin, NUM_POINTS};
use crate::player::Player;
use crate::position::Position;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single checker movement consuming one die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Origin,
    pub to: Destination,
    /// Die value this move consumes
    pub die: u8,
    /// Whether the move lands on and hits a lone opposing checker
    pub is_hit: bool,
}

impl Move {
    pub fn new(from: Origin, to: Destination, die: u8, is_hit: bool) -> Self {
        Self {
            from,
            to,
            die,
            is_hit,
        }
    }

    /// Same origin, destination and die, ignoring the hit flag
    pub fn same_play(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.die == other.die
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)?;
        if self.is_hit {
            f.write_str("*")?;
        }
        write!(f, " ({})", self.die)
    }
}

/// Where a checker on `from` ends up with `die`.
///
/// Moving past the last point becomes [`Destination::Off`]; whether that is
/// actually allowed is for [`rules::is_legal`] to decide.
pub fn destination(from: Origin, die: u8, player: Player) -> Option<Destination> {
    match from {
        Origin::Bar => Some(Destination::Point(player.bar_entry_point(die))),
        Origin::Point(n) => {
            if !(1..=NUM_POINTS).contains(&n) {
                return None;
            }
            let to = i16::from(n) + i16::from(player.direction()) * i16::from(die);
            if (1..=i16::from(NUM_POINTS)).contains(&to) {
                Some(Destination::Point(to as u8))
            } else {
                Some(Destination::Off)
            }
        }
    }
}

/// All legal single-step moves from one origin.
///
/// One move per distinct destination: under doubles the first die that
/// reaches a destination wins, so a lone checker never shows duplicates.
pub fn moves_from(position: &Position, from: Origin) -> Vec<Move> {
    let Position { board, player, .. } = position;
    let player = *player;

    match from {
        Origin::Bar => {
            if board.bar[player] == 0 {
                return Vec::new();
            }
        }
        Origin::Point(n) => {
            if board.bar[player] > 0 {
                return Vec::new();
            }
            if !board.get_point(n).is_some_and(|p| p.is_owned_by(player)) {
                return Vec::new();
            }
        }
    }

    let mut moves: Vec<Move> = Vec::new();
    for die in position.dice.distinct_remaining() {
        let Some(to) = destination(from, die, player) else {
            continue;
        };
        if moves.iter().any(|m| m.to == to) {
            continue;
        }
        if rules::is_legal(position, from, to, die) {
            moves.push(Move::new(from, to, die, rules::is_hit(board, player, to)));
        }
    }

    moves
}

/// All legal single-step moves for the side to move.
///
/// Bar checkers come first: while any are waiting only bar entries are
/// returned.
pub fn all_moves(position: &Position) -> Vec<Move> {
    let player = position.player;
    if position.board.bar[player] > 0 {
        return moves_from(position, Origin::Bar);
    }

    position
        .board
        .owned_points(player)
        .flat_map(|n| moves_from(position, Origin::Point(n)))
        .collect()
}

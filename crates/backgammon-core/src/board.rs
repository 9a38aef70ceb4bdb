//! Board representation: the 24 points, the bar and the borne-off trays.
//!
//! This module contains:
//! - `Point` occupancy (owner plus checker count)
//! - `Origin` / `Destination` addressing, including the bar and "off"
//! - The `Board` itself with the standard starting layout
//! - Checker relocation used by both real moves and lookahead

use crate::moves::Move;
use crate::player::{Player, PlayerCounts};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of points on the board
pub const NUM_POINTS: u8 = 24;

/// Checkers each player owns for the whole game
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// Standard starting layout, listed from white's side.
/// Black mirrors every entry at `25 - point`.
const INITIAL_SETUP: [(u8, u8); 4] = [(24, 2), (13, 5), (8, 3), (6, 5)];

/// Errors raised when a board mutation would break an occupancy invariant.
///
/// None of these can follow from a move the engine itself generated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Point {0} is outside 1-24")]
    PointOutOfRange(u8),

    #[error("No {player} checker at {origin}")]
    EmptyOrigin { origin: Origin, player: Player },

    #[error("Point {point} holds checkers of both players")]
    MixedOwnership { point: u8 },

    #[error("Point {point} is not a lone opposing checker and cannot be hit")]
    InvalidHit { point: u8 },

    #[error("Point {point} has an owner mismatch for count {count}")]
    OwnerMismatch { point: u8, count: u8 },

    #[error("{player} has {found} checkers in play, expected 15")]
    CheckerCountMismatch { player: Player, found: u32 },
}

/// Occupancy of a single point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Owner of the checkers here, `None` when empty
    pub owner: Option<Player>,
    /// Number of checkers stacked here
    pub count: u8,
}

impl Point {
    /// An unoccupied point
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a point holding `count` checkers of `player`
    pub fn occupied(player: Player, count: u8) -> Self {
        if count == 0 {
            Self::empty()
        } else {
            Self {
                owner: Some(player),
                count,
            }
        }
    }

    /// Whether `player` has at least one checker here
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player) && self.count > 0
    }

    /// Exactly one checker of `player` (a blot)
    pub fn is_blot_of(&self, player: Player) -> bool {
        self.owner == Some(player) && self.count == 1
    }

    /// Two or more checkers of `player` (a made point)
    pub fn is_made_by(&self, player: Player) -> bool {
        self.owner == Some(player) && self.count >= 2
    }
}

/// Where a checker moves from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Re-entry from the bar
    Bar,
    /// A board point, 1-24
    Point(u8),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Bar => f.write_str("bar"),
            Origin::Point(n) => write!(f, "{}", n),
        }
    }
}

/// Where a checker moves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A board point, 1-24
    Point(u8),
    /// Borne off
    Off,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Point(n) => write!(f, "{}", n),
            Destination::Off => f.write_str("off"),
        }
    }
}

/// The full checker layout: points, bar and borne-off trays.
///
/// Fixed-size and cheap to clone, so the forced-move search copies it freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Index 0 is point 1
    points: [Point; NUM_POINTS as usize],
    /// Checkers waiting to re-enter
    pub bar: PlayerCounts,
    /// Checkers already removed from play
    pub borne_off: PlayerCounts,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no checkers anywhere
    pub fn empty() -> Self {
        Self {
            points: [Point::empty(); NUM_POINTS as usize],
            bar: PlayerCounts::new(),
            borne_off: PlayerCounts::new(),
        }
    }

    /// The standard backgammon starting position
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (point, count) in INITIAL_SETUP {
            board.points[point as usize - 1] = Point::occupied(Player::White, count);
            board.points[(25 - point) as usize - 1] = Point::occupied(Player::Black, count);
        }
        board
    }

    /// Builder: put `count` checkers of `player` on `point`, replacing what was there.
    ///
    /// # Panics
    ///
    /// Panics if `point` is not in 1-24.
    pub fn with_checkers(mut self, point: u8, player: Player, count: u8) -> Self {
        assert!(
            (1..=NUM_POINTS).contains(&point),
            "point {} out of range",
            point
        );
        self.points[point as usize - 1] = Point::occupied(player, count);
        self
    }

    /// Builder: set the number of `player` checkers on the bar
    pub fn with_bar(mut self, player: Player, count: u8) -> Self {
        self.bar[player] = count;
        self
    }

    /// Builder: treat every checker not on a point or the bar as borne off.
    ///
    /// Handy for endgame positions where only a few checkers remain.
    pub fn with_remaining_borne_off(mut self) -> Self {
        for player in Player::ALL {
            let in_play = self.checkers_on_points(player) + u32::from(self.bar[player]);
            self.borne_off[player] =
                u32::from(CHECKERS_PER_PLAYER).saturating_sub(in_play) as u8;
        }
        self
    }

    /// Get a point by its 1-based number
    pub fn get_point(&self, point: u8) -> Option<&Point> {
        if point == 0 {
            return None;
        }
        self.points.get(point as usize - 1)
    }

    /// All points paired with their 1-based number
    pub fn points(&self) -> impl Iterator<Item = (u8, &Point)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as u8 + 1, p))
    }

    /// Numbers of the points holding at least one `player` checker, ascending
    pub fn owned_points(&self, player: Player) -> impl Iterator<Item = u8> + '_ {
        self.points()
            .filter(move |(_, p)| p.is_owned_by(player))
            .map(|(n, _)| n)
    }

    /// Whether `point` holds two or more opposing checkers for `player`
    pub fn is_blocked_for(&self, point: u8, player: Player) -> bool {
        self.get_point(point)
            .is_some_and(|p| p.is_made_by(player.opponent()))
    }

    /// Whether landing on `point` would hit a lone opposing checker
    pub fn is_hit_for(&self, point: u8, player: Player) -> bool {
        self.get_point(point)
            .is_some_and(|p| p.is_blot_of(player.opponent()))
    }

    /// Checkers `player` has standing on points
    pub fn checkers_on_points(&self, player: Player) -> u32 {
        self.points
            .iter()
            .filter(|p| p.is_owned_by(player))
            .map(|p| u32::from(p.count))
            .sum()
    }

    /// Points + bar + borne off; always 15 in a consistent board
    pub fn checker_total(&self, player: Player) -> u32 {
        self.checkers_on_points(player)
            + u32::from(self.bar[player])
            + u32::from(self.borne_off[player])
    }

    /// Total pips `player` needs to bear everything off. Bar checkers count 25.
    pub fn pip_count(&self, player: Player) -> u32 {
        let on_points: u32 = self
            .points()
            .filter(|(_, p)| p.is_owned_by(player))
            .map(|(n, p)| u32::from(player.distance_to_off(n)) * u32::from(p.count))
            .sum();
        on_points + 25 * u32::from(self.bar[player])
    }

    /// Relocate one checker of `player` according to `mv`.
    ///
    /// The origin loses a checker (clearing its owner at zero). The
    /// destination either increments the borne-off tray or takes the checker,
    /// first sending a hit blot to the opponent's bar.
    pub fn apply_move(&mut self, player: Player, mv: &Move) -> Result<(), BoardError> {
        self.remove_checker(mv.from, player)?;

        match mv.to {
            Destination::Off => {
                self.borne_off[player] += 1;
            }
            Destination::Point(n) => {
                let opponent = player.opponent();
                let slot = self.slot_mut(n)?;
                if mv.is_hit {
                    if !slot.is_blot_of(opponent) {
                        return Err(BoardError::InvalidHit { point: n });
                    }
                    *slot = Point::empty();
                    self.bar[opponent] += 1;
                } else if slot.is_owned_by(opponent) {
                    return Err(BoardError::MixedOwnership { point: n });
                }

                let slot = self.slot_mut(n)?;
                slot.owner = Some(player);
                slot.count += 1;
            }
        }

        Ok(())
    }

    /// Check occupancy consistency and checker conservation
    pub fn validate(&self) -> Result<(), BoardError> {
        for (n, p) in self.points() {
            if (p.count > 0) != p.owner.is_some() {
                return Err(BoardError::OwnerMismatch {
                    point: n,
                    count: p.count,
                });
            }
        }

        for player in Player::ALL {
            let found = self.checker_total(player);
            if found != u32::from(CHECKERS_PER_PLAYER) {
                return Err(BoardError::CheckerCountMismatch { player, found });
            }
        }

        Ok(())
    }

    fn remove_checker(&mut self, origin: Origin, player: Player) -> Result<(), BoardError> {
        match origin {
            Origin::Bar => {
                if self.bar[player] == 0 {
                    return Err(BoardError::EmptyOrigin { origin, player });
                }
                self.bar[player] -= 1;
            }
            Origin::Point(n) => {
                let slot = self.slot_mut(n)?;
                if !slot.is_owned_by(player) {
                    return Err(BoardError::EmptyOrigin { origin, player });
                }
                slot.count -= 1;
                if slot.count == 0 {
                    slot.owner = None;
                }
            }
        }
        Ok(())
    }

    fn slot_mut(&mut self, point: u8) -> Result<&mut Point, BoardError> {
        if !(1..=NUM_POINTS).contains(&point) {
            return Err(BoardError::PointOutOfRange(point));
        }
        Ok(&mut self.points[point as usize - 1])
    }
}

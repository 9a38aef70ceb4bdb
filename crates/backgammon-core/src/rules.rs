//! Move legality.
//!
//! Every check here is a pure query on a [`Position`]. Nothing in this module
//! fails: an illegal candidate is simply `false`.

use crate::board::{Board, Destination, Origin, NUM_POINTS};
use crate::player::Player;
use crate::position::Position;

/// Check if a point is blocked for a player (2+ opposing checkers)
pub fn is_blocked(board: &Board, point: u8, player: Player) -> bool {
    board.is_blocked_for(point, player)
}

/// Check if `player` can enter from the bar with `die`
pub fn can_enter_from_bar(board: &Board, player: Player, die: u8) -> bool {
    !is_blocked(board, player.bar_entry_point(die), player)
}

/// Check if `player` may bear off: nothing on the bar and every checker home
pub fn can_bear_off(board: &Board, player: Player) -> bool {
    if board.bar[player] > 0 {
        return false;
    }
    board.owned_points(player).all(|n| player.is_home(n))
}

/// Whether moving `from` -> `to` with `die` is legal for the side to move.
pub fn is_legal(position: &Position, from: Origin, to: Destination, die: u8) -> bool {
    let Position {
        board,
        dice,
        player,
    } = position;
    let player = *player;

    if !dice.remaining.contains(&die) {
        return false;
    }

    // Checkers on the bar must come in before anything else moves
    if board.bar[player] > 0 && from != Origin::Bar {
        return false;
    }

    let from_point = match from {
        Origin::Bar => {
            if board.bar[player] == 0 {
                return false;
            }
            return match to {
                Destination::Point(n) if n == player.bar_entry_point(die) => {
                    can_enter_from_bar(board, player, die)
                }
                _ => false,
            };
        }
        Origin::Point(n) => n,
    };

    if !board
        .get_point(from_point)
        .is_some_and(|p| p.is_owned_by(player))
    {
        return false;
    }

    match to {
        Destination::Off => can_bear_off_with(board, player, from_point, die),
        Destination::Point(n) => {
            let expected = i16::from(from_point) + i16::from(player.direction()) * i16::from(die);
            if i16::from(n) != expected || !(1..=NUM_POINTS).contains(&n) {
                return false;
            }
            !is_blocked(board, n, player)
        }
    }
}

/// Bear-off threshold for a single checker on `from`.
///
/// An exact die always works. A larger die only works for the rearmost
/// checker. A smaller die never bears this checker off.
fn can_bear_off_with(board: &Board, player: Player, from: u8, die: u8) -> bool {
    if !can_bear_off(board, player) {
        return false;
    }

    let distance = player.distance_to_off(from);
    if die == distance {
        return true;
    }
    if die < distance {
        return false;
    }

    board
        .owned_points(player)
        .all(|n| player.distance_to_off(n) <= distance)
}

/// Whether landing on `to` would hit a lone opposing checker
pub fn is_hit(board: &Board, player: Player, to: Destination) -> bool {
    match to {
        Destination::Point(n) => board.is_hit_for(n, player),
        Destination::Off => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;

    fn position(board: Board, player: Player, d1: u8, d2: u8) -> Position {
        Position::new(board, Dice::from_values(d1, d2).unwrap(), player)
    }

    #[test]
    fn test_is_blocked() {
        let board = Board::empty()
            .with_checkers(5, Player::White, 3)
            .with_checkers(7, Player::Black, 1)
            .with_checkers(9, Player::Black, 2);
        assert!(!is_blocked(&board, 4, Player::White));
        assert!(!is_blocked(&board, 5, Player::White));
        assert!(!is_blocked(&board, 7, Player::White));
        assert!(is_blocked(&board, 9, Player::White));
    }

    #[test]
    fn test_can_enter_from_bar() {
        let board = Board::empty()
            .with_checkers(20, Player::Black, 2)
            .with_checkers(22, Player::Black, 1);
        assert!(can_enter_from_bar(&board, Player::White, 1));
        assert!(!can_enter_from_bar(&board, Player::White, 5));
        assert!(can_enter_from_bar(&board, Player::White, 3));
        assert!(can_enter_from_bar(&board, Player::Black, 6));
    }

    #[test]
    fn test_can_bear_off_requires_all_home() {
        let board = Board::empty()
            .with_checkers(3, Player::White, 14)
            .with_checkers(7, Player::White, 1);
        assert!(!can_bear_off(&board, Player::White));

        let board = Board::empty().with_checkers(3, Player::White, 15);
        assert!(can_bear_off(&board, Player::White));

        let board = Board::empty().with_checkers(20, Player::Black, 15);
        assert!(can_bear_off(&board, Player::Black));
    }

    #[test]
    fn test_black_bear_off_gating() {
        let board = Board::empty()
            .with_checkers(22, Player::Black, 14)
            .with_checkers(18, Player::Black, 1);
        assert!(!can_bear_off(&board, Player::Black));

        let board = Board::empty()
            .with_checkers(22, Player::Black, 14)
            .with_bar(Player::Black, 1);
        assert!(!can_bear_off(&board, Player::Black));

        let board = Board::empty()
            .with_checkers(19, Player::Black, 7)
            .with_checkers(24, Player::Black, 8);
        assert!(can_bear_off(&board, Player::Black));
    }

    #[test]
    fn test_can_bear_off_blocked_by_bar() {
        let board = Board::empty()
            .with_checkers(3, Player::White, 14)
            .with_bar(Player::White, 1);
        assert!(!can_bear_off(&board, Player::White));
    }

    #[test]
    fn test_normal_moves_follow_direction() {
        let pos = position(Board::standard(), Player::White, 3, 4);
        assert!(is_legal(&pos, Origin::Point(13), Destination::Point(10), 3));
        assert!(!is_legal(&pos, Origin::Point(13), Destination::Point(16), 3));

        let pos = position(Board::standard(), Player::Black, 3, 4);
        assert!(is_legal(&pos, Origin::Point(12), Destination::Point(15), 3));
        assert!(!is_legal(&pos, Origin::Point(12), Destination::Point(9), 3));
    }

    #[test]
    fn test_cannot_land_on_made_point() {
        // 13 - 1 = 12, held by five black checkers
        let pos = position(Board::standard(), Player::White, 1, 2);
        assert!(!is_legal(&pos, Origin::Point(13), Destination::Point(12), 1));
    }

    #[test]
    fn test_cannot_move_opponent_checkers() {
        let pos = position(Board::standard(), Player::White, 3, 4);
        assert!(!is_legal(&pos, Origin::Point(12), Destination::Point(9), 3));
    }

    #[test]
    fn test_die_must_be_available() {
        let pos = position(Board::standard(), Player::White, 3, 4);
        assert!(!is_legal(&pos, Origin::Point(13), Destination::Point(8), 5));
    }

    #[test]
    fn test_bar_must_enter_first() {
        let board = Board::standard()
            .with_checkers(6, Player::White, 4)
            .with_bar(Player::White, 1);
        let pos = position(board, Player::White, 3, 4);
        assert!(!is_legal(&pos, Origin::Point(13), Destination::Point(10), 3));
        assert!(is_legal(&pos, Origin::Bar, Destination::Point(22), 3));
        assert!(!is_legal(&pos, Origin::Bar, Destination::Point(21), 3));
    }

    #[test]
    fn test_bar_entry_blocked() {
        // die 6 enters white on point 19, black's five-checker point
        let board = Board::standard()
            .with_checkers(6, Player::White, 4)
            .with_bar(Player::White, 1);
        let pos = position(board, Player::White, 6, 1);
        assert!(!is_legal(&pos, Origin::Bar, Destination::Point(19), 6));
        assert!(is_legal(&pos, Origin::Bar, Destination::Point(24), 1));
    }

    #[test]
    fn test_exact_bear_off() {
        let board = Board::empty()
            .with_checkers(3, Player::White, 1)
            .with_checkers(5, Player::White, 2)
            .with_checkers(20, Player::Black, 15)
            .with_remaining_borne_off();
        let pos = position(board, Player::White, 3, 1);
        assert!(is_legal(&pos, Origin::Point(3), Destination::Off, 3));
    }

    #[test]
    fn test_higher_die_bears_off_rearmost_only() {
        let board = Board::empty()
            .with_checkers(3, Player::White, 1)
            .with_checkers(5, Player::White, 2)
            .with_remaining_borne_off();
        let pos = position(board, Player::White, 6, 1);
        assert!(is_legal(&pos, Origin::Point(5), Destination::Off, 6));
        assert!(!is_legal(&pos, Origin::Point(3), Destination::Off, 6));
    }

    #[test]
    fn test_lower_die_never_bears_off() {
        let board = Board::empty()
            .with_checkers(5, Player::White, 1)
            .with_remaining_borne_off();
        let pos = position(board, Player::White, 4, 2);
        assert!(!is_legal(&pos, Origin::Point(5), Destination::Off, 4));
    }

    #[test]
    fn test_black_bear_off() {
        let board = Board::empty()
            .with_checkers(22, Player::Black, 1)
            .with_checkers(20, Player::Black, 1)
            .with_remaining_borne_off();
        let pos = position(board, Player::Black, 3, 6);
        assert!(is_legal(&pos, Origin::Point(22), Destination::Off, 3));
        assert!(is_legal(&pos, Origin::Point(20), Destination::Off, 6));
        assert!(!is_legal(&pos, Origin::Point(22), Destination::Off, 6));
    }

    #[test]
    fn test_no_bear_off_with_checker_outside_home() {
        let board = Board::empty()
            .with_checkers(3, Player::White, 1)
            .with_checkers(9, Player::White, 1)
            .with_remaining_borne_off();
        let pos = position(board, Player::White, 3, 1);
        assert!(!is_legal(&pos, Origin::Point(3), Destination::Off, 3));
    }

    #[test]
    fn test_is_hit() {
        let board = Board::standard().with_checkers(10, Player::Black, 1);
        assert!(is_hit(&board, Player::White, Destination::Point(10)));
        assert!(!is_hit(&board, Player::White, Destination::Point(12)));
        assert!(!is_hit(&board, Player::White, Destination::Off));
    }
}

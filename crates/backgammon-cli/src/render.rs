//! Plain-text board rendering.

use std::fmt::Write;

use backgammon_core::{Board, GamePhase, GameState, Player, Point};

fn cell(point: &Point) -> String {
    match point.owner {
        Some(Player::White) => format!("W{}", point.count),
        Some(Player::Black) => format!("B{}", point.count),
        None => ".".to_string(),
    }
}

fn row(board: &Board, numbers: impl Iterator<Item = u8>) -> (String, String) {
    let mut labels = String::new();
    let mut cells = String::new();
    for (i, n) in numbers.enumerate() {
        if i == 6 {
            labels.push_str(" |");
            cells.push_str(" |");
        }
        let content = board.get_point(n).map(cell).unwrap_or_default();
        let _ = write!(labels, "{:>4}", n);
        let _ = write!(cells, "{:>4}", content);
    }
    (labels, cells)
}

/// Render the board, turn, dice, legal moves and message
pub fn render(state: &GameState) -> String {
    let board = state.board();
    let mut out = String::new();

    let (top_labels, top_cells) = row(board, 13..=24);
    let (bottom_labels, bottom_cells) = row(board, (1..=12).rev());
    let _ = writeln!(out, "{}", top_labels);
    let _ = writeln!(out, "{}", top_cells);
    let _ = writeln!(out, "  {}", "-".repeat(top_labels.len()));
    let _ = writeln!(out, "{}", bottom_cells);
    let _ = writeln!(out, "{}", bottom_labels);

    let _ = writeln!(
        out,
        "bar: white {}, black {}    off: white {}, black {}",
        board.bar[Player::White],
        board.bar[Player::Black],
        board.borne_off[Player::White],
        board.borne_off[Player::Black],
    );
    let _ = writeln!(
        out,
        "pips: white {}, black {}",
        board.pip_count(Player::White),
        board.pip_count(Player::Black),
    );

    match state.phase {
        GamePhase::GameOver => {
            if let Some(winner) = state.get_winner() {
                let _ = writeln!(out, "game over: {} wins", winner);
            }
        }
        GamePhase::Rolling => {
            let _ = writeln!(out, "turn: {} to roll", state.current_player());
        }
        GamePhase::Moving => {
            let _ = writeln!(out, "turn: {} to move", state.current_player());
            let dice = state.dice();
            if let Some((d1, d2)) = dice.values {
                let _ = writeln!(out, "dice: {}-{}, remaining {:?}", d1, d2, dice.remaining);
            }
            if let Some(origin) = state.selected {
                let _ = writeln!(out, "selected: {}", origin);
            }
            let _ = writeln!(out, "{}", render_moves(state));
        }
    }

    if let Some(message) = &state.message {
        let _ = writeln!(out, "message: {}", message);
    }

    out
}

/// The exposed legal moves on one line
pub fn render_moves(state: &GameState) -> String {
    if state.legal_moves.is_empty() {
        return "moves: none".to_string();
    }
    let moves: Vec<String> = state.legal_moves.iter().map(ToString::to_string).collect();
    format!("moves: {}", moves.join(", "))
}

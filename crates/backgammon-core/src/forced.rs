//! Forced-move resolution.
//!
//! A player must use as many dice as the position allows, and when only one
//! die can be used at all it must be the higher one. Move order changes what
//! is playable afterwards, so the resolver searches every ordering.
//!
//! The search tree is shallow (at most four dice remain) and each node is a
//! cloned [`Position`], so plain recursion is enough.

use crate::game::GameError;
use crate::moves::{all_moves, Move};
use crate::position::Position;

/// Hypothetical successor after `mv`. Only used for lookahead.
pub fn simulate(position: &Position, mv: &Move) -> Result<Position, GameError> {
    position.play(mv)
}

/// Maximum number of dice that can be played in sequence from `position`
pub fn max_dice_usable(position: &Position) -> Result<usize, GameError> {
    if position.dice.is_exhausted() {
        return Ok(0);
    }

    let candidates = all_moves(position);
    if candidates.is_empty() {
        return Ok(0);
    }

    let ceiling = position.dice.remaining.len();
    let mut best = 1;
    for mv in &candidates {
        let usable = 1 + max_dice_usable(&simulate(position, mv)?)?;
        best = best.max(usable);
        if best == ceiling {
            break;
        }
    }

    Ok(best)
}

/// Candidate moves that respect the forced-move rules.
///
/// - Nothing playable: empty.
/// - Only one die playable in total: moves using the highest die that has any move.
/// - Otherwise: moves after which the remaining dice can still all be used.
pub fn required_moves(position: &Position) -> Result<Vec<Move>, GameError> {
    if position.dice.is_exhausted() {
        return Ok(Vec::new());
    }

    let candidates = all_moves(position);
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut depths = Vec::with_capacity(candidates.len());
    for mv in &candidates {
        depths.push(1 + max_dice_usable(&simulate(position, mv)?)?);
    }
    let max_dice = depths.iter().copied().max().unwrap_or(0);

    if max_dice == 1 {
        let highest = candidates.iter().map(|m| m.die).max().unwrap_or(0);
        return Ok(candidates.into_iter().filter(|m| m.die == highest).collect());
    }

    let required: Vec<Move> = candidates
        .iter()
        .zip(&depths)
        .filter(|(_, depth)| **depth == max_dice)
        .map(|(mv, _)| *mv)
        .collect();

    if required.is_empty() {
        Ok(candidates)
    } else {
        Ok(required)
    }
}

/// Whether some first move leaves at least one further legal move
pub fn can_use_both_dice(position: &Position) -> Result<bool, GameError> {
    for mv in all_moves(position) {
        if !all_moves(&simulate(position, &mv)?).is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

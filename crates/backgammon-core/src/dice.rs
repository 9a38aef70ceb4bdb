//! Dice rolling and the consumable pool of die values.
//!
//! A roll of two different faces yields a pool of those two values; doubles
//! yield four copies of the shared face. Each move consumes exactly one entry.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by dice bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DiceError {
    #[error("Die value {value} not available in remaining {remaining:?}")]
    DieNotAvailable { value: u8, remaining: Vec<u8> },

    #[error("Die face {0} is outside 1-6")]
    InvalidFace(u8),
}

/// Dice for the current turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    /// The rolled pair, `None` before rolling
    pub values: Option<(u8, u8)>,
    /// Face values still available to play
    pub remaining: Vec<u8>,
    /// Whether the dice have been rolled this turn
    pub rolled: bool,
}

impl Dice {
    /// Unrolled dice with an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll two independent dice
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let die1 = rng.gen_range(1..=6);
        let die2 = rng.gen_range(1..=6);
        Self::rolled_pair(die1, die2)
    }

    /// Build a rolled state from explicit faces
    pub fn from_values(die1: u8, die2: u8) -> Result<Self, DiceError> {
        for face in [die1, die2] {
            if !(1..=6).contains(&face) {
                return Err(DiceError::InvalidFace(face));
            }
        }
        Ok(Self::rolled_pair(die1, die2))
    }

    fn rolled_pair(die1: u8, die2: u8) -> Self {
        Self {
            values: Some((die1, die2)),
            remaining: Self::pool_for(die1, die2),
            rolled: true,
        }
    }

    /// Pool a pair grants: both faces, or four of the face for doubles
    pub fn pool_for(die1: u8, die2: u8) -> Vec<u8> {
        if die1 == die2 {
            vec![die1; 4]
        } else {
            vec![die1, die2]
        }
    }

    /// Whether the rolled pair is a double
    pub fn is_doubles(&self) -> bool {
        matches!(self.values, Some((a, b)) if a == b)
    }

    /// No die values left to play
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remove one occurrence of `value` from the pool, leaving the rolled pair untouched
    pub fn consume(&self, value: u8) -> Result<Self, DiceError> {
        let index = self
            .remaining
            .iter()
            .position(|&v| v == value)
            .ok_or_else(|| DiceError::DieNotAvailable {
                value,
                remaining: self.remaining.clone(),
            })?;

        let mut remaining = self.remaining.clone();
        remaining.remove(index);

        Ok(Self {
            values: self.values,
            remaining,
            rolled: self.rolled,
        })
    }

    /// Deduplicated remaining face values, in first-seen order
    pub fn distinct_remaining(&self) -> Vec<u8> {
        let mut distinct = Vec::with_capacity(2);
        for &v in &self.remaining {
            if !distinct.contains(&v) {
                distinct.push(v);
            }
        }
        distinct
    }

    /// Whether `remaining` is a sub-multiset of the pool the rolled pair grants
    pub fn is_consistent(&self) -> bool {
        let Some((die1, die2)) = self.values else {
            return self.remaining.is_empty();
        };

        let mut pool = Self::pool_for(die1, die2);
        for v in &self.remaining {
            match pool.iter().position(|p| p == v) {
                Some(i) => {
                    pool.swap_remove(i);
                }
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let dice = Dice::roll(&mut rng);
            let (a, b) = dice.values.unwrap();
            assert!((1..=6).contains(&a));
            assert!((1..=6).contains(&b));
            assert!(dice.rolled);
            assert!(dice.is_consistent());
        }
    }

    #[test]
    fn test_roll_pool_size_matches_doubles() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let dice = Dice::roll(&mut rng);
            let expected = if dice.is_doubles() { 4 } else { 2 };
            assert_eq!(dice.remaining.len(), expected);
        }
    }

    #[test]
    fn test_from_values_non_doubles() {
        let dice = Dice::from_values(3, 4).unwrap();
        assert_eq!(dice.remaining, vec![3, 4]);
        assert!(!dice.is_doubles());
    }

    #[test]
    fn test_from_values_doubles() {
        let dice = Dice::from_values(5, 5).unwrap();
        assert_eq!(dice.remaining, vec![5, 5, 5, 5]);
        assert!(dice.is_doubles());
    }

    #[test]
    fn test_from_values_rejects_bad_face() {
        assert_eq!(Dice::from_values(0, 3), Err(DiceError::InvalidFace(0)));
        assert_eq!(Dice::from_values(2, 7), Err(DiceError::InvalidFace(7)));
    }

    #[test]
    fn test_consume_removes_one_occurrence() {
        let dice = Dice::from_values(2, 2).unwrap();
        let after = dice.consume(2).unwrap();
        assert_eq!(after.remaining, vec![2, 2, 2]);
        assert_eq!(after.values, Some((2, 2)));
        // the receiver is untouched
        assert_eq!(dice.remaining.len(), 4);
    }

    #[test]
    fn test_consume_missing_value_fails() {
        let dice = Dice::from_values(3, 4).unwrap();
        let err = dice.consume(6).unwrap_err();
        assert_eq!(
            err,
            DiceError::DieNotAvailable {
                value: 6,
                remaining: vec![3, 4]
            }
        );
    }

    #[test]
    fn test_distinct_remaining() {
        assert_eq!(Dice::from_values(4, 4).unwrap().distinct_remaining(), vec![4]);
        assert_eq!(Dice::from_values(6, 1).unwrap().distinct_remaining(), vec![6, 1]);
        assert!(Dice::new().distinct_remaining().is_empty());
    }

    #[test]
    fn test_unrolled_dice() {
        let dice = Dice::new();
        assert!(!dice.rolled);
        assert!(dice.values.is_none());
        assert!(dice.is_exhausted());
        assert!(dice.is_consistent());
    }

    #[test]
    fn test_inconsistent_pool_detected() {
        let mut dice = Dice::from_values(3, 4).unwrap();
        dice.remaining.push(3);
        assert!(!dice.is_consistent());
    }
}

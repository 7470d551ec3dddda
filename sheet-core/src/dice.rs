//! Dice rolling.
//!
//! Rolls are stateless and independent of the character record. The RNG is
//! injectable so tests can roll deterministically.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard die types offered by the roller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            100 => Some(DieType::D100),
            _ => None,
        }
    }

    pub fn all() -> [DieType; 7] {
        [
            DieType::D4,
            DieType::D6,
            DieType::D8,
            DieType::D10,
            DieType::D12,
            DieType::D20,
            DieType::D100,
        ]
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Roll a single die.
pub fn roll(die: DieType) -> u32 {
    roll_with_rng(die, &mut rand::thread_rng())
}

/// Roll with a specific RNG (useful for testing).
pub fn roll_with_rng<R: Rng>(die: DieType, rng: &mut R) -> u32 {
    rng.gen_range(1..=die.sides())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_range() {
        for die in DieType::all() {
            for _ in 0..100 {
                let result = roll(die);
                assert!(result >= 1 && result <= die.sides(), "{die} rolled {result}");
            }
        }
    }

    #[test]
    fn test_every_face_appears() {
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            seen[(roll(DieType::D6) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing d6 faces: {seen:?}");
    }

    #[test]
    fn test_from_sides() {
        for die in DieType::all() {
            assert_eq!(DieType::from_sides(die.sides()), Some(die));
        }
        assert_eq!(DieType::from_sides(7), None);
        assert_eq!(DieType::from_sides(0), None);
    }
}

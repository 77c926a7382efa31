//! Dice types, pools, and rolling.
//!
//! A die is identified by its side count alone. Common polyhedral sizes get
//! named variants; anything else is `Custom`. Dice serialize as their plain
//! side count so saved pools stay a simple list of numbers.

pub mod pool;
pub mod roll;

pub use pool::DicePool;
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Build a die from a side count, using the named variant when one exists.
    pub fn from_sides(sides: u32) -> Self {
        match sides {
            4 => Self::D4,
            6 => Self::D6,
            8 => Self::D8,
            10 => Self::D10,
            12 => Self::D12,
            20 => Self::D20,
            100 => Self::D100,
            n => Self::Custom(n),
        }
    }
}

impl From<u32> for Die {
    fn from(sides: u32) -> Self {
        Self::from_sides(sides)
    }
}

impl From<Die> for u32 {
    fn from(die: Die) -> Self {
        die.sides()
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

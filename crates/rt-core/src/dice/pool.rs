//! Dice pool construction, validation, and rolling.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Die;
use super::roll::{DieResult, RollResult};
use crate::config::EngineConfig;
use crate::error::{DiceError, DiceResult};

/// A collection of dice rolled together.
///
/// Order is kept for display only; it never changes the math.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DicePool {
    /// The dice in this pool.
    pub dice: Vec<Die>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// Build a pool from raw side counts.
    pub fn from_sides(sides: impl IntoIterator<Item = u32>) -> Self {
        Self {
            dice: sides.into_iter().map(Die::from_sides).collect(),
        }
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push(die);
        }
        self
    }

    /// Append a single die.
    pub fn push(&mut self, die: Die) {
        self.dice.push(die);
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Side counts of every die, in pool order.
    pub fn sides(&self) -> impl Iterator<Item = u32> + '_ {
        self.dice.iter().map(|d| d.sides())
    }

    /// Size of the sample space: the product of all side counts.
    pub fn sample_space(&self) -> f64 {
        self.sides().map(f64::from).product()
    }

    /// Check the pool against the engine limits.
    pub fn validate(&self, config: &EngineConfig) -> DiceResult<()> {
        if self.dice.is_empty() {
            return Err(DiceError::EmptyPool);
        }
        if self.dice.len() > config.max_pool_size {
            return Err(DiceError::PoolTooLarge {
                len: self.dice.len(),
                max: config.max_pool_size,
            });
        }
        if let Some(sides) = self.sides().find(|&s| !config.accepts_sides(s)) {
            return Err(DiceError::InvalidSides {
                sides,
                min: config.min_sides,
                max: config.max_sides,
            });
        }
        Ok(())
    }

    /// Parse and validate notation like `"3d6 + d8"` with the default limits.
    pub fn parse(notation: &str) -> DiceResult<Self> {
        Self::parse_with(notation, &EngineConfig::default())
    }

    /// Parse and validate dice notation against the given limits.
    ///
    /// Terms are separated by `+`, `,` or whitespace. Each term is `NdS`,
    /// `dS` or a bare side count `S`.
    pub fn parse_with(notation: &str, config: &EngineConfig) -> DiceResult<Self> {
        let mut pool = Self::new();
        let terms = notation
            .split(|c: char| c == '+' || c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());

        for term in terms {
            let lower = term.to_lowercase();
            let (count, sides) = match lower.split_once('d') {
                Some((count, sides)) => (count, sides),
                None => ("1", lower.as_str()),
            };
            let count: usize = if count.is_empty() {
                1
            } else {
                count
                    .parse()
                    .map_err(|_| DiceError::InvalidNotation(term.to_string()))?
            };
            let sides: u32 = sides
                .parse()
                .map_err(|_| DiceError::InvalidNotation(term.to_string()))?;

            if count > config.max_pool_size.saturating_sub(pool.count()) {
                return Err(DiceError::PoolTooLarge {
                    len: pool.count().saturating_add(count),
                    max: config.max_pool_size,
                });
            }
            for _ in 0..count {
                pool.push(Die::from_sides(sides));
            }
        }

        pool.validate(config)?;
        Ok(pool)
    }

    /// Compact notation grouped by die size, e.g. `"3d6 + 1d8"`.
    pub fn describe(&self) -> String {
        if self.dice.is_empty() {
            return "No dice".to_string();
        }
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for sides in self.sides() {
            *counts.entry(sides).or_insert(0) += 1;
        }
        counts
            .iter()
            .map(|(sides, count)| format!("{count}d{sides}"))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Roll every die in the pool once.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> RollResult {
        let dice = self
            .dice
            .iter()
            .map(|&die| DieResult {
                die,
                value: rng.random_range(1..=die.sides()),
            })
            .collect();
        RollResult { dice }
    }
}

impl From<Vec<Die>> for DicePool {
    fn from(dice: Vec<Die>) -> Self {
        Self { dice }
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_pool() {
        let pool = DicePool::new();
        assert_eq!(pool.count(), 0);
        assert!(pool.is_empty());
        assert!(matches!(
            pool.validate(&EngineConfig::default()),
            Err(DiceError::EmptyPool)
        ));
    }

    #[test]
    fn add_dice() {
        let pool = DicePool::new().add(Die::D20, 2).add(Die::D6, 3);
        assert_eq!(pool.count(), 5);
        assert!(!pool.is_empty());
        assert_eq!(pool.sample_space(), 20.0 * 20.0 * 6.0 * 6.0 * 6.0);
    }

    #[test]
    fn validate_rejects_bad_sides() {
        let pool = DicePool::from_sides([6, 201]);
        let err = pool.validate(&EngineConfig::default()).unwrap_err();
        assert!(matches!(err, DiceError::InvalidSides { sides: 201, .. }));
        let pool = DicePool::from_sides([1]);
        assert!(pool.validate(&EngineConfig::default()).is_err());
    }

    #[test]
    fn validate_rejects_oversized_pool() {
        let pool = DicePool::new().add(Die::D6, 31);
        let err = pool.validate(&EngineConfig::default()).unwrap_err();
        assert!(matches!(err, DiceError::PoolTooLarge { len: 31, max: 30 }));
        assert!(DicePool::new().add(Die::D6, 30).validate(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn parse_notation() {
        let pool = DicePool::parse("3d6 + d8").unwrap();
        assert_eq!(pool.dice, vec![Die::D6, Die::D6, Die::D6, Die::D8]);

        let pool = DicePool::parse("d20,d20 12").unwrap();
        assert_eq!(pool.dice, vec![Die::D20, Die::D20, Die::D12]);

        let pool = DicePool::parse("2D10").unwrap();
        assert_eq!(pool.count(), 2);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            DicePool::parse("3x6"),
            Err(DiceError::InvalidNotation(_))
        ));
        assert!(matches!(
            DicePool::parse("d"),
            Err(DiceError::InvalidNotation(_))
        ));
        assert!(matches!(DicePool::parse(""), Err(DiceError::EmptyPool)));
        assert!(matches!(
            DicePool::parse("d1"),
            Err(DiceError::InvalidSides { sides: 1, .. })
        ));
        assert!(matches!(
            DicePool::parse("1000000d6"),
            Err(DiceError::PoolTooLarge { .. })
        ));
        assert!(matches!(
            DicePool::parse("d6 + 18446744073709551615d6"),
            Err(DiceError::PoolTooLarge { max: 30, .. })
        ));
        assert!(matches!(
            DicePool::parse("29d6 + 2d8"),
            Err(DiceError::PoolTooLarge { len: 31, max: 30 })
        ));
    }

    #[test]
    fn describe_groups_by_size() {
        let pool = DicePool::from_sides([8, 6, 6, 20, 6]);
        insta::assert_snapshot!(pool.describe(), @"3d6 + 1d8 + 1d20");
        assert_eq!(DicePool::new().describe(), "No dice");
    }

    #[test]
    fn roll_produces_valid_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = DicePool::new().add(Die::D6, 10);
        let result = pool.roll(&mut rng);
        assert_eq!(result.dice.len(), 10);
        for die_result in &result.dice {
            assert!((1..=6).contains(&die_result.value));
        }
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let pool = DicePool::new().add(Die::D20, 3);
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        let r1 = pool.roll(&mut rng1);
        let r2 = pool.roll(&mut rng2);
        for (a, b) in r1.dice.iter().zip(r2.dice.iter()) {
            assert_eq!(a.value, b.value);
        }
    }
}

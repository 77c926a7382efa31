use serde::{Deserialize, Serialize};

/// Limits applied by the distribution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest sample space a keep/drop rule may enumerate.
    pub max_rule_combinations: u64,
    /// Largest number of dice in one pool.
    pub max_pool_size: usize,
    /// Smallest accepted side count.
    pub min_sides: u32,
    /// Largest accepted side count.
    pub max_sides: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rule_combinations: 300_000,
            max_pool_size: 30,
            min_sides: 2,
            max_sides: 200,
        }
    }
}

impl EngineConfig {
    /// Set the enumeration limit for rule-bearing pools.
    pub fn with_max_rule_combinations(mut self, max: u64) -> Self {
        self.max_rule_combinations = max;
        self
    }

    /// Whether a die with `sides` faces is accepted.
    pub fn accepts_sides(&self, sides: u32) -> bool {
        (self.min_sides..=self.max_sides).contains(&sides)
    }
}

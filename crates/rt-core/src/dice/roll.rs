//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::Die;
use crate::rule::SelectionRule;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
}

/// The result of rolling an entire dice pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Face values in pool order.
    pub fn faces(&self) -> Vec<u32> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Sum of all die values.
    pub fn total(&self) -> i64 {
        self.dice.iter().map(|d| i64::from(d.value)).sum()
    }

    /// Sum of the dice the rule keeps.
    pub fn kept_total(&self, rule: &SelectionRule) -> i64 {
        rule.apply(&self.faces())
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

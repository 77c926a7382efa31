//! Keep/drop selection rules.
//!
//! A rule reduces one roll's individual faces before they are summed:
//! keep or drop the N highest or lowest. Ties are irrelevant because only
//! the kept values are summed, never the identity of the dice.

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// Largest keep/drop count a rule may carry.
pub const MAX_RULE_COUNT: u32 = 30;

/// The five selection modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Sum every die.
    #[default]
    None,
    /// Drop the N lowest dice.
    DropLow,
    /// Drop the N highest dice.
    DropHigh,
    /// Keep only the N lowest dice.
    KeepLow,
    /// Keep only the N highest dice.
    KeepHigh,
}

impl RuleKind {
    /// Every rule kind, in display order.
    pub const ALL: [RuleKind; 5] = [
        Self::None,
        Self::DropLow,
        Self::DropHigh,
        Self::KeepLow,
        Self::KeepHigh,
    ];

    /// The kebab-case name used in saved state and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DropLow => "drop-low",
            Self::DropHigh => "drop-high",
            Self::KeepLow => "keep-low",
            Self::KeepHigh => "keep-high",
        }
    }

    /// Look up a rule kind by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::str::FromStr for RuleKind {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.trim().to_lowercase())
            .ok_or_else(|| DiceError::UnknownRule(s.to_string()))
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule kind paired with how many dice it keeps or drops.
///
/// A count of zero, or kind [`RuleKind::None`], means no reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionRule {
    /// What the rule does.
    pub kind: RuleKind,
    /// How many dice it keeps or drops.
    pub count: u32,
}

impl SelectionRule {
    /// The rule that sums every die.
    pub const NONE: Self = Self {
        kind: RuleKind::None,
        count: 0,
    };

    /// Create a rule; `count` is capped at [`MAX_RULE_COUNT`].
    pub fn new(kind: RuleKind, count: u32) -> Self {
        Self {
            kind,
            count: count.min(MAX_RULE_COUNT),
        }
    }

    /// Whether the rule changes anything about a roll's sum.
    pub fn is_active(&self) -> bool {
        self.kind != RuleKind::None && self.count > 0
    }

    /// Sum the faces this rule keeps from one roll.
    pub fn apply(&self, faces: &[u32]) -> i64 {
        if !self.is_active() {
            return sum(faces);
        }
        let mut sorted = faces.to_vec();
        sorted.sort_unstable();
        self.apply_sorted(&sorted)
    }

    /// Like [`apply`](Self::apply) for faces already in ascending order.
    pub(crate) fn apply_sorted(&self, sorted: &[u32]) -> i64 {
        if !self.is_active() {
            return sum(sorted);
        }
        let n = sorted.len();
        let c = (self.count as usize).min(n);
        let kept = match self.kind {
            RuleKind::KeepHigh => &sorted[n - c..],
            RuleKind::KeepLow => &sorted[..c],
            RuleKind::DropHigh => &sorted[..n - c],
            RuleKind::DropLow => &sorted[c..],
            RuleKind::None => sorted,
        };
        sum(kept)
    }

    /// Suffix describing the rule, e.g. `" (drop lowest 1)"`; empty when inactive.
    pub fn describe(&self) -> String {
        if !self.is_active() {
            return String::new();
        }
        let what = match self.kind {
            RuleKind::DropLow => "drop lowest",
            RuleKind::DropHigh => "drop highest",
            RuleKind::KeepLow => "keep lowest",
            RuleKind::KeepHigh => "keep highest",
            RuleKind::None => return String::new(),
        };
        format!(" ({what} {})", self.count)
    }
}

fn sum(faces: &[u32]) -> i64 {
    faces.iter().map(|&f| i64::from(f)).sum()
}

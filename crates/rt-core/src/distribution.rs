//! The distribution engine.
//!
//! Two strategies, chosen by whether a selection rule is active:
//!
//! - **Convolution** (no rule): fold each die into a running sum-to-count
//!   table. Cost grows with `Σ sides × pool size`, so even 30×d200 is cheap.
//! - **Enumeration** (rule active): keep/drop is not linear in the sum, so
//!   every face tuple is visited. The reducer runs once per distinct sorted
//!   multiset of faces. Refused up front when the sample space exceeds
//!   [`EngineConfig::max_rule_combinations`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::dice::DicePool;
use crate::error::{DiceError, DiceResult};
use crate::rule::SelectionRule;
use crate::span::{Span, sum_probability};

/// One achievable total and how likely it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalProbability {
    /// The reduced sum of one roll.
    pub total: i64,
    /// Number of face combinations producing this total.
    ///
    /// Carried as `f64`: exact below 2^53, which covers every rule-bearing
    /// result, while huge rule-free pools overflow any fixed-width integer.
    pub count: f64,
    /// `count / total_outcomes`.
    pub probability: f64,
}

/// The exact distribution of totals for one pool and rule.
///
/// Immutable once computed; recompute when the pool or rule changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    entries: Vec<TotalProbability>,
    total_outcomes: f64,
    pool: DicePool,
    rule: SelectionRule,
}

impl Distribution {
    /// Compute the distribution with the default engine limits.
    pub fn compute(pool: &DicePool, rule: SelectionRule) -> DiceResult<Self> {
        Self::compute_with(pool, rule, &EngineConfig::default())
    }

    /// Compute the distribution under explicit engine limits.
    ///
    /// The pool is validated first. With an active rule the capacity check
    /// runs before any enumeration starts.
    pub fn compute_with(
        pool: &DicePool,
        rule: SelectionRule,
        config: &EngineConfig,
    ) -> DiceResult<Self> {
        pool.validate(config)?;
        let total_outcomes = pool.sample_space();

        let (counts, rule) = if rule.is_active() {
            if total_outcomes > config.max_rule_combinations as f64 {
                warn!(
                    pool = %pool,
                    combinations = total_outcomes,
                    limit = config.max_rule_combinations,
                    "refusing keep/drop enumeration"
                );
                return Err(DiceError::TooManyCombinations {
                    combinations: total_outcomes,
                    limit: config.max_rule_combinations,
                });
            }
            debug!(
                pool = %pool,
                rule = %rule.kind,
                count = rule.count,
                "enumerating face combinations"
            );
            (enumerate(pool, &rule), rule)
        } else {
            debug!(pool = %pool, "convolving pool");
            (convolve(pool), SelectionRule::NONE)
        };

        let entries = counts
            .into_iter()
            .map(|(total, count)| TotalProbability {
                total,
                count,
                probability: count / total_outcomes,
            })
            .collect();

        Ok(Self {
            entries,
            total_outcomes,
            pool: pool.clone(),
            rule,
        })
    }

    /// Every achievable total in ascending order.
    pub fn entries(&self) -> &[TotalProbability] {
        &self.entries
    }

    /// The achievable totals in ascending order.
    pub fn totals(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|e| e.total)
    }

    /// Number of distinct achievable totals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a computed distribution; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the sample space (product of all side counts).
    pub fn total_outcomes(&self) -> f64 {
        self.total_outcomes
    }

    /// The pool this distribution was computed from.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// The rule applied; [`SelectionRule::NONE`] when none was active.
    pub fn rule(&self) -> &SelectionRule {
        &self.rule
    }

    /// Smallest achievable total.
    pub fn min_total(&self) -> i64 {
        self.entries.first().map_or(0, |e| e.total)
    }

    /// Largest achievable total.
    pub fn max_total(&self) -> i64 {
        self.entries.last().map_or(0, |e| e.total)
    }

    /// The span from smallest to largest achievable total.
    pub fn span(&self) -> Span {
        Span::new(self.min_total(), self.max_total())
    }

    /// Probability of rolling exactly `total`.
    pub fn probability_of(&self, total: i64) -> f64 {
        self.entries
            .binary_search_by_key(&total, |e| e.total)
            .map_or(0.0, |i| self.entries[i].probability)
    }

    /// Probability mass of `min..=max`; see [`sum_probability`].
    pub fn probability_between(&self, min: i64, max: i64) -> f64 {
        sum_probability(self, min, max)
    }

    /// Expected value of the total.
    pub fn mean(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.total as f64 * e.probability)
            .sum()
    }

    /// Pool notation followed by the rule, e.g. `"4d20 (drop lowest 1)"`.
    pub fn describe(&self) -> String {
        format!("{}{}", self.pool.describe(), self.rule.describe())
    }
}

/// Iterative convolution over the pool, one die at a time.
fn convolve(pool: &DicePool) -> BTreeMap<i64, f64> {
    // counts[i] is the number of ways to reach `offset + i`.
    let mut counts = vec![1.0_f64];
    let mut offset: i64 = 0;

    for sides in pool.sides() {
        let sides = sides as usize;
        let mut next = vec![0.0_f64; counts.len() + sides - 1];
        for (i, &ways) in counts.iter().enumerate() {
            for slot in &mut next[i..i + sides] {
                *slot += ways;
            }
        }
        counts = next;
        offset += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .filter(|(_, ways)| *ways > 0.0)
        .map(|(i, ways)| (offset + i as i64, ways))
        .collect()
}

/// Visit every face tuple, tally the sorted multisets, then reduce each
/// multiset once.
fn enumerate(pool: &DicePool, rule: &SelectionRule) -> BTreeMap<i64, f64> {
    let sides: Vec<u32> = pool.sides().collect();
    let mut multisets: HashMap<Vec<u32>, u64> = HashMap::new();
    let mut faces = Vec::with_capacity(sides.len());
    collect_rolls(&sides, &mut faces, &mut multisets);

    debug!(
        distinct = multisets.len(),
        "reducing distinct face multisets"
    );

    let mut counts = BTreeMap::new();
    for (sorted, ways) in multisets {
        *counts.entry(rule.apply_sorted(&sorted)).or_insert(0.0) += ways as f64;
    }
    counts
}

fn collect_rolls(sides: &[u32], faces: &mut Vec<u32>, tally: &mut HashMap<Vec<u32>, u64>) {
    match sides.split_first() {
        None => {
            let mut key = faces.clone();
            key.sort_unstable();
            *tally.entry(key).or_insert(0) += 1;
        }
        Some((&first, rest)) => {
            for face in 1..=first {
                faces.push(face);
                collect_rolls(rest, faces, tally);
                faces.pop();
            }
        }
    }
}

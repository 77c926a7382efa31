use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;

/// An inclusive range of totals, `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Smallest total.
    pub min: i64,
    /// Largest total.
    pub max: i64,
}

impl Span {
    /// Create a span; the caller guarantees `min <= max`.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Number of integers in the span.
    pub fn len(&self) -> i64 {
        (self.max - self.min + 1).max(0)
    }

    /// Whether the span holds no integers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `value` lies within the span.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Pull `value` into the span.
    pub fn clamp(&self, value: i64) -> i64 {
        clamp_to(value, self.min, self.max)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// `value.max(lo).min(hi)`; unlike [`Ord::clamp`] it tolerates `lo > hi`
/// and then yields `hi`.
pub fn clamp_to(value: i64, lo: i64, hi: i64) -> i64 {
    value.max(lo).min(hi)
}

/// Probability mass of every achievable total in `min..=max`.
///
/// Returns 0 when `min > max`. Totals outside the distribution contribute
/// nothing.
pub fn sum_probability(distribution: &Distribution, min: i64, max: i64) -> f64 {
    if min > max {
        return 0.0;
    }
    let entries = distribution.entries();
    let start = entries.partition_point(|e| e.total < min);
    let mass: f64 = entries[start..]
        .iter()
        .take_while(|e| e.total <= max)
        .map(|e| e.probability)
        .sum();
    mass.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DicePool;
    use crate::rule::SelectionRule;
    use proptest::prelude::*;

    fn three_d6() -> Distribution {
        Distribution::compute(&DicePool::from_sides([6, 6, 6]), SelectionRule::NONE).unwrap()
    }

    #[test]
    fn span_basics() {
        let span = Span::new(3, 18);
        assert_eq!(span.len(), 16);
        assert!(!span.is_empty());
        assert!(span.contains(3));
        assert!(span.contains(18));
        assert!(!span.contains(19));
        assert_eq!(span.clamp(1), 3);
        assert_eq!(span.clamp(40), 18);
        assert_eq!(span.to_string(), "3 - 18");
    }

    #[test]
    fn clamp_to_tolerates_inverted_bounds() {
        assert_eq!(clamp_to(5, 10, 8), 8);
        assert_eq!(clamp_to(9, 2, 8), 8);
    }

    #[test]
    fn whole_span_is_certain() {
        let dist = three_d6();
        assert!((sum_probability(&dist, 3, 18) - 1.0).abs() < 1e-9);
        assert!((sum_probability(&dist, -100, 100) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_totals() {
        let dist = three_d6();
        assert!((sum_probability(&dist, 10, 10) - 27.0 / 216.0).abs() < 1e-12);
        assert!((sum_probability(&dist, 3, 3) - 1.0 / 216.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_or_outside_ranges_are_empty() {
        let dist = three_d6();
        assert_eq!(sum_probability(&dist, 10, 9), 0.0);
        assert_eq!(sum_probability(&dist, 19, 40), 0.0);
        assert_eq!(sum_probability(&dist, -5, 2), 0.0);
    }

    proptest! {
        #[test]
        fn sum_probability_is_additive(a in 0i64..25, w1 in 0i64..10, w2 in 1i64..10) {
            let dist = three_d6();
            let b = a + w1;
            let c = b + w2;
            let whole = sum_probability(&dist, a, c);
            let parts = sum_probability(&dist, a, b) + sum_probability(&dist, b + 1, c);
            prop_assert!((whole - parts).abs() < 1e-9);
        }
    }
}

//! A single labeled outcome band.

use serde::{Deserialize, Deserializer, Serialize};

use rt_core::{Distribution, Span};

use crate::error::TableError;

/// Longest label a band may carry, in characters.
pub const MAX_LABEL_LEN: usize = 40;

/// A labeled, inclusive band of totals mapped to a narrative result.
///
/// Either bound may be unset, meaning "fill in automatically".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeRange {
    /// Display label; may be blank.
    #[serde(default, deserialize_with = "deserialize_label")]
    pub label: String,
    /// Lower bound, inclusive.
    #[serde(default)]
    pub min: Option<i64>,
    /// Upper bound, inclusive.
    #[serde(default)]
    pub max: Option<i64>,
    /// Excluded from auto-spread and used as a fixed anchor.
    #[serde(default)]
    pub locked: bool,
}

impl OutcomeRange {
    /// An unset, unlocked band with the given label.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            label: truncate_label(label.as_ref()),
            ..Self::default()
        }
    }

    /// An unset, unlocked, unlabeled band.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Set both bounds.
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Mark the band as locked.
    pub fn lock(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Replace the label, truncated to [`MAX_LABEL_LEN`] characters.
    pub fn set_label(&mut self, label: &str) {
        self.label = truncate_label(label);
    }

    /// Both bounds, when both are set.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        Some((self.min?, self.max?))
    }

    /// Whether both bounds are set.
    pub fn is_set(&self) -> bool {
        self.bounds().is_some()
    }

    /// Whether `total` lies inside the band. Unset or inverted bands hold nothing.
    pub fn contains(&self, total: i64) -> bool {
        self.bounds()
            .is_some_and(|(min, max)| (min..=max).contains(&total))
    }

    /// Bounds pulled into `span`; an unset bound becomes the matching span edge.
    pub fn clamped(&self, span: Span) -> (i64, i64) {
        let min = self.min.map_or(span.min, |v| span.clamp(v));
        let max = self.max.map_or(span.max, |v| span.clamp(v));
        (min, max)
    }

    /// Probability mass of the band; 0 when unset or inverted.
    pub fn probability(&self, distribution: &Distribution) -> f64 {
        self.bounds()
            .map_or(0.0, |(min, max)| distribution.probability_between(min, max))
    }

    /// The label, or `"Outcome N"` (1-based) when blank.
    pub fn display_label(&self, index: usize) -> String {
        if self.label.trim().is_empty() {
            format!("Outcome {}", index + 1)
        } else {
            self.label.clone()
        }
    }

    /// `"7"` for a single total, `"7-10"` for a band, `"-"` when unset.
    pub fn range_text(&self) -> String {
        match self.bounds() {
            Some((min, max)) if min == max => min.to_string(),
            Some((min, max)) => format!("{min}-{max}"),
            None => "-".to_string(),
        }
    }
}

/// Parses `LABEL`, `LABEL=MIN..MAX`, `=MIN..MAX` or `MIN..MAX`; a trailing
/// `!` locks the band. A single total may be written `LABEL=N`.
impl std::str::FromStr for OutcomeRange {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (body, locked) = match s.strip_suffix('!') {
            Some(rest) => (rest.trim_end(), true),
            None => (s, false),
        };

        let (label, range) = match body.split_once('=') {
            Some((label, range)) => (label.trim(), Some(range.trim())),
            None if is_numeric_range(body) => ("", Some(body)),
            None => (body, None),
        };

        let mut outcome = Self::new(label);
        outcome.locked = locked;

        if let Some(range) = range {
            let (min, max) = match range.split_once("..") {
                Some((min, max)) => (min, max),
                None => (range, range),
            };
            let parse = |v: &str| {
                v.trim()
                    .parse::<i64>()
                    .map_err(|_| TableError::InvalidOutcome(s.to_string()))
            };
            outcome.min = Some(parse(min)?);
            outcome.max = Some(parse(max)?);
        }

        Ok(outcome)
    }
}

fn is_numeric_range(text: &str) -> bool {
    text.split_once("..").is_some_and(|(min, max)| {
        min.trim().parse::<i64>().is_ok() && max.trim().parse::<i64>().is_ok()
    })
}

fn deserialize_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|label| truncate_label(&label))
}

/// Cut `label` to at most [`MAX_LABEL_LEN`] characters.
pub fn truncate_label(label: &str) -> String {
    label.chars().take(MAX_LABEL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_truncated() {
        let long = "x".repeat(60);
        assert_eq!(OutcomeRange::new(&long).label.len(), MAX_LABEL_LEN);
        let mut o = OutcomeRange::unset();
        o.set_label("äöü".repeat(20).as_str());
        assert_eq!(o.label.chars().count(), MAX_LABEL_LEN);
    }

    #[test]
    fn bounds_and_contains() {
        let o = OutcomeRange::new("Ambush").with_range(3, 6);
        assert_eq!(o.bounds(), Some((3, 6)));
        assert!(o.contains(3));
        assert!(o.contains(6));
        assert!(!o.contains(7));
        assert!(!OutcomeRange::unset().contains(3));
        assert!(!OutcomeRange::unset().with_range(6, 3).contains(4));
    }

    #[test]
    fn clamped_fills_unset_edges() {
        let span = Span::new(3, 18);
        assert_eq!(OutcomeRange::unset().clamped(span), (3, 18));
        assert_eq!(OutcomeRange::unset().with_range(-2, 40).clamped(span), (3, 18));
        let mut half = OutcomeRange::unset();
        half.min = Some(7);
        assert_eq!(half.clamped(span), (7, 18));
    }

    #[test]
    fn display_label_falls_back() {
        assert_eq!(OutcomeRange::new("  ").display_label(2), "Outcome 3");
        assert_eq!(OutcomeRange::new("Bandits").display_label(0), "Bandits");
    }

    #[test]
    fn range_text() {
        assert_eq!(OutcomeRange::unset().with_range(7, 7).range_text(), "7");
        assert_eq!(OutcomeRange::unset().with_range(7, 10).range_text(), "7-10");
        assert_eq!(OutcomeRange::unset().range_text(), "-");
    }

    #[test]
    fn parse_outcome_specs() {
        let o: OutcomeRange = "Ambush=3..6".parse().unwrap();
        assert_eq!(o, OutcomeRange::new("Ambush").with_range(3, 6));

        let o: OutcomeRange = "Boss = 10..12 !".parse().unwrap();
        assert_eq!(o, OutcomeRange::new("Boss").with_range(10, 12).lock());

        let o: OutcomeRange = "Treasure".parse().unwrap();
        assert_eq!(o, OutcomeRange::new("Treasure"));

        let o: OutcomeRange = "=7..10".parse().unwrap();
        assert_eq!(o, OutcomeRange::unset().with_range(7, 10));

        let o: OutcomeRange = "4..9".parse().unwrap();
        assert_eq!(o.bounds(), Some((4, 9)));

        let o: OutcomeRange = "Jackpot=18".parse().unwrap();
        assert_eq!(o.bounds(), Some((18, 18)));

        let o: OutcomeRange = "Wait...!".parse().unwrap();
        assert_eq!(o, OutcomeRange::new("Wait...").lock());

        let o: OutcomeRange = "1..x".parse().unwrap();
        assert_eq!(o.label, "1..x");
        assert!(!o.is_set());

        assert!("Bad=x..3".parse::<OutcomeRange>().is_err());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let o: OutcomeRange = serde_json::from_str(r#"{"label":"A","min":3}"#).unwrap();
        assert_eq!(o.min, Some(3));
        assert_eq!(o.max, None);
        assert!(!o.locked);
    }

    #[test]
    fn deserialized_labels_are_truncated() {
        let json = format!(r#"{{"label":"{}","min":1,"max":2}}"#, "z".repeat(60));
        let o: OutcomeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(o.label.chars().count(), MAX_LABEL_LEN);
    }
}

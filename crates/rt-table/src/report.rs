//! Table rows, a distribution summary, and the tab-separated export.

use serde::{Deserialize, Serialize};

use rt_core::Distribution;

use crate::outcome::OutcomeRange;

/// `"~1/N"` with `N = round(1/p)` clamped to `[1, 999]`; empty unless `0 < p <= 1`.
pub fn format_approx_fraction(probability: f64) -> String {
    if !probability.is_finite() || probability <= 0.0 || probability > 1.0 {
        return String::new();
    }
    let den = (1.0 / probability).round().clamp(1.0, 999.0) as u32;
    format!("~1/{den}")
}

/// One displayed line of a random table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// `"7"` or `"7-10"`.
    pub range_text: String,
    /// The band label, or `"Outcome N"` when blank.
    pub label: String,
    /// Probability mass of the band.
    pub probability: f64,
}

impl TableRow {
    /// `"12.50% ~1/8"`.
    pub fn probability_text(&self) -> String {
        let approx = format_approx_fraction(self.probability);
        format!("{:.2}% {approx}", self.probability * 100.0)
    }
}

/// One row per band, in order.
///
/// Expects resolved bands (see [`OutcomeList::resolve`]); an unset band
/// yields a `"-"` range and zero probability.
///
/// [`OutcomeList::resolve`]: crate::OutcomeList::resolve
pub fn build_rows(ranges: &[OutcomeRange], distribution: &Distribution) -> Vec<TableRow> {
    ranges
        .iter()
        .enumerate()
        .map(|(idx, range)| TableRow {
            range_text: range.range_text(),
            label: range.display_label(idx),
            probability: range.probability(distribution),
        })
        .collect()
}

/// Column heading for the totals: the dice description, or `"Roll"`.
pub fn roll_label(distribution: &Distribution) -> String {
    let label = distribution.describe();
    let label = label.trim();
    if label.is_empty() {
        "Roll".to_string()
    } else {
        label.to_string()
    }
}

/// The table as tab-separated text, ready to paste into a spreadsheet.
///
/// Empty when there are no bands.
pub fn to_clipboard_tsv(ranges: &[OutcomeRange], distribution: &Distribution) -> String {
    if ranges.is_empty() {
        return String::new();
    }
    let mut lines = vec![format!("{}\tOutcome\tProbability", roll_label(distribution))];
    lines.extend(
        build_rows(ranges, distribution)
            .into_iter()
            .map(|row| format!("{}\t{}\t{}", row.range_text, row.label, row.probability_text())),
    );
    lines.join("\n")
}

/// Headline figures for a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Pool and rule, e.g. `"4d20 (drop lowest 1)"`.
    pub dice: String,
    /// Expected total.
    pub mean: f64,
    /// Smallest achievable total.
    pub min_total: i64,
    /// Largest achievable total.
    pub max_total: i64,
}

impl Summary {
    /// Summarize `distribution`.
    pub fn of(distribution: &Distribution) -> Self {
        Self {
            dice: distribution.describe(),
            mean: distribution.mean(),
            min_total: distribution.min_total(),
            max_total: distribution.max_total(),
        }
    }

    /// `"3 - 18"`.
    pub fn range_text(&self) -> String {
        format!("{} - {}", self.min_total, self.max_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::{DicePool, RuleKind, SelectionRule};

    fn three_d6() -> Distribution {
        Distribution::compute(&DicePool::from_sides([6, 6, 6]), SelectionRule::NONE).unwrap()
    }

    #[test]
    fn approx_fraction() {
        assert_eq!(format_approx_fraction(0.125), "~1/8");
        assert_eq!(format_approx_fraction(1.0), "~1/1");
        assert_eq!(format_approx_fraction(1.0 / 216.0), "~1/216");
        assert_eq!(format_approx_fraction(1e-6), "~1/999");
        assert_eq!(format_approx_fraction(0.0), "");
        assert_eq!(format_approx_fraction(1.5), "");
        assert_eq!(format_approx_fraction(f64::NAN), "");
    }

    #[test]
    fn rows_follow_bands() {
        let dist = three_d6();
        let ranges = vec![
            OutcomeRange::new("Ambush").with_range(3, 6),
            OutcomeRange::unset().with_range(7, 10),
            OutcomeRange::new("Quiet").with_range(11, 18),
        ];
        let rows = build_rows(&ranges, &dist);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].range_text, "3-6");
        assert_eq!(rows[1].label, "Outcome 2");
        let mass: f64 = rows.iter().map(|r| r.probability).sum();
        assert!((mass - 1.0).abs() < 1e-9);
        // 3..=6 on 3d6 is 20 of 216.
        assert!((rows[0].probability - 20.0 / 216.0).abs() < 1e-12);
    }

    #[test]
    fn probability_text() {
        let row = TableRow {
            range_text: "10".into(),
            label: "x".into(),
            probability: 0.125,
        };
        insta::assert_snapshot!(row.probability_text(), @"12.50% ~1/8");
    }

    #[test]
    fn clipboard_export() {
        let dist = three_d6();
        let ranges = vec![
            OutcomeRange::new("Low").with_range(3, 10),
            OutcomeRange::new("High").with_range(11, 18),
        ];
        assert_eq!(
            to_clipboard_tsv(&ranges, &dist),
            "3d6\tOutcome\tProbability\n3-10\tLow\t50.00% ~1/2\n11-18\tHigh\t50.00% ~1/2"
        );
        assert_eq!(to_clipboard_tsv(&[], &dist), "");
    }

    #[test]
    fn roll_label_includes_rule() {
        let pool = DicePool::from_sides([20, 20]);
        let dist = Distribution::compute(&pool, SelectionRule::new(RuleKind::KeepHigh, 1)).unwrap();
        assert_eq!(roll_label(&dist), "2d20 (keep highest 1)");
    }

    #[test]
    fn summary() {
        let s = Summary::of(&three_d6());
        assert_eq!(s.dice, "3d6");
        assert!((s.mean - 10.5).abs() < 1e-9);
        assert_eq!(s.range_text(), "3 - 18");
    }
}

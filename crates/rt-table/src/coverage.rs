//! Coverage check: does every achievable total land in exactly one band?

use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeRange;

/// Totals that fall into no band, and totals that fall into several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// Achievable totals no band includes, ascending.
    pub uncovered: Vec<i64>,
    /// Achievable totals more than one band includes, ascending.
    pub overlapping: Vec<i64>,
}

impl Coverage {
    /// True when every total is covered exactly once.
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty() && self.overlapping.is_empty()
    }

    /// One-line report, abbreviating each list to its first and last member.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(run) = abbreviate(&self.uncovered) {
            parts.push(format!("Uncovered totals: {run}"));
        }
        if let Some(run) = abbreviate(&self.overlapping) {
            parts.push(format!("Overlapping totals: {run}"));
        }
        if parts.is_empty() {
            "All totals covered without overlaps.".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

fn abbreviate(totals: &[i64]) -> Option<String> {
    match totals {
        [] => None,
        [only] => Some(only.to_string()),
        [first, .., last] => Some(format!("{first}...{last}")),
    }
}

/// Count, for each achievable total, how many bands include it.
///
/// `totals` should be ascending (as [`Distribution::totals`] yields them);
/// both result lists keep that order. Unset and inverted bands count for
/// nothing.
///
/// [`Distribution::totals`]: rt_core::Distribution::totals
pub fn check_coverage(
    ranges: &[OutcomeRange],
    totals: impl IntoIterator<Item = i64>,
) -> Coverage {
    let bands: Vec<(i64, i64)> = ranges
        .iter()
        .filter_map(OutcomeRange::bounds)
        .filter(|(min, max)| min <= max)
        .collect();

    let mut coverage = Coverage::default();
    for total in totals {
        let hits = bands
            .iter()
            .filter(|(min, max)| (*min..=*max).contains(&total))
            .count();
        match hits {
            0 => coverage.uncovered.push(total),
            1 => {}
            _ => coverage.overlapping.push(total),
        }
    }
    coverage
}

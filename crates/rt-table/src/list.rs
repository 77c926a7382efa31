//! The editable list of outcome bands.
//!
//! The list is never empty: removing the last band reinstates a single
//! unset one. Edits that need the achievable span take it explicitly;
//! the list holds no reference to any distribution.

use serde::{Deserialize, Serialize};

use rt_core::span::clamp_to;
use rt_core::{Distribution, Span};

use crate::allocate::auto_spread;
use crate::coverage::{Coverage, check_coverage};
use crate::error::{TableError, TableResult};
use crate::outcome::OutcomeRange;

/// Which bound of a band an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// The lower bound.
    Min,
    /// The upper bound.
    Max,
}

/// An ordered, never-empty list of outcome bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<OutcomeRange>", into = "Vec<OutcomeRange>")]
pub struct OutcomeList {
    ranges: Vec<OutcomeRange>,
}

impl Default for OutcomeList {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeList {
    /// A list holding one unset band.
    pub fn new() -> Self {
        Self {
            ranges: vec![OutcomeRange::unset()],
        }
    }

    /// Build a list from bands; an empty input yields [`OutcomeList::new`].
    pub fn from_ranges(ranges: Vec<OutcomeRange>) -> Self {
        if ranges.is_empty() {
            Self::new()
        } else {
            Self { ranges }
        }
    }

    /// The bands, in order.
    pub fn ranges(&self) -> &[OutcomeRange] {
        &self.ranges
    }

    /// Iterate over the bands.
    pub fn iter(&self) -> std::slice::Iter<'_, OutcomeRange> {
        self.ranges.iter()
    }

    /// Number of bands (always at least one).
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The band at `index`.
    pub fn get(&self, index: usize) -> Option<&OutcomeRange> {
        self.ranges.get(index)
    }

    fn get_mut(&mut self, index: usize) -> TableResult<&mut OutcomeRange> {
        let len = self.ranges.len();
        self.ranges
            .get_mut(index)
            .ok_or(TableError::OutcomeIndex { index, len })
    }

    /// Append a band and return its index.
    pub fn push(&mut self, range: OutcomeRange) -> usize {
        self.ranges.push(range);
        self.ranges.len() - 1
    }

    /// Append an unset band and return its index.
    pub fn push_unset(&mut self) -> usize {
        self.push(OutcomeRange::unset())
    }

    /// Remove the band at `index`. Removing the last band leaves a single
    /// unset `"Outcome 1"` in its place.
    pub fn remove(&mut self, index: usize) -> TableResult<OutcomeRange> {
        self.get_mut(index)?;
        let removed = self.ranges.remove(index);
        if self.ranges.is_empty() {
            self.ranges.push(OutcomeRange::new("Outcome 1"));
        }
        Ok(removed)
    }

    /// Flip the lock flag; returns the new state.
    pub fn toggle_lock(&mut self, index: usize) -> TableResult<bool> {
        let range = self.get_mut(index)?;
        range.locked = !range.locked;
        Ok(range.locked)
    }

    /// Replace a band's label.
    pub fn set_label(&mut self, index: usize, label: &str) -> TableResult<()> {
        self.get_mut(index)?.set_label(label);
        Ok(())
    }

    /// Set or clear one bound directly.
    pub fn set_bound(&mut self, index: usize, edge: Edge, value: Option<i64>) -> TableResult<()> {
        let range = self.get_mut(index)?;
        match edge {
            Edge::Min => range.min = value,
            Edge::Max => range.max = value,
        }
        Ok(())
    }

    /// Move one bound by `delta`, clamped into `span`.
    ///
    /// An unset bound starts from the matching span edge. The other bound
    /// is pushed along if the band would otherwise invert.
    pub fn nudge_edge(
        &mut self,
        index: usize,
        edge: Edge,
        delta: i64,
        span: Span,
    ) -> TableResult<()> {
        let range = self.get_mut(index)?;
        let (current, other) = match edge {
            Edge::Min => (range.min.unwrap_or(span.min), range.max.unwrap_or(span.max)),
            Edge::Max => (range.max.unwrap_or(span.max), range.min.unwrap_or(span.min)),
        };
        let next = span.clamp(current + delta);
        let (min, max) = match edge {
            Edge::Min => (next, next.max(other)),
            Edge::Max => (next.min(other), next),
        };
        range.min = Some(min);
        range.max = Some(max);
        Ok(())
    }

    /// Move a whole band by `delta`, clamped into `span`.
    ///
    /// Returns `false` (and changes nothing) when the band is unset. A band
    /// pushed against a span edge loses width rather than leaving the span.
    pub fn shift(&mut self, index: usize, delta: i64, span: Span) -> TableResult<bool> {
        let range = self.get_mut(index)?;
        let Some((min, max)) = range.bounds() else {
            return Ok(false);
        };
        let mut new_min = span.clamp(min + delta);
        let mut new_max = span.clamp(max + delta);
        if new_min > new_max {
            let width = max - min;
            new_min = clamp_to(new_min, span.min, span.max - width);
            new_max = new_min + width;
        }
        range.min = Some(new_min);
        range.max = Some(new_max);
        Ok(true)
    }

    /// Replace every band's bounds with an auto-spread over `distribution`.
    pub fn auto_spread(&mut self, distribution: &Distribution) {
        self.ranges = auto_spread(&self.ranges, distribution);
    }

    /// Whether every band is set, ordered, and inside `span`.
    pub fn is_valid_for(&self, span: Span) -> bool {
        self.ranges.iter().all(|r| {
            r.bounds()
                .is_some_and(|(min, max)| min <= max && span.contains(min) && span.contains(max))
        })
    }

    /// Bands ready for display against `distribution`.
    ///
    /// Auto-spreads first when any band is invalid for the span, then
    /// clamps each band into the span and orders its bounds.
    pub fn resolve(&mut self, distribution: &Distribution) -> Vec<OutcomeRange> {
        let span = distribution.span();
        if !self.is_valid_for(span) {
            self.auto_spread(distribution);
        }
        self.ranges
            .iter()
            .map(|r| {
                let (a, b) = r.clamped(span);
                OutcomeRange {
                    min: Some(a.min(b)),
                    max: Some(a.max(b)),
                    ..r.clone()
                }
            })
            .collect()
    }

    /// Coverage of the distribution's totals by the bands as they stand.
    pub fn coverage(&self, distribution: &Distribution) -> Coverage {
        check_coverage(&self.ranges, distribution.totals())
    }
}

impl From<Vec<OutcomeRange>> for OutcomeList {
    fn from(ranges: Vec<OutcomeRange>) -> Self {
        Self::from_ranges(ranges)
    }
}

impl From<OutcomeList> for Vec<OutcomeRange> {
    fn from(list: OutcomeList) -> Self {
        list.ranges
    }
}

impl<'a> IntoIterator for &'a OutcomeList {
    type Item = &'a OutcomeRange;
    type IntoIter = std::slice::Iter<'a, OutcomeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

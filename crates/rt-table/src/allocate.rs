//! Auto-spread: allocate contiguous bands over a distribution's span.
//!
//! Locked bands are fixed anchors. The outcome list is cut into maximal
//! runs of unlocked bands between anchors (or span edges); each run is
//! split evenly over the space up to the next anchor, with the remainder
//! handed out one total at a time to the earliest bands of the run.

use tracing::debug;

use rt_core::span::clamp_to;
use rt_core::{Distribution, Span};

use crate::outcome::OutcomeRange;

/// Re-allocate `outcomes` over the span of `distribution`.
///
/// The result has the same length, order, labels and lock flags as the
/// input; only bounds change.
pub fn auto_spread(outcomes: &[OutcomeRange], distribution: &Distribution) -> Vec<OutcomeRange> {
    spread_over(outcomes, distribution.span(), distribution.len())
}

/// Re-allocate `outcomes` over `span`, which holds `reachable` achievable totals.
pub fn spread_over(outcomes: &[OutcomeRange], span: Span, reachable: usize) -> Vec<OutcomeRange> {
    let mut ranges: Vec<OutcomeRange> = outcomes
        .iter()
        .map(|o| {
            let (min, max) = o.clamped(span);
            OutcomeRange {
                min: Some(min),
                max: Some(max),
                ..o.clone()
            }
        })
        .collect();

    if ranges.is_empty() {
        return ranges;
    }

    if reachable <= ranges.len() && !ranges.iter().any(|o| o.locked) {
        even_split(&mut ranges, span);
    } else {
        fill_runs(&mut ranges, span);
    }
    ranges
}

/// Split `span` evenly over every band, left to right.
fn even_split(ranges: &mut [OutcomeRange], span: Span) {
    let count = ranges.len() as i64;
    let base = span.len() / count;
    let extra = span.len() % count;
    let last = ranges.len() - 1;
    let mut cursor = span.min;

    for (idx, range) in ranges.iter_mut().enumerate() {
        let width = base + i64::from((idx as i64) < extra);
        let end = if idx == last {
            span.max
        } else {
            span.max.min(cursor + width - 1)
        };
        place(range, cursor, end, span);
        cursor = end + 1;
    }
}

/// Write `start..=end` into `range`. A band left without room becomes the
/// empty `(m, m - 1)` with `m` pulled back inside the span.
fn place(range: &mut OutcomeRange, start: i64, end: i64, span: Span) {
    if end < start {
        let min = start.min(span.max);
        range.min = Some(min);
        range.max = Some(min - 1);
    } else {
        range.min = Some(start);
        range.max = Some(end);
    }
}

/// Keep locked anchors and tile the unlocked runs between them.
fn fill_runs(ranges: &mut [OutcomeRange], span: Span) {
    let mut cursor = span.min;
    let mut i = 0;

    while i < ranges.len() {
        if ranges[i].locked {
            let (min, max) = ranges[i].clamped(span);
            let start = clamp_to(min, cursor, span.max);
            let end = clamp_to(max, start, span.max);
            ranges[i].min = Some(start);
            ranges[i].max = Some(end);
            cursor = end + 1;
            i += 1;
            continue;
        }

        let run_end = (i..ranges.len())
            .find(|&j| ranges[j].locked)
            .unwrap_or(ranges.len());
        let segments = (run_end - i) as i64;
        let next_anchor = ranges
            .get(run_end)
            .map_or(span.max + 1, |anchor| anchor.clamped(span).0);
        let available_end = (next_anchor - 1).min(span.max);
        let available = (available_end - cursor + 1).max(0);

        if available == 0 {
            debug!(first = i, segments, "no room left for unlocked run");
            i = run_end;
            continue;
        }

        let base = available / segments;
        let mut remainder = available - base * segments;
        for range in &mut ranges[i..run_end] {
            let mut width = base;
            if remainder > 0 {
                width += 1;
                remainder -= 1;
            }
            let end = (cursor + width - 1).min(available_end);
            place(range, cursor, end, span);
            cursor = end + 1;
        }
        i = run_end;
    }
}

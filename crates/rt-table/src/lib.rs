//! Random-table outcome bands for Rolltable.
//!
//! Maps the totals of a [`Distribution`](rt_core::Distribution) onto named,
//! inclusive outcome bands. Bands can be edited one at a time, locked in
//! place, or auto-spread over the achievable span; a coverage check reports
//! totals that fall into no band or into several.

/// Auto-spread allocation of bands over a span.
pub mod allocate;
/// Gap and overlap detection.
pub mod coverage;
/// Error types used throughout the crate.
pub mod error;
/// The editable, never-empty list of bands.
pub mod list;
/// A single outcome band.
pub mod outcome;
/// Table rows, summaries, and clipboard export.
pub mod report;
/// The saved table state and its validation.
pub mod state;

/// Re-export allocation entry points.
pub use allocate::{auto_spread, spread_over};
/// Re-export coverage types.
pub use coverage::{Coverage, check_coverage};
/// Re-export error types.
pub use error::{TableError, TableResult};
/// Re-export list types.
pub use list::{Edge, OutcomeList};
/// Re-export outcome types.
pub use outcome::{MAX_LABEL_LEN, OutcomeRange};
/// Re-export report types.
pub use report::{
    Summary, TableRow, build_rows, format_approx_fraction, roll_label, to_clipboard_tsv,
};
/// Re-export state types.
pub use state::TableState;

//! Exact dice-total distributions for random-table design.
//!
//! Builds the full probability distribution of a dice pool's summed total,
//! optionally reduced by a keep/drop selection rule. Pools without a rule
//! are convolved die by die; pools with a rule are enumerated face by face
//! behind a capacity guard.

/// Engine limits (pool size, die sizes, enumeration capacity).
pub mod config;
/// Die types, pools, and single rolls.
pub mod dice;
/// The distribution engine and its result type.
pub mod distribution;
/// Error types used throughout the crate.
pub mod error;
/// Keep/drop selection rules applied to one roll.
pub mod rule;
/// Inclusive total spans and probability aggregation over them.
pub mod span;

/// Re-export configuration.
pub use config::EngineConfig;
/// Re-export dice types.
pub use dice::{DicePool, Die, DieResult, RollResult};
/// Re-export distribution types.
pub use distribution::{Distribution, TotalProbability};
/// Re-export error types.
pub use error::{DiceError, DiceResult, ErrorKind};
/// Re-export rule types.
pub use rule::{MAX_RULE_COUNT, RuleKind, SelectionRule};
/// Re-export span types.
pub use span::{Span, sum_probability};

/// Alias for `Result<T, DiceError>`.
pub type DiceResult<T> = Result<T, DiceError>;

/// Broad classification of a [`DiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected before any computation started.
    Validation,
    /// The computation would exceed the enumeration capacity.
    Capacity,
}

/// Errors that can occur when building pools or computing distributions.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// A die has a side count outside the supported range.
    #[error("dice must have between {min} and {max} sides (got {sides})")]
    InvalidSides {
        /// The rejected side count.
        sides: u32,
        /// Smallest accepted side count.
        min: u32,
        /// Largest accepted side count.
        max: u32,
    },

    /// The pool contains no dice.
    #[error("add at least one die to see the distribution")]
    EmptyPool,

    /// The pool holds more dice than the engine accepts.
    #[error("pool has {len} dice; the limit is {max}")]
    PoolTooLarge {
        /// Number of dice in the pool.
        len: usize,
        /// Largest accepted pool size.
        max: usize,
    },

    /// A dice notation term could not be read.
    #[error("invalid dice notation: \"{0}\"")]
    InvalidNotation(String),

    /// A rule name is not one of the known selection rules.
    #[error("unknown rule \"{0}\" (expected none, drop-low, drop-high, keep-low or keep-high)")]
    UnknownRule(String),

    /// A keep/drop rule would need to enumerate too many face combinations.
    #[error(
        "keep/drop rules are supported up to {limit} outcome combinations \
         ({combinations:.0} needed); reduce dice count or sides, or disable the rule"
    )]
    TooManyCombinations {
        /// Size of the sample space that would have been enumerated.
        combinations: f64,
        /// The configured enumeration limit.
        limit: u64,
    },
}

impl DiceError {
    /// Whether this error rejects the input or refuses the workload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManyCombinations { .. } => ErrorKind::Capacity,
            _ => ErrorKind::Validation,
        }
    }
}

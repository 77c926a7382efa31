pub mod check;
pub mod dist;
pub mod init;
pub mod roll;
pub mod table;

use std::path::Path;

use clap::Args;
use tracing::debug;

use rt_core::{DicePool, Distribution, MAX_RULE_COUNT, RuleKind};
use rt_table::{OutcomeList, OutcomeRange, TableState};

/// Inputs shared by every command that works on a whole table.
#[derive(Args)]
pub struct TableArgs {
    /// Dice pool, e.g. "3d6" or "2d20 + d8" (default: from --state, else 3d6)
    pub dice: Option<String>,

    /// Selection rule: none, drop-low, drop-high, keep-low, keep-high
    #[arg(short, long)]
    pub rule: Option<RuleKind>,

    /// How many dice the rule keeps or drops
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Outcome band: LABEL, LABEL=MIN..MAX or =MIN..MAX; a trailing ! locks it
    #[arg(short, long = "outcome")]
    pub outcomes: Vec<OutcomeRange>,

    /// Re-spread the bands over the achievable totals
    #[arg(long)]
    pub spread: bool,
}

/// A table ready to display: its state, distribution, and resolved bands.
pub struct Prepared {
    pub state: TableState,
    pub distribution: Distribution,
    pub ranges: Vec<OutcomeRange>,
}

/// Build the table state from `--state` and the command-line overrides,
/// then compute and resolve it.
fn prepare(state_path: Option<&Path>, args: &TableArgs) -> Result<Prepared, String> {
    let mut state = match state_path {
        Some(path) => TableState::load(path).map_err(|e| e.to_string())?,
        None => TableState::default(),
    };

    if let Some(dice) = &args.dice {
        state.dice_pool = DicePool::parse(dice).map_err(|e| e.to_string())?;
    }
    if let Some(rule) = args.rule {
        state.active_rule = rule;
    }
    if let Some(count) = args.count {
        state.active_rule_count = count.clamp(1, MAX_RULE_COUNT);
    }
    if !args.outcomes.is_empty() {
        state.outcomes = OutcomeList::from_ranges(args.outcomes.clone());
    }

    let distribution = state.distribution().map_err(|e| e.to_string())?;
    if args.spread {
        state.outcomes.auto_spread(&distribution);
    }
    let ranges = state.outcomes.resolve(&distribution);
    debug!(
        dice = %distribution.describe(),
        bands = ranges.len(),
        "table prepared"
    );

    Ok(Prepared {
        state,
        distribution,
        ranges,
    })
}

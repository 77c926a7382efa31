use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::TableArgs;

pub fn run(state_path: Option<&Path>, args: &TableArgs, seed: Option<u64>) -> Result<(), String> {
    let prepared = super::prepare(state_path, args)?;
    let rule = prepared.state.rule();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let roll = prepared.state.pool().roll(&mut rng);
    let total = roll.kept_total(&rule);

    println!(
        "  {} {}{}: {}",
        "Rolled".bold(),
        prepared.state.pool().describe(),
        rule.describe(),
        roll
    );
    if rule.is_active() {
        println!("  Kept total: {}", total.to_string().bold());
    }

    match prepared
        .ranges
        .iter()
        .enumerate()
        .find(|(_, range)| range.contains(total))
    {
        Some((idx, range)) => println!(
            "  {} {} {}",
            "Outcome:".bold(),
            range.display_label(idx).green(),
            format!("({})", range.range_text()).dimmed()
        ),
        None => println!("  {} {}", "Outcome:".bold(), "no band covers this total".yellow()),
    }

    Ok(())
}

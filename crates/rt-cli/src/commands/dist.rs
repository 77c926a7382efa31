use colored::Colorize;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use rt_core::{DicePool, Distribution, RuleKind, SelectionRule};
use rt_table::{Summary, format_approx_fraction};

pub fn run(dice: &str, rule: RuleKind, count: u32, json: bool) -> Result<(), String> {
    let pool = DicePool::parse(dice).map_err(|e| e.to_string())?;
    let distribution =
        Distribution::compute(&pool, SelectionRule::new(rule, count)).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&distribution)
            .map_err(|e| format!("cannot encode distribution: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    let summary = Summary::of(&distribution);
    println!("  {} {}", "Dice:".bold(), summary.dice);
    println!("  {} {:.2}", "Mean:".bold(), summary.mean);
    println!("  {} {}", "Range:".bold(), summary.range_text());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Total", "Ways", "Probability", "Odds"]);
    for entry in distribution.entries() {
        table.add_row(vec![
            entry.total.to_string(),
            format!("{:.0}", entry.count),
            format!("{:.2}%", entry.probability * 100.0),
            format_approx_fraction(entry.probability),
        ]);
    }
    for idx in 0..3 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!("{table}");
    println!();
    println!(
        "  {} totals, {:.0} combinations",
        distribution.len(),
        distribution.total_outcomes()
    );

    Ok(())
}

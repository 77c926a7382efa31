use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rt_table::{Summary, build_rows, check_coverage, roll_label, to_clipboard_tsv};

use super::{Prepared, TableArgs};

pub fn run(
    state_path: Option<&Path>,
    args: &TableArgs,
    tsv: bool,
    save: Option<&Path>,
) -> Result<(), String> {
    let Prepared {
        state,
        distribution,
        ranges,
    } = super::prepare(state_path, args)?;

    if tsv {
        println!("{}", to_clipboard_tsv(&ranges, &distribution));
    } else {
        let summary = Summary::of(&distribution);
        println!(
            "  {} '{}' {}",
            "Table".bold(),
            summary.dice,
            format!("(mean {:.2}, range {})", summary.mean, summary.range_text()).dimmed()
        );
        println!();

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![roll_label(&distribution), "Outcome".into(), "Probability".into()]);
        for row in build_rows(&ranges, &distribution) {
            let probability = row.probability_text();
            table.add_row(vec![row.range_text, row.label, probability]);
        }
        println!("{table}");
        println!();

        let coverage = check_coverage(&ranges, distribution.totals());
        if coverage.is_complete() {
            println!("  {}", coverage.summary().green());
        } else {
            println!("  {}", coverage.summary().yellow());
        }
    }

    if let Some(path) = save {
        state.save(path).map_err(|e| e.to_string())?;
        eprintln!("  Saved table state to {}", path.display());
    }

    Ok(())
}

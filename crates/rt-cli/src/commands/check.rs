use std::path::Path;

use rt_table::check_coverage;

use super::TableArgs;

pub fn run(state_path: Option<&Path>, args: &TableArgs) -> Result<(), String> {
    let prepared = super::prepare(state_path, args)?;
    let coverage = check_coverage(&prepared.ranges, prepared.distribution.totals());

    println!("  {}", coverage.summary());

    if coverage.is_complete() {
        Ok(())
    } else {
        Err(format!(
            "{} uncovered, {} overlapping totals",
            coverage.uncovered.len(),
            coverage.overlapping.len()
        ))
    }
}

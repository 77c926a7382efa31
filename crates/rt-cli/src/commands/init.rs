use std::path::Path;

use rt_table::TableState;

pub fn run(file: &Path) -> Result<(), String> {
    if file.exists() {
        return Err(format!("'{}' already exists", file.display()));
    }

    TableState::default()
        .save(file)
        .map_err(|e| e.to_string())?;

    println!("Created table state '{}'", file.display());
    println!("  3d6 with three bands: 3-6, 7-10, 11-18");
    println!();
    println!("Get started:");
    println!("  rt table --state {}           # Show the table", file.display());
    println!("  rt table --state {} --spread  # Re-spread the bands", file.display());
    println!("  rt roll --state {}            # Roll on it", file.display());

    Ok(())
}

//! Show command

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::path::PathBuf;

/// Summarize the merged catalog, or dump it as JSON
pub fn show(manifests: &[PathBuf], json: bool) -> Result<()> {
    let updates = crate::load_updates(manifests)?;

    if json {
        let out = serde_json::to_string_pretty(&updates).context("Failed to encode catalog")?;
        println!("{out}");
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        updates.application_name.as_str().white().bold(),
        updates.application_version.as_str().dark_grey()
    );
    println!();

    for update in updates.packages() {
        super::print_package_row(update);
    }

    println!();
    println!("{} packages", updates.len());
    Ok(())
}

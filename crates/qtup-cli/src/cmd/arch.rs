//! Arch command

use anyhow::Result;
use crossterm::style::Stylize;
use std::path::PathBuf;

/// List packages built for `arch`, in manifest order
pub fn arch(arch: &str, manifests: &[PathBuf]) -> Result<()> {
    let updates = crate::load_updates(manifests)?;
    let matches = updates.for_arch(arch);

    if matches.is_empty() {
        println!();
        println!("  No packages match architecture '{}'", arch.white());
        println!();
        return Ok(());
    }

    println!();
    for update in &matches {
        super::print_package_row(update);
    }
    println!();
    println!("{} packages for {arch}", matches.len());
    Ok(())
}

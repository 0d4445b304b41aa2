//! Modules command
//!
//! Walks the packages for one architecture the way an installer does and
//! marks each requested module complete as soon as one of its candidate
//! identifiers shows up.

use anyhow::{Result, bail};
use crossterm::style::Stylize;
use qtup_core::ModuleToPackage;
use std::path::PathBuf;

/// Report which modules are provided for `arch`; fail if any are not.
pub fn modules(
    arch: &str,
    manifests: &[PathBuf],
    modules: Vec<(String, Vec<String>)>,
) -> Result<()> {
    let updates = crate::load_updates(manifests)?;
    let mut pending = ModuleToPackage::from_map(modules)?;

    println!();
    for update in updates.for_arch(arch) {
        if !pending.has_package(&update.name) {
            continue;
        }
        let module = pending.remove_module_for_package(&update.name)?;
        println!("  {} {} {}", "✓".green(), module.white(), update.name.as_str().dark_grey());
    }
    println!();

    if !pending.is_empty() {
        bail!("Modules not found for {arch}: {pending}");
    }
    Ok(())
}

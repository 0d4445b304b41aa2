//! Deps command

use anyhow::{Context, Result};
use qtup_core::dependency_closure;
use std::path::PathBuf;

/// Print the dependency closure of `target`.
///
/// Output is one identifier per line in traversal order, repeats included,
/// so it can be piped into other tools.
pub fn deps(target: &str, manifests: &[PathBuf], json: bool) -> Result<()> {
    let updates = crate::load_updates(manifests)?;

    if updates.find(target).next().is_none() {
        tracing::warn!(package = %target, "package not present in any manifest");
    }

    let packages = dependency_closure(&updates, target);

    if json {
        let out = serde_json::to_string_pretty(&packages).context("Failed to encode closure")?;
        println!("{out}");
    } else {
        for package in &packages {
            println!("{package}");
        }
    }
    Ok(())
}

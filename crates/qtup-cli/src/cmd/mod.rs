//! Subcommand implementations.

pub mod arch;
pub mod deps;
pub mod modules;
pub mod show;

use crossterm::style::Stylize;
use qtup_schema::PackageUpdate;

const NAME_WIDTH: usize = 48;
const VERSION_WIDTH: usize = 24;

/// Print one aligned package row: name, version, flags and display name.
fn print_package_row(update: &PackageUpdate) {
    let mut flags = Vec::new();
    if update.is_default {
        flags.push("default");
    }
    if update.is_virtual {
        flags.push("virtual");
    }

    let name_part = format!("{:<NAME_WIDTH$}", update.name.as_str());
    let version_part = format!("{:<VERSION_WIDTH$}", update.version);
    println!(
        "  {} {} {:<16} {}",
        name_part.white(),
        version_part.dark_grey(),
        flags.join(","),
        update.display_name.as_str().dark_grey()
    );
}

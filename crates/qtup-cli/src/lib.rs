//! qtup - Qt Updates.xml inspector
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Reads one or more `Updates.xml` manifests from disk, merges them in the
//! order given, and hands the catalog to `qtup-core`.
//!
//! # Commands
//!
//! - `qtup show`: catalog summary, or the whole catalog as JSON
//! - `qtup arch`: packages built for one architecture suffix
//! - `qtup deps`: dependency closure of a package
//! - `qtup modules`: check that every requested module has a package

pub mod cmd;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qtup_schema::Updates;
use std::path::{Path, PathBuf};

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "qtup")]
#[command(author, version, about = "qtup - inspect Qt Updates.xml manifests")]
pub struct Cli {
    /// Log at debug level when RUST_LOG is not set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize the merged catalog
    Show {
        /// Updates.xml file(s), merged in order
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// List packages whose name ends with an architecture suffix
    Arch {
        /// Architecture suffix (e.g. win64_msvc2019_64)
        arch: String,
        /// Updates.xml file(s), merged in order
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },
    /// Print the dependency closure of a package, one identifier per line
    Deps {
        /// Package identifier (e.g. qt.qt6.622.qtcharts.gcc_64)
        target: String,
        /// Updates.xml file(s), merged in order
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Print the closure as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Check that each module is provided by a package for an architecture
    Modules {
        /// Architecture suffix to scan
        arch: String,
        /// Updates.xml file(s), merged in order
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Module and its candidate identifiers: NAME=ID[,ID...]
        #[arg(long = "module", short = 'm', required = true, value_parser = parse_module_spec)]
        modules: Vec<(String, Vec<String>)>,
    },
}

/// Read and merge manifests in the order given.
///
/// The first manifest's application name and version are kept.
pub fn load_updates(paths: &[PathBuf]) -> Result<Updates> {
    let mut paths = paths.iter();
    let first = paths.next().context("No manifest given")?;

    let mut updates = read_manifest(first)?;
    for path in paths {
        updates.extend(read_manifest(path)?);
    }

    tracing::debug!(packages = updates.len(), "loaded manifests");
    Ok(updates)
}

fn read_manifest(path: &Path) -> Result<Updates> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Updates::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse `NAME=ID[,ID...]` into a module name and its candidates.
///
/// # Example
///
/// ```
/// use qtup_cli::parse_module_spec;
///
/// let (name, ids) = parse_module_spec("qtcharts=qt.qt6.620.qtcharts.gcc_64, qt.qt6.620.addons.qtcharts.gcc_64").unwrap();
/// assert_eq!(name, "qtcharts");
/// assert_eq!(ids, vec!["qt.qt6.620.qtcharts.gcc_64", "qt.qt6.620.addons.qtcharts.gcc_64"]);
/// assert!(parse_module_spec("qtcharts").is_err());
/// ```
pub fn parse_module_spec(spec: &str) -> Result<(String, Vec<String>), String> {
    let (name, ids) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=ID[,ID...], got '{spec}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing module name in '{spec}'"));
    }

    let ids: Vec<String> = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(format!("module '{name}' has no package identifiers"));
    }

    Ok((name.to_string(), ids))
}

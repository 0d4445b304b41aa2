//! Core library for qtup.
//!
//! Works on catalogs produced by `qtup-schema`:
//!
//! - [`resolver`] computes the dependency closure of a package identifier.
//! - [`module_map`] tracks which logical modules are still waiting for one of
//!   their candidate packages to be installed.

pub mod module_map;
pub mod resolver;

pub use module_map::{ModuleMapError, ModuleToPackage};
pub use resolver::dependency_closure;

// Re-exported so callers only need one crate for the common path.
pub use qtup_schema::{ManifestError, PackageId, PackageUpdate, Updates};

//! Bidirectional module ⇄ package tracking.
//!
//! A module such as `qtcharts` may appear under several package identifiers
//! depending on the Qt release (`qt.qt6.620.addons.qtcharts.<arch>`,
//! `qt.qt6.620.qtcharts.<arch>`, ...). An installer seeds a
//! [`ModuleToPackage`] with every spelling it might encounter, then calls
//! [`ModuleToPackage::remove_module_for_package`] whenever it installs one
//! of them. Whatever is left afterwards was never found.

use qtup_schema::PackageId;
use std::collections::HashMap;
use std::fmt;

/// Errors returned by [`ModuleToPackage`] operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModuleMapError {
    /// A candidate identifier is already claimed by another module.
    #[error(
        "Detected a package name collision: '{package}' belongs to module '{existing}', not '{requested}'"
    )]
    Collision {
        /// The contested identifier.
        package: PackageId,
        /// Module that already owns it.
        existing: String,
        /// Module that tried to claim it.
        requested: String,
    },

    /// The identifier is not a candidate of any pending module.
    #[error("Package '{0}' does not belong to any pending module")]
    UnknownPackage(String),
}

/// Pending modules and the package identifiers that can satisfy them.
///
/// The reverse map is kept as the exact inverse of the forward map: every
/// identifier belongs to at most one module, and removing a module removes
/// all of its identifiers at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleToPackage {
    modules_to_packages: HashMap<String, Vec<PackageId>>,
    packages_to_modules: HashMap<PackageId, String>,
}

impl ModuleToPackage {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an index from `module -> candidates` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleMapError::Collision`] if two modules list the same
    /// identifier.
    pub fn from_map<I, C, P>(initial: I) -> Result<Self, ModuleMapError>
    where
        I: IntoIterator<Item = (String, C)>,
        C: IntoIterator<Item = P>,
        P: Into<PackageId>,
    {
        let mut map = Self::new();
        for (module, candidates) in initial {
            map.add(&module, candidates)?;
        }
        Ok(map)
    }

    /// Append `candidates` to `module`, creating the module if needed.
    ///
    /// Identifiers the module already owns are skipped. Every candidate is
    /// checked before anything is inserted, so a failed call changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleMapError::Collision`] if any candidate belongs to a
    /// different module.
    pub fn add<C, P>(&mut self, module: &str, candidates: C) -> Result<(), ModuleMapError>
    where
        C: IntoIterator<Item = P>,
        P: Into<PackageId>,
    {
        let candidates: Vec<PackageId> = candidates.into_iter().map(Into::into).collect();

        for package in &candidates {
            let owner = self.packages_to_modules.get(package);
            if let Some(existing) = owner.filter(|existing| existing.as_str() != module) {
                return Err(ModuleMapError::Collision {
                    package: package.clone(),
                    existing: existing.clone(),
                    requested: module.to_string(),
                });
            }
        }

        let owned = self
            .modules_to_packages
            .entry(module.to_string())
            .or_default();
        for package in candidates {
            if self.packages_to_modules.contains_key(&package) {
                continue;
            }
            self.packages_to_modules
                .insert(package.clone(), module.to_string());
            owned.push(package);
        }

        tracing::debug!(module, candidates = owned.len(), "tracking module");
        Ok(())
    }

    /// Drop the module that owns `package`, along with all of its candidates.
    ///
    /// Returns the removed module's name.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleMapError::UnknownPackage`] if no pending module lists
    /// `package`.
    pub fn remove_module_for_package(&mut self, package: &str) -> Result<String, ModuleMapError> {
        let module = self
            .packages_to_modules
            .get(package)
            .cloned()
            .ok_or_else(|| ModuleMapError::UnknownPackage(package.to_string()))?;

        let candidates = self
            .modules_to_packages
            .remove(&module)
            .unwrap_or_default();
        for candidate in &candidates {
            self.packages_to_modules.remove(candidate);
        }

        tracing::debug!(
            module = %module,
            package,
            released = candidates.len(),
            "module satisfied"
        );
        Ok(module)
    }

    /// Whether `package` is a candidate of some pending module.
    pub fn has_package(&self, package: &str) -> bool {
        self.packages_to_modules.contains_key(package)
    }

    /// The pending module that lists `package`, if any.
    pub fn module_for_package(&self, package: &str) -> Option<&str> {
        self.packages_to_modules.get(package).map(String::as_str)
    }

    /// Candidate identifiers of `module`, in insertion order.
    pub fn candidates(&self, module: &str) -> Option<&[PackageId]> {
        self.modules_to_packages.get(module).map(Vec::as_slice)
    }

    /// Names of the modules still pending, in no particular order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules_to_packages.keys().map(String::as_str)
    }

    /// Pending module names, sorted.
    pub fn pending_modules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules().collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Number of pending modules.
    pub fn len(&self) -> usize {
        self.modules_to_packages.len()
    }

    /// Whether every module has been satisfied.
    pub fn is_empty(&self) -> bool {
        self.modules_to_packages.is_empty()
    }
}

impl fmt::Display for ModuleToPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.pending_modules())
    }
}

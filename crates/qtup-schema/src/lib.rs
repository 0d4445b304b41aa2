//! Shared types and manifest parsing for qtup.
//!
//! A Qt online repository publishes one `Updates.xml` per component tree.
//! This crate turns that document into an [`Updates`] catalog of
//! [`PackageUpdate`] records. Traversal over the catalog lives in
//! `qtup-core`.
//!
//! # Example
//!
//! ```
//! use qtup_schema::Updates;
//!
//! let xml = r#"
//! <Updates>
//!   <ApplicationName>{AnyApplication}</ApplicationName>
//!   <ApplicationVersion>1.0.0</ApplicationVersion>
//!   <PackageUpdate>
//!     <Name>qt.qt6.622.gcc_64</Name>
//!     <Dependencies>qt.tools.qtcreator, qt.qt6.622.doc</Dependencies>
//!     <Default>true</Default>
//!   </PackageUpdate>
//! </Updates>"#;
//!
//! let updates = Updates::parse(xml).unwrap();
//! assert_eq!(updates.application_version, "1.0.0");
//! assert_eq!(updates.for_arch("gcc_64").len(), 1);
//! assert!(updates.packages()[0].is_default);
//! ```

pub mod error;
pub mod types;
pub mod updates;
mod xml;

// Re-exports
pub use error::ManifestError;
pub use types::PackageId;
pub use updates::{PackageUpdate, Updates};

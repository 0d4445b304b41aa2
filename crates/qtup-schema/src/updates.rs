//! The `Updates.xml` catalog.
//!
//! An [`Updates`] document carries two required metadata fields and an
//! ordered list of [`PackageUpdate`] records. Records keep document order,
//! and identifiers are not required to be unique.

use crate::error::ManifestError;
use crate::types::PackageId;
use crate::xml::{self, Element};
use serde::{Deserialize, Serialize};

/// One `<PackageUpdate>` entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageUpdate {
    /// Architecture-suffixed identifier (e.g. `qt.qt5.5140.qtcharts.win32_mingw73`).
    pub name: PackageId,

    /// Human-readable name shown by installers.
    pub display_name: String,

    /// Free-form description.
    pub description: String,

    /// Release date as written in the manifest (not parsed).
    pub release_date: String,

    /// Version string as written in the manifest (not compared).
    pub version: String,

    /// Identifiers this package requires. `None` when the manifest omits the
    /// element or leaves it empty.
    pub dependencies: Option<Vec<PackageId>>,

    /// Identifiers whose installation pulls this package in automatically.
    pub auto_dependon: Option<Vec<PackageId>>,

    /// Archive file names that make up this package.
    pub downloadable_archives: Option<Vec<String>>,

    /// Selected by default in installers.
    #[serde(rename = "default")]
    pub is_default: bool,

    /// Hidden from installers' component trees.
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

impl PackageUpdate {
    /// Dependencies as a slice; empty when the field is absent.
    pub fn dependency_ids(&self) -> &[PackageId] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    fn from_element(element: &Element) -> Self {
        Self {
            name: PackageId::new(text_of(element, "Name")),
            display_name: text_of(element, "DisplayName"),
            description: text_of(element, "Description"),
            release_date: text_of(element, "ReleaseDate"),
            version: text_of(element, "Version"),
            dependencies: list_of(element, "Dependencies")
                .map(|items| items.into_iter().map(PackageId::from).collect()),
            auto_dependon: list_of(element, "AutoDependOn")
                .map(|items| items.into_iter().map(PackageId::from).collect()),
            downloadable_archives: list_of(element, "DownloadableArchives"),
            is_default: flag_of(element, "Default"),
            is_virtual: flag_of(element, "Virtual"),
        }
    }
}

/// A parsed `Updates.xml` document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Updates {
    /// Text of the root's `<ApplicationName>`.
    pub application_name: String,

    /// Text of the root's `<ApplicationVersion>`.
    pub application_version: String,

    /// Every `<PackageUpdate>` in document order.
    pub package_updates: Vec<PackageUpdate>,
}

impl Updates {
    /// Parse manifest text into a catalog.
    ///
    /// `<PackageUpdate>` elements are collected at any depth. Missing
    /// per-package fields fall back to empty strings, `None` lists and
    /// `false` flags.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Syntax`] or [`ManifestError::Malformed`] if
    /// the text is not a well-formed XML document, and
    /// [`ManifestError::MissingField`] if the root lacks
    /// `<ApplicationName>` or `<ApplicationVersion>`.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let root = xml::parse_document(text)?;

        let application_name = required_text(&root, "ApplicationName")?;
        let application_version = required_text(&root, "ApplicationVersion")?;
        let package_updates: Vec<PackageUpdate> = root
            .descendants("PackageUpdate")
            .map(PackageUpdate::from_element)
            .collect();

        tracing::debug!(
            application = %application_name,
            version = %application_version,
            packages = package_updates.len(),
            "parsed Updates.xml"
        );

        Ok(Self {
            application_name,
            application_version,
            package_updates,
        })
    }

    /// All records in document order.
    pub fn packages(&self) -> &[PackageUpdate] {
        &self.package_updates
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.package_updates.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.package_updates.is_empty()
    }

    /// Records whose name ends with `arch`, in catalog order.
    ///
    /// The match is a literal suffix test; an unknown suffix yields an empty
    /// list.
    pub fn for_arch(&self, arch: &str) -> Vec<&PackageUpdate> {
        self.package_updates
            .iter()
            .filter(|update| update.name.has_arch(arch))
            .collect()
    }

    /// Every record named exactly `name`. Usually zero or one, but duplicate
    /// names in a manifest are kept.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PackageUpdate> + 'a {
        self.package_updates
            .iter()
            .filter(move |update| update.name == name)
    }

    /// Append the records of `other` after this catalog's records.
    ///
    /// Metadata is not reconciled: this catalog's application name and
    /// version are kept.
    pub fn extend(&mut self, other: Updates) {
        self.package_updates.extend(other.package_updates);
    }
}

impl std::str::FromStr for Updates {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn required_text(root: &Element, name: &'static str) -> Result<String, ManifestError> {
    root.child(name)
        .map(|element| element.text().unwrap_or_default().to_string())
        .ok_or(ManifestError::MissingField(name))
}

fn text_of(element: &Element, name: &str) -> String {
    element
        .child(name)
        .and_then(Element::text)
        .unwrap_or_default()
        .to_string()
}

fn list_of(element: &Element, name: &str) -> Option<Vec<String>> {
    let text = element.child(name).and_then(Element::text)?;
    if text.is_empty() {
        return None;
    }
    Some(split_list(text))
}

/// Split on commas and trim each piece. Empty pieces are kept.
fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(|item| item.trim().to_string()).collect()
}

/// Only the exact text `true` is true.
fn flag_of(element: &Element, name: &str) -> bool {
    element.child(name).and_then(Element::text) == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(body: &str) -> String {
        format!(
            "<Updates><ApplicationName>{{AnyApplication}}</ApplicationName>\
             <ApplicationVersion>1.0.0</ApplicationVersion>{body}</Updates>"
        )
    }

    fn single(body: &str) -> PackageUpdate {
        let updates = Updates::parse(&manifest(&format!("<PackageUpdate>{body}</PackageUpdate>")))
            .unwrap();
        assert_eq!(updates.len(), 1);
        updates.package_updates.into_iter().next().unwrap()
    }

    #[test]
    fn reads_metadata_verbatim() {
        let updates = Updates::parse(&manifest("")).unwrap();
        assert_eq!(updates.application_name, "{AnyApplication}");
        assert_eq!(updates.application_version, "1.0.0");
        assert!(updates.is_empty());
    }

    #[test]
    fn missing_application_name_fails() {
        let err = Updates::parse(
            "<Updates><ApplicationVersion>1.0.0</ApplicationVersion></Updates>",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::MissingField("ApplicationName")));
        assert!(!err.is_syntax());
    }

    #[test]
    fn missing_application_version_fails() {
        let err =
            Updates::parse("<Updates><ApplicationName>x</ApplicationName></Updates>").unwrap_err();
        assert!(matches!(err, ManifestError::MissingField("ApplicationVersion")));
    }

    #[test]
    fn nested_application_name_does_not_count() {
        let err = Updates::parse(
            "<Updates><Meta><ApplicationName>x</ApplicationName></Meta>\
             <ApplicationVersion>1</ApplicationVersion></Updates>",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::MissingField("ApplicationName")));
    }

    #[test]
    fn empty_application_name_is_empty_string() {
        let updates = Updates::parse(
            "<Updates><ApplicationName/><ApplicationVersion>1</ApplicationVersion></Updates>",
        )
        .unwrap();
        assert_eq!(updates.application_name, "");
    }

    #[test]
    fn malformed_markup_is_a_syntax_error() {
        let err = Updates::parse("<Updates><ApplicationName>x</Updates>").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn missing_scalars_default_to_empty() {
        let update = single("<Name>qt.tools.qtcreator</Name>");
        assert_eq!(update.name, "qt.tools.qtcreator");
        assert_eq!(update.display_name, "");
        assert_eq!(update.description, "");
        assert_eq!(update.release_date, "");
        assert_eq!(update.version, "");
    }

    #[test]
    fn lists_are_split_and_trimmed() {
        let update = single(
            "<Name>a</Name><Dependencies>a, b ,c</Dependencies>\
             <AutoDependOn>qt.tools, qt.qt5</AutoDependOn>\
             <DownloadableArchives>x.7z,y.7z</DownloadableArchives>",
        );
        assert_eq!(update.dependencies.unwrap(), vec!["a", "b", "c"]);
        assert_eq!(update.auto_dependon.unwrap(), vec!["qt.tools", "qt.qt5"]);
        assert_eq!(update.downloadable_archives.unwrap(), vec!["x.7z", "y.7z"]);
    }

    #[test]
    fn absent_or_empty_lists_are_none() {
        let update = single("<Name>a</Name><Dependencies></Dependencies><AutoDependOn/>");
        assert_eq!(update.dependencies, None);
        assert_eq!(update.auto_dependon, None);
        assert_eq!(update.downloadable_archives, None);
        assert!(update.dependency_ids().is_empty());
    }

    #[test]
    fn empty_tokens_between_commas_are_kept() {
        let update = single("<Name>a</Name><Dependencies>a,,b, </Dependencies>");
        assert_eq!(update.dependencies.unwrap(), vec!["a", "", "b", ""]);
    }

    #[test]
    fn whitespace_only_list_is_one_empty_token() {
        let update = single("<Name>a</Name><Dependencies>  </Dependencies>");
        assert_eq!(update.dependencies.clone().unwrap(), vec![""]);
        assert_eq!(update.dependency_ids(), [""]);
    }

    #[test]
    fn windows_line_endings_are_normalized() {
        let update = single("<Name>a</Name>\r\n<Description>line1\r\nline2</Description>\r\n");
        assert_eq!(update.description, "line1\nline2");
    }

    #[test]
    fn flags_require_exact_true() {
        assert!(single("<Default>true</Default>").is_default);
        assert!(single("<Virtual>true</Virtual>").is_virtual);
        assert!(!single("<Default>True</Default>").is_default);
        assert!(!single("<Default>1</Default>").is_default);
        assert!(!single("<Virtual> true </Virtual>").is_virtual);
        let bare = single("<Name>a</Name>");
        assert!(!bare.is_default);
        assert!(!bare.is_virtual);
    }

    #[test]
    fn nested_package_updates_are_found_in_document_order() {
        let updates = Updates::parse(&manifest(
            "<PackageUpdate><Name>one</Name></PackageUpdate>\
             <Group><Inner><PackageUpdate><Name>two</Name></PackageUpdate></Inner></Group>\
             <PackageUpdate><Name>three</Name></PackageUpdate>",
        ))
        .unwrap();
        let names: Vec<&str> = updates.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn for_arch_filters_by_suffix_in_order() {
        let updates = Updates::parse(&manifest(
            "<PackageUpdate><Name>qt.qt5.5140.win32_mingw73</Name></PackageUpdate>\
             <PackageUpdate><Name>qt.qt5.5140.win64_msvc2017_64</Name></PackageUpdate>\
             <PackageUpdate><Name>qt.qt5.5140.qtcharts.win32_mingw73</Name></PackageUpdate>",
        ))
        .unwrap();

        let names: Vec<&str> = updates
            .for_arch("win32_mingw73")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["qt.qt5.5140.win32_mingw73", "qt.qt5.5140.qtcharts.win32_mingw73"]
        );
        assert!(updates.for_arch("android_armv7").is_empty());
    }

    #[test]
    fn find_returns_every_duplicate() {
        let updates = Updates::parse(&manifest(
            "<PackageUpdate><Name>dup</Name><Version>1</Version></PackageUpdate>\
             <PackageUpdate><Name>dup</Name><Version>2</Version></PackageUpdate>",
        ))
        .unwrap();
        let versions: Vec<&str> = updates.find("dup").map(|p| p.version.as_str()).collect();
        assert_eq!(versions, vec!["1", "2"]);
        assert_eq!(updates.find("missing").count(), 0);
    }

    #[test]
    fn extend_appends_and_keeps_left_metadata() {
        let mut left = Updates::parse(&manifest(
            "<PackageUpdate><Name>a</Name></PackageUpdate>\
             <PackageUpdate><Name>b</Name></PackageUpdate>",
        ))
        .unwrap();
        let right = Updates::parse(
            "<Updates><ApplicationName>other</ApplicationName>\
             <ApplicationVersion>2.0.0</ApplicationVersion>\
             <PackageUpdate><Name>b</Name></PackageUpdate>\
             <PackageUpdate><Name>c</Name></PackageUpdate></Updates>",
        )
        .unwrap();

        let expected: Vec<PackageUpdate> = left
            .packages()
            .iter()
            .chain(right.packages())
            .cloned()
            .collect();
        left.extend(right);

        assert_eq!(left.package_updates, expected);
        assert_eq!(left.application_name, "{AnyApplication}");
        assert_eq!(left.application_version, "1.0.0");
    }

    #[test]
    fn from_str_matches_parse() {
        let text = manifest("<PackageUpdate><Name>a</Name></PackageUpdate>");
        let parsed: Updates = text.parse().unwrap();
        assert_eq!(parsed, Updates::parse(&text).unwrap());
    }

    #[test]
    fn json_uses_manifest_flag_names() {
        let update = single("<Name>a</Name><Default>true</Default>");
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["default"], true);
        assert_eq!(value["virtual"], false);
        assert!(value["dependencies"].is_null());
    }
}

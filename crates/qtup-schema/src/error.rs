//! Errors raised while turning manifest text into a catalog.

/// Errors that can occur when parsing an `Updates.xml` manifest.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// The markup could not be tokenized (bad tag, bad entity, mismatched end tag).
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// The markup tokenized but does not form a single well-formed document.
    #[error("Malformed XML document: {0}")]
    Malformed(String),

    /// A required top-level element is missing from the document root.
    #[error("Malformed manifest: missing required element <{0}>")]
    MissingField(&'static str),
}

impl ManifestError {
    /// Whether this error means the input was not well-formed markup,
    /// as opposed to well-formed markup missing a required element.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_) | Self::Malformed(_))
    }
}

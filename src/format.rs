//! Input format routing by file extension.

use std::path::Path;

/// The input formats the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// `.bib`
    Bibtex,
    /// `.ris`
    Ris,
    /// `.xml` reference-manager export (Mendeley, EndNote)
    Xml,
    /// Anything else; converts to an empty document
    Unsupported,
}

impl SourceFormat {
    /// Classifies a file extension, without the leading dot. Case-insensitive.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bib" => SourceFormat::Bibtex,
            "ris" => SourceFormat::Ris,
            "xml" => SourceFormat::Xml,
            _ => SourceFormat::Unsupported,
        }
    }

    /// Classifies a path by its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(SourceFormat::Unsupported, Self::from_extension)
    }
}

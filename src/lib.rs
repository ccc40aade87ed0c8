//! Convert bibliographic references into Word bibliography XML.
//!
//! `bibxml` reads references from three common formats and writes them as
//! the Office Open XML bibliography document that word processors import
//! into their citation manager.
//!
//! # Key Features
//!
//! - **Multiple Format Support**: Parse references from:
//!   - BibTeX (via the `biblatex` crate)
//!   - RIS (Zotero, Mendeley, Google Scholar exports)
//!   - Reference-manager XML (Mendeley, EndNote)
//!
//! - **One Canonical Record**: every parser produces the same [`Entry`]
//!   shape, and one declared [`Defaults`] table fills whatever a source
//!   leaves out.
//!
//! - **Always-valid Output**: the writer emits every schema field for every
//!   source, so even sparse inputs import cleanly.
//!
//! # Basic Usage
//!
//! ```rust
//! use bibxml::{SourceFormat, convert};
//!
//! let input = b"TY  - ELEC\nTI  - Example Page\nUR  - https://example.com\nER  -\n";
//! let xml = convert(input, SourceFormat::Ris).unwrap();
//! assert!(String::from_utf8(xml).unwrap().contains("<b:Title>Example Page</b:Title>"));
//! ```
//!
//! # Parsers and Writer Separately
//!
//! ```rust
//! use bibxml::{EntryParser, RisParser, WordXmlWriter};
//!
//! let entries = RisParser::new().parse("TY  - JOUR\nER  -").unwrap();
//! assert_eq!(entries[0].title.as_deref(), Some("Untitled"));
//! let xml = WordXmlWriter::new().write(&entries).unwrap();
//! ```
//!
//! # Error Handling
//!
//! Missing fields are never errors. A conversion fails only when the input
//! document itself cannot be read:
//!
//! ```rust
//! use bibxml::{ConvertError, SourceFormat, convert};
//!
//! match convert(b"<records><record>", SourceFormat::Xml) {
//!     Ok(_) => unreachable!(),
//!     Err(ConvertError::Xml(msg)) => eprintln!("bad export: {msg}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```
//!
//! # Thread Safety
//!
//! Parsers and the writer hold no mutable state and can be shared between
//! threads. Each conversion owns its records.

use std::path::Path;
use tracing::debug;

#[cfg(feature = "bibtex")]
pub mod bibtex;
pub mod entry;
mod error;
pub mod format;
pub mod mendeley_xml;
pub mod ris;
mod utils;
pub mod writer;

// Reexports
#[cfg(feature = "bibtex")]
pub use bibtex::BibtexParser;
pub use entry::{Defaults, Entry, Field};
pub use error::{ConvertError, Result};
pub use format::SourceFormat;
pub use mendeley_xml::XmlParser;
pub use ris::RisParser;
pub use writer::{WordXmlWriter, WriterConfig};

const UTF8_BOM: &str = "\u{feff}";

/// Trait for implementing reference parsers.
pub trait EntryParser {
    /// Parse a string containing zero or more references.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError` if the input document is malformed.
    fn parse(&self, input: &str) -> Result<Vec<Entry>>;
}

/// Decodes `input` and runs the parser matching `format`.
///
/// [`SourceFormat::Unsupported`] yields an empty list.
///
/// # Errors
///
/// Returns [`ConvertError::Encoding`] for non-UTF-8 input, or the parser's
/// error for a malformed document.
pub fn parse_entries(input: &[u8], format: SourceFormat) -> Result<Vec<Entry>> {
    if format == SourceFormat::Unsupported {
        debug!("unsupported input format, producing no entries");
        return Ok(Vec::new());
    }

    let text = std::str::from_utf8(input)?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    match format {
        #[cfg(feature = "bibtex")]
        SourceFormat::Bibtex => BibtexParser::new().parse(text),
        #[cfg(not(feature = "bibtex"))]
        SourceFormat::Bibtex => Err(ConvertError::Bibtex(
            "BibTeX support is disabled, enable the \"bibtex\" feature".into(),
        )),
        SourceFormat::Ris => RisParser::new().parse(text),
        SourceFormat::Xml => XmlParser::new().parse(text),
        SourceFormat::Unsupported => Ok(Vec::new()),
    }
}

/// Converts one input document into Word bibliography XML.
///
/// # Errors
///
/// See [`parse_entries`].
pub fn convert(input: &[u8], format: SourceFormat) -> Result<Vec<u8>> {
    let entries = parse_entries(input, format)?;
    WordXmlWriter::new().write(&entries)
}

/// Reads a file, picks its parser from the extension, and converts it.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the file cannot be read, otherwise as
/// [`convert`].
pub fn convert_path<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path);
    debug!(path = %path.display(), ?format, "converting file");
    let input = std::fs::read(path)?;
    convert(&input, format)
}

/// Name of the output document for an input file: its base name with a
/// `.xml` extension.
///
/// ```
/// assert_eq!(bibxml::output_file_name("library.bib"), "library.xml");
/// assert_eq!(bibxml::output_file_name("refs.v2.ris"), "refs.v2.xml");
/// ```
pub fn output_file_name(input_name: &str) -> String {
    let path = Path::new(input_name);
    let base = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input_name);
    format!("{base}.xml")
}

//! RIS tags recognized by the converter.
//!
//! Only the tags that map onto the canonical entry are named; every other
//! tag is carried as [`RisTag::Unknown`] and ignored. `TY` and `ER` delimit
//! records and are matched by the parser before a line is tagged.
//! See: http://en.wikipedia.org/wiki/RIS_(file_format)

/// RIS format tags.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum RisTag {
    /// TI - Primary title
    Title,
    /// T1 - Primary title (alternative)
    TitleAlternative,
    /// AU - Author
    Author,
    /// A1 - Primary author
    AuthorPrimary,
    /// PY - Publication year
    PublicationYear,
    /// Y1 - Primary date
    DatePrimary,
    /// Y2 - Access date
    DateAccess,
    /// UR - Web/URL
    Url,
    /// Unknown tag
    Unknown(String),
}

impl RisTag {
    /// Convert a string tag to a RisTag enum.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TI" => RisTag::Title,
            "T1" => RisTag::TitleAlternative,
            "AU" => RisTag::Author,
            "A1" => RisTag::AuthorPrimary,
            "PY" => RisTag::PublicationYear,
            "Y1" => RisTag::DatePrimary,
            "Y2" => RisTag::DateAccess,
            "UR" => RisTag::Url,
            _ => RisTag::Unknown(tag.to_string()),
        }
    }

    /// Convert a RisTag enum back to its string representation.
    pub fn as_tag(&self) -> &str {
        match self {
            RisTag::Title => "TI",
            RisTag::TitleAlternative => "T1",
            RisTag::Author => "AU",
            RisTag::AuthorPrimary => "A1",
            RisTag::PublicationYear => "PY",
            RisTag::DatePrimary => "Y1",
            RisTag::DateAccess => "Y2",
            RisTag::Url => "UR",
            RisTag::Unknown(tag) => tag,
        }
    }

    /// Check if this tag represents an author field.
    pub fn is_author_tag(&self) -> bool {
        matches!(self, RisTag::Author | RisTag::AuthorPrimary)
    }
}

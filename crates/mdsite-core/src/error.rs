/// Error kinds for categorizing conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertErrorKind {
    /// An inline delimiter was opened but never closed.
    UnterminatedDelimiter,
    /// A parent node has no tag to render.
    MissingTag,
    /// A leaf node has no text.
    MissingContent,
    /// A parent node has no children collection.
    MissingStructure,
    /// A child is neither a leaf nor a parent.
    InvalidChild,
    /// A quote block line does not start with `>`.
    InvalidQuoteLine,
    /// The document has no `# ` title line.
    TitleNotFound,
    /// An input value has the wrong type.
    InvalidInputType,
}

/// An error raised while converting markdown or rendering a node tree.
///
/// Every variant is fatal to the document being converted. Callers that
/// process several documents decide for themselves whether to continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Splitting on `delimiter` produced an even number of segments.
    #[error(
        "unterminated {delimiter:?} in {text:?}: expected an odd number of segments, found {segments}"
    )]
    UnterminatedDelimiter {
        delimiter: &'static str,
        text: String,
        segments: usize,
    },

    #[error("parent node has no tag")]
    MissingTag,

    #[error("leaf node <{}> has no text", .tag.as_deref().unwrap_or("raw"))]
    MissingContent { tag: Option<String> },

    #[error("parent node <{}> has no children", .tag.as_deref().unwrap_or("?"))]
    MissingStructure { tag: Option<String> },

    /// A child at `index` is not a leaf or parent node.
    #[error("child {index} must be a leaf or parent node, got {found}")]
    InvalidChild { index: usize, found: String },

    #[error("invalid quote line: {line:?}")]
    InvalidQuoteLine { line: String },

    #[error("could not find a `# ` title line in the markdown")]
    TitleNotFound,

    /// A value at the untyped boundary had the wrong type.
    #[error("expected {expected}, got {found}")]
    InvalidInputType {
        expected: &'static str,
        found: String,
    },
}

impl ConvertError {
    /// Create an error for a value of the wrong type.
    pub fn invalid_type(expected: &'static str, found: impl Into<String>) -> Self {
        Self::InvalidInputType {
            expected,
            found: found.into(),
        }
    }

    /// Get the error category.
    pub fn kind(&self) -> ConvertErrorKind {
        match self {
            Self::UnterminatedDelimiter { .. } => ConvertErrorKind::UnterminatedDelimiter,
            Self::MissingTag => ConvertErrorKind::MissingTag,
            Self::MissingContent { .. } => ConvertErrorKind::MissingContent,
            Self::MissingStructure { .. } => ConvertErrorKind::MissingStructure,
            Self::InvalidChild { .. } => ConvertErrorKind::InvalidChild,
            Self::InvalidQuoteLine { .. } => ConvertErrorKind::InvalidQuoteLine,
            Self::TitleNotFound => ConvertErrorKind::TitleNotFound,
            Self::InvalidInputType { .. } => ConvertErrorKind::InvalidInputType,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

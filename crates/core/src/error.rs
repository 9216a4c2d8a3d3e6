use thiserror::Error;

/// Source location information for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors surfaced when a conversion cannot be configured.
///
/// Conversion itself never fails; malformed markdown degrades to a
/// deterministic rendering and is reported through [`Diagnostics`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// An option value is outside its accepted range.
    #[error("invalid option `{field}`: {reason}")]
    InvalidOptions {
        /// Option name as exposed to callers
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConvertError {
    /// Create an invalid-options error
    pub fn invalid_options(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field,
            reason: reason.into(),
        }
    }
}

/// Non-fatal findings that don't prevent rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// Code fence opened but never closed; content runs to end of input
    UnclosedCodeFence {
        /// Where the opening fence starts
        location: SourceLocation,
        /// Language tag of the fence, if any
        lang: Option<String>,
    },
    /// Backtick code span opened but never closed
    UnclosedCodeSpan {
        /// Where the opening backticks start
        location: SourceLocation,
        /// Number of opening backticks (1 or 2)
        ticks: usize,
    },
    /// Pipe-delimited block without a valid alignment row, rendered as text
    MalformedTable {
        /// Number of pipe lines in the rejected block
        lines: usize,
    },
    /// Quote markers nested deeper than the configured cap
    QuoteDepthExceeded {
        /// Marker count found on the line
        found: usize,
        /// Level the line was clamped to
        limit: usize,
    },
}

impl ParseWarning {
    /// Get the location of this warning, when it maps to a source position
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseWarning::UnclosedCodeFence { location, .. }
            | ParseWarning::UnclosedCodeSpan { location, .. } => Some(location),
            ParseWarning::MalformedTable { .. } | ParseWarning::QuoteDepthExceeded { .. } => None,
        }
    }

    /// Stable snake_case identifier used by the bindings
    pub fn kind(&self) -> &'static str {
        match self {
            ParseWarning::UnclosedCodeFence { .. } => "unclosed_code_fence",
            ParseWarning::UnclosedCodeSpan { .. } => "unclosed_code_span",
            ParseWarning::MalformedTable { .. } => "malformed_table",
            ParseWarning::QuoteDepthExceeded { .. } => "quote_depth_exceeded",
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedCodeFence { location, lang } => match lang {
                Some(lang) => write!(f, "{}: unclosed code fence ({})", location, lang),
                None => write!(f, "{}: unclosed code fence", location),
            },
            ParseWarning::UnclosedCodeSpan { location, ticks } => {
                write!(f, "{}: unclosed code span ({} backticks)", location, ticks)
            }
            ParseWarning::MalformedTable { lines } => {
                write!(
                    f,
                    "pipe block of {} lines has no alignment row; rendered as text",
                    lines
                )
            }
            ParseWarning::QuoteDepthExceeded { found, limit } => {
                write!(f, "quote nested {} levels deep, clamped to {}", found, limit)
            }
        }
    }
}

/// Collection of warnings gathered during one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// List of non-fatal warnings, in discovery order
    pub warnings: Vec<ParseWarning>,
}

impl Diagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}

use std::fmt;
use std::path::PathBuf;

/// Byte range within a date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering all of `token`.
    pub fn whole(token: &str) -> Self {
        Self::new(0, token.len())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Failure to turn a date token into a [`DateRule`](crate::DateRule).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Neither `MM/DD` nor `{digit}{Weekday}{Mon}`.
    #[error("unrecognized date format '{token}'")]
    UnrecognizedFormat { token: String },

    /// A `MM/DD` field that is not an integer.
    #[error("'{field}' is not a valid number in '{token}'")]
    MalformedNumeric {
        token: String,
        field: String,
        span: Span,
    },

    /// Relative token that does not start with a digit.
    #[error("relative date '{token}' must start with an occurrence digit")]
    MissingOccurrence { token: String },

    #[error("no weekday name found in '{token}'")]
    UnknownWeekday { token: String },

    #[error("'{token}' does not end with a month abbreviation")]
    UnknownMonth { token: String },
}

impl ParseError {
    pub fn unrecognized(token: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            token: token.into(),
        }
    }

    pub fn malformed(token: impl Into<String>, field: impl Into<String>, span: Span) -> Self {
        Self::MalformedNumeric {
            token: token.into(),
            field: field.into(),
            span,
        }
    }

    /// The token that failed to parse.
    pub fn token(&self) -> &str {
        match self {
            Self::UnrecognizedFormat { token }
            | Self::MalformedNumeric { token, .. }
            | Self::MissingOccurrence { token }
            | Self::UnknownWeekday { token }
            | Self::UnknownMonth { token } => token,
        }
    }

    /// The part of the token the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::MalformedNumeric { span, .. } => *span,
            Self::MissingOccurrence { .. } => Span::new(0, 1),
            Self::UnknownMonth { token } => {
                Span::new(token.len().saturating_sub(3), token.len())
            }
            Self::UnrecognizedFormat { token } | Self::UnknownWeekday { token } => {
                Span::whole(token)
            }
        }
    }

    /// Format the error with the token underlined at the failing span.
    pub fn display_rich(&self) -> String {
        let token = self.token();
        let span = self.span();
        let mut out = format!("error: {self}\n");
        out.push_str(&format!("  {token}\n"));
        out.push_str(&" ".repeat(span.start + 2));
        out.push_str(&"^".repeat((span.end - span.start).max(1)));
        out
    }
}

/// Failure to read entries from the file system.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

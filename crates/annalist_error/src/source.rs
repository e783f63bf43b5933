//! Remote message source error types.

/// Kinds of failures reported by a message source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SourceErrorKind {
    /// A page fetch failed (HTTP error, rate limit, permission)
    #[display("Fetch failed: {}", _0)]
    FetchFailed(String),
    /// The channel could not be found or accessed
    #[display("Channel unavailable: {}", _0)]
    ChannelUnavailable(String),
    /// A remote message could not be mapped into a record
    #[display("Malformed message: {}", _0)]
    MalformedMessage(String),
}

/// Message source error with location tracking.
///
/// Any `SourceError` raised during a sync pass aborts that pass.
///
/// # Examples
///
/// ```
/// use annalist_error::{SourceError, SourceErrorKind};
///
/// let err = SourceError::new(SourceErrorKind::FetchFailed("429 Too Many Requests".to_string()));
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Source Error: {} at line {} in {}", kind, line, file)]
pub struct SourceError {
    /// The kind of error that occurred
    pub kind: SourceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SourceError {
    /// Create a new source error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SourceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

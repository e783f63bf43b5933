//! Snapshot encoding errors.

use std::fmt;
use std::path::PathBuf;

/// A snapshot that could not be encoded as JSON.
#[derive(Debug, Clone, derive_more::Error)]
pub struct JsonError {
    /// Export file the snapshot was headed for, if known
    pub path: Option<PathBuf>,
    /// The underlying serializer message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// An encoding error with no associated file.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Encoding the snapshot for `path` failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use annalist_error::JsonError;
    ///
    /// let err = JsonError::snapshot("exports/general-1.json", "key must be a string");
    /// assert!(err.to_string().contains("exports/general-1.json"));
    /// ```
    #[track_caller]
    pub fn snapshot(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new(message)
        }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "JSON Error: cannot encode {}: ", path.display())?,
            None => write!(f, "JSON Error: ")?,
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}

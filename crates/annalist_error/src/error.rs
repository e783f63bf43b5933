//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, SourceError, StorageError};

/// Every error condition Annalist can surface to a caller.
///
/// # Examples
///
/// ```
/// use annalist_error::{AnnalistError, JsonError};
///
/// let json_err = JsonError::new("trailing comma");
/// let err: AnnalistError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AnnalistErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Snapshot storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Remote message source error
    #[from(SourceError)]
    Source(SourceError),
}

/// Annalist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use annalist_error::{AnnalistErrorKind, AnnalistResult, ConfigError};
///
/// fn might_fail() -> AnnalistResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), AnnalistErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Annalist Error: {}", _0)]
pub struct AnnalistError(Box<AnnalistErrorKind>);

impl AnnalistError {
    /// Create a new error from a kind.
    pub fn new(kind: AnnalistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AnnalistErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AnnalistErrorKind
impl<T> From<T> for AnnalistError
where
    T: Into<AnnalistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Annalist operations.
pub type AnnalistResult<T> = std::result::Result<T, AnnalistError>;

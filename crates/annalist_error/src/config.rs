//! Configuration error types.

use std::fmt;

/// A setting that could not be loaded or failed validation.
///
/// `setting` names the offending key in its environment-variable spelling
/// when the error concerns a single setting. Loader failures (unreadable
/// file, bad TOML) leave it empty.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Offending setting, e.g. `CHANNEL_ID`
    pub setting: Option<&'static str>,
    /// What is wrong with it
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// An error not tied to one setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use annalist_error::ConfigError;
    ///
    /// let err = ConfigError::new("annalist.toml: invalid TOML");
    /// assert!(err.setting.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(None, message.into())
    }

    /// An invalid or missing value for `setting`.
    ///
    /// # Examples
    ///
    /// ```
    /// use annalist_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("CHANNEL_ID", "must be 17-20 digits");
    /// assert_eq!(err.setting, Some("CHANNEL_ID"));
    /// assert!(err.to_string().contains("CHANNEL_ID must be 17-20 digits"));
    /// ```
    #[track_caller]
    pub fn invalid(setting: &'static str, message: impl Into<String>) -> Self {
        Self::at(Some(setting), message.into())
    }

    #[track_caller]
    fn at(setting: Option<&'static str>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration Error: ")?;
        if let Some(setting) = self.setting {
            write!(f, "{} ", setting)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}

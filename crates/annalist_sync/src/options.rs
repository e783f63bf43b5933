//! Tunables for a sync pass.

use std::time::Duration;

/// Page size used by every fetch unless overridden.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Largest page the platform will return.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Pagination settings.
///
/// # Examples
///
/// ```
/// use annalist_sync::SyncOptions;
/// use std::time::Duration;
///
/// let options = SyncOptions::default().with_request_delay(Duration::from_millis(250));
/// assert_eq!(options.page_size, 100);
/// assert_eq!(options.request_delay, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct SyncOptions {
    /// Messages requested per page (1..=100)
    pub page_size: u8,
    /// Pause after every non-empty page, to stay under remote rate limits
    pub request_delay: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            request_delay: Duration::from_millis(1000),
        }
    }
}

impl SyncOptions {
    /// Page size clamped to what the platform accepts.
    pub fn effective_page_size(&self) -> u8 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

//! Snapshot file naming.

use regex::Regex;
use std::sync::LazyLock;

/// Extension of snapshot files.
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Name component used when a channel name sanitizes to nothing.
pub const FALLBACK_CHANNEL_NAME: &str = "channel";

static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-_]+").expect("static pattern compiles"));

/// Turn a display name into a filename-safe component.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9-_]` into a
/// single hyphen, collapses repeated hyphens and trims them from both ends.
///
/// # Examples
///
/// ```
/// use annalist_storage::sanitize_channel_name;
///
/// assert_eq!(sanitize_channel_name("General Chat!"), "general-chat");
/// assert_eq!(sanitize_channel_name("🔥🔥"), "channel");
/// ```
pub fn sanitize_channel_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = DISALLOWED_RUN.replace_all(&lowered, "-");

    let mut collapsed = String::with_capacity(replaced.len());
    for ch in replaced.chars() {
        if ch == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(ch);
    }

    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_CHANNEL_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name for a channel that has no snapshot yet.
pub fn snapshot_file_name(channel_id: &str, display_name: &str) -> String {
    format!(
        "{}-{}.{}",
        sanitize_channel_name(display_name),
        channel_id,
        SNAPSHOT_EXTENSION
    )
}

/// Suffix identifying any snapshot file of `channel_id`.
pub(crate) fn snapshot_suffix(channel_id: &str) -> String {
    format!("-{}.{}", channel_id, SNAPSHOT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        assert_eq!(sanitize_channel_name("dev_ops-2"), "dev_ops-2");
    }

    #[test]
    fn test_sanitize_collapses_and_trims() {
        assert_eq!(sanitize_channel_name("  Hello,   World  "), "hello-world");
        assert_eq!(sanitize_channel_name("--a--b--"), "a-b");
        assert_eq!(sanitize_channel_name("📢・announcements"), "announcements");
    }

    #[test]
    fn test_sanitize_falls_back_when_empty() {
        assert_eq!(sanitize_channel_name(""), FALLBACK_CHANNEL_NAME);
        assert_eq!(sanitize_channel_name("---"), FALLBACK_CHANNEL_NAME);
        assert_eq!(sanitize_channel_name("日本語"), FALLBACK_CHANNEL_NAME);
    }

    #[test]
    fn test_snapshot_file_name() {
        assert_eq!(
            snapshot_file_name("1100000000000000000", "General"),
            "general-1100000000000000000.json"
        );
        assert_eq!(snapshot_suffix("42"), "-42.json");
    }
}

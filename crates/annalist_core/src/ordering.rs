//! Chronological ordering of message records.

use crate::MessageRecord;
use std::cmp::Ordering;

/// Compare two decimal snowflake IDs numerically without parsing.
///
/// Snowflakes carry no leading zeros, so a shorter ID is always smaller.
pub fn compare_snowflakes(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Order by creation time, then by ID so that equal timestamps still sort deterministically.
pub fn compare_chronologically(a: &MessageRecord, b: &MessageRecord) -> Ordering {
    a.created_at()
        .cmp(b.created_at())
        .then_with(|| compare_snowflakes(a.id(), b.id()))
}

/// Sort records ascending by creation time.
pub fn sort_chronologically(messages: &mut [MessageRecord]) {
    messages.sort_by(compare_chronologically);
}

/// Whether every adjacent pair satisfies `created_at[i] <= created_at[i + 1]`.
pub fn is_chronological(messages: &[MessageRecord]) -> bool {
    messages
        .windows(2)
        .all(|pair| pair[0].created_at() <= pair[1].created_at())
}

//! Duplicate suppression between fetched and stored messages.

use annalist_core::MessageRecord;
use std::collections::HashSet;

/// Keep only fetched messages whose ID is neither already stored nor repeated
/// earlier in `incoming`.
///
/// Order of the survivors is preserved.
///
/// # Examples
///
/// ```
/// use annalist_core::{MessageRecord, MessageRecordBuilder};
/// use annalist_sync::filter_new_messages;
/// use chrono::Utc;
/// use std::collections::HashSet;
///
/// let message = |id: &str| -> MessageRecord {
///     MessageRecordBuilder::default()
///         .id(id)
///         .author_id("1")
///         .author_tag("a")
///         .author_display_name("A")
///         .created_at(Utc::now())
///         .build()
///         .unwrap()
/// };
///
/// let known: HashSet<&str> = ["1", "2"].into_iter().collect();
/// let fresh = filter_new_messages(&known, vec![message("2"), message("3"), message("3")]);
/// assert_eq!(fresh.len(), 1);
/// assert_eq!(fresh[0].id(), "3");
/// ```
pub fn filter_new_messages(
    known: &HashSet<&str>,
    incoming: Vec<MessageRecord>,
) -> Vec<MessageRecord> {
    if incoming.is_empty() {
        return incoming;
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(incoming.len());
    incoming
        .into_iter()
        .filter(|message| {
            let id = message.id().as_str();
            !known.contains(id) && seen.insert(id.to_string())
        })
        .collect()
}

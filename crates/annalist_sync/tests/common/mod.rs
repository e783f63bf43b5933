//! Shared test doubles for sync engine tests.

#![allow(dead_code)]

use annalist_core::{ChannelInfo, GuildInfo, MessageRecord, MessageRecordBuilder, compare_snowflakes};
use annalist_error::{AnnalistResult, SourceError, SourceErrorKind};
use annalist_sync::{FetchDirection, MessageSource};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

pub const CHANNEL_ID: &str = "1100000000000000000";

const FIRST_MESSAGE_ID: u64 = 1_200_000_000_000_000_000;

/// Build a message whose ID and timestamp both grow with `n`.
pub fn message(n: u64) -> MessageRecord {
    MessageRecordBuilder::default()
        .id((FIRST_MESSAGE_ID + n).to_string())
        .author_id("42")
        .author_tag("someone")
        .author_display_name("Someone")
        .created_at(Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap())
        .content(format!("message {}", n))
        .build()
        .expect("Valid message")
}

/// Build messages `from..to`.
pub fn messages(from: u64, to: u64) -> Vec<MessageRecord> {
    (from..to).map(message).collect()
}

/// In-memory channel that answers page fetches like the platform does.
///
/// Pages are handed back newest-first, the order Discord uses, so callers
/// must sort them. Every requested direction and returned page size is recorded.
pub struct FakeChannel {
    info: ChannelInfo,
    remote: Arc<Mutex<Vec<MessageRecord>>>,
    calls: Arc<Mutex<Vec<FetchDirection>>>,
    page_sizes: Arc<Mutex<Vec<usize>>>,
    call_count: Arc<AtomicUsize>,
    fail_on_call: Arc<Mutex<Option<usize>>>,
    inclusive_after: bool,
    inclusive_before: bool,
}

impl FakeChannel {
    pub fn new(remote: Vec<MessageRecord>) -> Self {
        Self {
            info: ChannelInfo::new(
                CHANNEL_ID,
                Some("general".to_string()),
                Some(GuildInfo::new("900".to_string(), "Test Guild".to_string())),
            ),
            remote: Arc::new(Mutex::new(remote)),
            calls: Arc::new(Mutex::new(Vec::new())),
            page_sizes: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            fail_on_call: Arc::new(Mutex::new(None)),
            inclusive_after: false,
            inclusive_before: false,
        }
    }

    /// Treat `After(id)` as "id and newer".
    pub fn with_inclusive_after(mut self) -> Self {
        self.inclusive_after = true;
        self
    }

    /// Treat `Before(id)` as "id and older".
    pub fn with_inclusive_before(mut self) -> Self {
        self.inclusive_before = true;
        self
    }

    /// The same remote channel seen under a different name.
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            info: ChannelInfo::new(CHANNEL_ID, Some(name.to_string()), self.info.guild.clone()),
            remote: Arc::clone(&self.remote),
            calls: Arc::clone(&self.calls),
            page_sizes: Arc::clone(&self.page_sizes),
            call_count: Arc::clone(&self.call_count),
            fail_on_call: Arc::clone(&self.fail_on_call),
            inclusive_after: self.inclusive_after,
            inclusive_before: self.inclusive_before,
        }
    }

    /// Add messages to the remote history.
    pub fn post(&self, new_messages: Vec<MessageRecord>) {
        self.remote.lock().unwrap().extend(new_messages);
    }

    /// Fail the `n`-th fetch (1-based, counted over the channel's lifetime).
    pub fn fail_on_call(&self, n: usize) {
        *self.fail_on_call.lock().unwrap() = Some(n);
    }

    pub fn calls(&self) -> Vec<FetchDirection> {
        self.calls.lock().unwrap().clone()
    }

    pub fn page_sizes(&self) -> Vec<usize> {
        self.page_sizes.lock().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
        self.page_sizes.lock().unwrap().clear();
    }

    fn sorted_remote(&self) -> Vec<MessageRecord> {
        let mut remote = self.remote.lock().unwrap().clone();
        remote.sort_by(|a, b| compare_snowflakes(a.id(), b.id()));
        remote
    }
}

#[async_trait]
impl MessageSource for FakeChannel {
    fn channel(&self) -> &ChannelInfo {
        &self.info
    }

    async fn fetch_page(
        &self,
        direction: &FetchDirection,
        limit: u8,
    ) -> AnnalistResult<Vec<MessageRecord>> {
        self.calls.lock().unwrap().push(direction.clone());
        let call_number = self.call_count.fetch_add(1, AtomicOrdering::SeqCst) + 1;

        if *self.fail_on_call.lock().unwrap() == Some(call_number) {
            return Err(SourceError::new(SourceErrorKind::FetchFailed(
                "503 Service Unavailable".to_string(),
            ))
            .into());
        }

        let limit = limit as usize;
        let remote = self.sorted_remote();
        let mut page: Vec<MessageRecord> = match direction {
            FetchDirection::Latest => {
                let start = remote.len().saturating_sub(limit);
                remote[start..].to_vec()
            }
            FetchDirection::Before(cursor) => {
                let older: Vec<_> = remote
                    .into_iter()
                    .filter(|m| match compare_snowflakes(m.id(), cursor) {
                        Ordering::Less => true,
                        Ordering::Equal => self.inclusive_before,
                        Ordering::Greater => false,
                    })
                    .collect();
                let start = older.len().saturating_sub(limit);
                older[start..].to_vec()
            }
            FetchDirection::After(cursor) => remote
                .into_iter()
                .filter(|m| match compare_snowflakes(m.id(), cursor) {
                    Ordering::Greater => true,
                    Ordering::Equal => self.inclusive_after,
                    Ordering::Less => false,
                })
                .take(limit)
                .collect(),
        };

        page.reverse();
        self.page_sizes.lock().unwrap().push(page.len());
        Ok(page)
    }
}

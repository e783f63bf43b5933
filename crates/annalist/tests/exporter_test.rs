//! Tests for the exporter's single-pass and periodic schedules.

use annalist::{Exporter, RunPlan};
use annalist_core::{ChannelInfo, MessageRecord, MessageRecordBuilder};
use annalist_error::{AnnalistResult, SourceError, SourceErrorKind};
use annalist_storage::MemoryStore;
use annalist_sync::{FetchDirection, MessageSource, SyncEngine, SyncOptions};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A channel that gains one message before every pass and can be told to
/// fail a specific pass.
struct GrowingChannel {
    info: ChannelInfo,
    remote: Mutex<Vec<MessageRecord>>,
    passes: AtomicUsize,
    failing_pass: Option<usize>,
    last_returned: Mutex<Option<String>>,
}

impl GrowingChannel {
    fn new(failing_pass: Option<usize>) -> Self {
        Self {
            info: ChannelInfo::new("1100000000000000000", Some("general".to_string()), None),
            remote: Mutex::new(Vec::new()),
            passes: AtomicUsize::new(0),
            failing_pass,
            last_returned: Mutex::new(None),
        }
    }

    fn message(n: usize) -> MessageRecord {
        MessageRecordBuilder::default()
            .id((1_200_000_000_000_000_000u64 + n as u64).to_string())
            .author_id("42")
            .author_tag("someone")
            .author_display_name("Someone")
            .created_at(Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap())
            .content(format!("message {}", n))
            .build()
            .unwrap()
    }
}

#[async_trait]
impl MessageSource for GrowingChannel {
    fn channel(&self) -> &ChannelInfo {
        &self.info
    }

    async fn fetch_page(
        &self,
        direction: &FetchDirection,
        _limit: u8,
    ) -> AnnalistResult<Vec<MessageRecord>> {
        let cursor = match direction {
            FetchDirection::Before(_) => return Ok(Vec::new()),
            FetchDirection::Latest => None,
            FetchDirection::After(cursor) => Some(cursor),
        };

        // The pager's follow-up request after a forward page ends the pass
        let mut last_returned = self.last_returned.lock().unwrap();
        if cursor.is_some() && cursor == last_returned.as_ref() {
            *last_returned = None;
            return Ok(Vec::new());
        }

        let pass = self.passes.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_pass == Some(pass) {
            return Err(SourceError::new(SourceErrorKind::FetchFailed(
                "502 Bad Gateway".to_string(),
            ))
            .into());
        }

        let mut remote = self.remote.lock().unwrap();
        let next = remote.len();
        remote.push(Self::message(next));
        let page: Vec<MessageRecord> = match cursor {
            Some(cursor) => remote.iter().filter(|m| m.id() > cursor).cloned().collect(),
            None => remote.clone(),
        };
        *last_returned = cursor.and(page.last().map(|m| m.id().clone()));
        Ok(page)
    }
}

fn exporter(plan: RunPlan) -> Exporter<MemoryStore> {
    let options = SyncOptions::default().with_request_delay(Duration::ZERO);
    Exporter::new(SyncEngine::new(MemoryStore::new("exports"), options), plan)
}

#[tokio::test]
async fn test_single_pass_ignores_shutdown() {
    let exporter = exporter(RunPlan::Once);
    let channel = GrowingChannel::new(None);

    let summary = exporter
        .run(&channel, std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(*summary.passes(), 1);
    assert_eq!(*summary.initial().new_messages(), 1);
    assert_eq!(exporter.plan(), RunPlan::Once);
}

#[tokio::test]
async fn test_initial_failure_is_returned() {
    let exporter = exporter(RunPlan::Periodic(Duration::from_secs(1)));
    let channel = GrowingChannel::new(Some(1));

    let result = exporter.run(&channel, std::future::pending::<()>()).await;

    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_periodic_passes_until_shutdown() {
    let exporter = exporter(RunPlan::Periodic(Duration::from_secs(1)));
    let channel = GrowingChannel::new(None);

    let shutdown = tokio::time::sleep(Duration::from_millis(2500));
    let summary = exporter.run(&channel, shutdown).await.unwrap();

    // Initial pass at 0s, scheduled passes at 1s and 2s
    assert_eq!(*summary.passes(), 3);
    assert_eq!(*summary.failures(), 0);
    assert_eq!(exporter.plan(), RunPlan::Periodic(Duration::from_secs(1)));
}

#[tokio::test(start_paused = true)]
async fn test_failed_periodic_pass_does_not_stop_schedule() {
    let exporter = exporter(RunPlan::Periodic(Duration::from_secs(1)));
    let channel = GrowingChannel::new(Some(2));

    let shutdown = tokio::time::sleep(Duration::from_millis(3500));
    let summary = exporter.run(&channel, shutdown).await.unwrap();

    assert_eq!(*summary.passes(), 3);
    assert_eq!(*summary.failures(), 1);
}

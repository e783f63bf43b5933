//! One reconciliation pass between a channel and its snapshot.

use crate::{MessageSource, SyncOptions, collect_after, collect_history, filter_new_messages};
use annalist_core::{ChannelSnapshot, SyncMode, SyncReport};
use annalist_error::AnnalistResult;
use annalist_storage::SnapshotStore;
use chrono::Utc;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Orchestrates sync passes against a snapshot store.
///
/// The engine keeps no state between passes; everything it knows about a
/// channel comes from the store and the source handed to [`SyncEngine::sync`].
/// Callers must not run two passes for the same channel concurrently.
#[derive(Debug, Clone)]
pub struct SyncEngine<S> {
    store: S,
    options: SyncOptions,
}

impl<S> SyncEngine<S>
where
    S: SnapshotStore,
{
    /// Create an engine over `store`.
    pub fn new(store: S, options: SyncOptions) -> Self {
        Self { store, options }
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pagination settings.
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Bring the channel's snapshot up to date with the remote history.
    ///
    /// The first pass for a channel (or one whose snapshot is missing,
    /// unreadable or empty) fetches the full history; later passes fetch only
    /// messages newer than the last stored one.
    ///
    /// # Errors
    ///
    /// Fails if any page fetch fails or the snapshot cannot be written. In
    /// both cases the previously saved snapshot is left untouched.
    #[instrument(skip(self, source), fields(channel_id = %source.channel().id))]
    pub async fn sync<M>(&self, source: &M) -> AnnalistResult<SyncReport>
    where
        M: MessageSource + ?Sized,
    {
        let channel = source.channel();
        info!(channel = channel.display_name(), "Syncing channel messages");

        let path = self.store.resolve(&channel.id, channel.display_name()).await;

        let Some(mut snapshot) = self.store.load(&path).await else {
            info!("No existing export, fetching full history");
            let fetched = collect_history(source, &self.options).await?;
            let messages = filter_new_messages(&HashSet::new(), fetched);
            let snapshot = ChannelSnapshot::new(channel, messages);
            self.store.save(&path, &snapshot).await?;

            let total = *snapshot.total_messages();
            info!(path = %path.display(), total, "Export created");
            return Ok(SyncReport::new(path, total, total, SyncMode::Full));
        };

        info!(
            stored = snapshot.messages().len(),
            "Found existing export, checking for new messages"
        );

        let (fetched, mode) = match snapshot.last_message_id() {
            None => {
                warn!("Existing export is empty, fetching full history");
                (collect_history(source, &self.options).await?, SyncMode::Full)
            }
            Some(last_id) => {
                let last_id = last_id.to_string();
                (
                    collect_after(source, &last_id, &self.options).await?,
                    SyncMode::Incremental,
                )
            }
        };

        let fetched_count = fetched.len();
        let new_messages = filter_new_messages(&snapshot.known_ids(), fetched);

        if new_messages.is_empty() {
            let total = snapshot.messages().len();
            info!(fetched = fetched_count, total, "No new messages, export is up to date");
            return Ok(SyncReport::new(path, 0, total, mode));
        }

        let added = new_messages.len();
        snapshot.append(new_messages);
        snapshot.refresh_metadata(channel, Utc::now());
        self.store.save(&path, &snapshot).await?;

        let total = *snapshot.total_messages();
        info!(
            path = %path.display(),
            added,
            duplicates = fetched_count - added,
            total,
            "Export updated"
        );
        Ok(SyncReport::new(path, added, total, mode))
    }
}

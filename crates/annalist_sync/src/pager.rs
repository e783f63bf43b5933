//! Cursor pagination over a [`MessageSource`].

use crate::{FetchDirection, MessageSource, SyncOptions};
use annalist_core::{MessageRecord, sort_chronologically};
use annalist_error::AnnalistResult;
use tracing::{debug, info, instrument, warn};

/// Which way the cursor moves after each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Backward,
    Forward,
}

/// Fetch the whole channel history, newest page first.
///
/// Pages backward with `Before(oldest id of previous page)` until a page comes
/// back empty. The result is sorted by creation time.
///
/// # Errors
///
/// Returns the first fetch error; nothing collected so far is returned.
#[instrument(skip(source, options), fields(channel_id = %source.channel().id))]
pub async fn collect_history<M>(source: &M, options: &SyncOptions) -> AnnalistResult<Vec<MessageRecord>>
where
    M: MessageSource + ?Sized,
{
    paginate(source, FetchDirection::Latest, Walk::Backward, options).await
}

/// Fetch every message newer than `after_id`, oldest page first.
///
/// Pages forward with `After(newest id of previous page)` until a page comes
/// back empty. The result is sorted by creation time and may still contain
/// `after_id` itself if the platform treats the boundary inclusively.
///
/// # Errors
///
/// Returns the first fetch error; nothing collected so far is returned.
#[instrument(skip(source, options), fields(channel_id = %source.channel().id))]
pub async fn collect_after<M>(
    source: &M,
    after_id: &str,
    options: &SyncOptions,
) -> AnnalistResult<Vec<MessageRecord>>
where
    M: MessageSource + ?Sized,
{
    paginate(
        source,
        FetchDirection::After(after_id.to_string()),
        Walk::Forward,
        options,
    )
    .await
}

async fn paginate<M>(
    source: &M,
    first: FetchDirection,
    walk: Walk,
    options: &SyncOptions,
) -> AnnalistResult<Vec<MessageRecord>>
where
    M: MessageSource + ?Sized,
{
    let limit = options.effective_page_size();
    let mut collected: Vec<MessageRecord> = Vec::new();
    let mut direction = first;

    loop {
        debug!(%direction, limit, "Fetching page");
        let mut page = source.fetch_page(&direction, limit).await?;
        if page.is_empty() {
            break;
        }

        sort_chronologically(&mut page);
        let cursor = match walk {
            Walk::Backward => page.first(),
            Walk::Forward => page.last(),
        }
        .map(|m| m.id().clone());

        let page_len = page.len();
        collected.extend(page);
        info!(page = page_len, fetched = collected.len(), "Received messages");

        let next = match (walk, cursor) {
            (Walk::Backward, Some(id)) => FetchDirection::Before(id),
            (Walk::Forward, Some(id)) => FetchDirection::After(id),
            (_, None) => break,
        };

        // An inclusive boundary can hand back the cursor message alone forever
        if next == direction {
            warn!(%direction, "Cursor did not advance, stopping pagination");
            break;
        }
        direction = next;

        if !options.request_delay.is_zero() {
            tokio::time::sleep(options.request_delay).await;
        }
    }

    sort_chronologically(&mut collected);
    Ok(collected)
}

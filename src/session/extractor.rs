use crate::model::{ExtractionResult, ListingItem, TargetRange, NO_COMMENT};
use crate::source::ListingSource;
use crate::wait::{self, WaitPolicy};
use crate::{Error, Result};
use tracing::{debug, info};

/// Open every post in `range` and read its title and first comment.
///
/// Ids for the whole range are captured from one snapshot before the first
/// navigation. Afterwards posts are addressed by id only, so a listing that
/// re-renders on back does not shift which post gets opened.
pub async fn extract<S>(
    source: &mut S,
    range: &TargetRange,
    waits: &WaitPolicy,
) -> Result<Vec<ExtractionResult>>
where
    S: ListingSource + ?Sized,
{
    let snapshot = source.snapshot().await?;
    if snapshot.len() < range.end {
        return Err(Error::InsufficientPosts {
            found: snapshot.len(),
            required: range.end,
        });
    }
    let targets: Vec<ListingItem> = snapshot[range.indices()].to_vec();

    let mut results = Vec::with_capacity(targets.len());
    for (offset, item) in targets.into_iter().enumerate() {
        let position = range.start + offset;
        if item.id.is_empty() {
            return Err(Error::Validation(format!(
                "post #{} has no id in the listing",
                position
            )));
        }
        debug!("Extracting #{} ({})", position, item.id);
        results.push(extract_one(source, position, &item.id, waits).await?);
    }

    info!("Extracted {} posts", results.len());
    Ok(results)
}

async fn extract_one<S>(
    source: &mut S,
    position: usize,
    id: &str,
    waits: &WaitPolicy,
) -> Result<ExtractionResult>
where
    S: ListingSource + ?Sized,
{
    ensure_rendered(source, position, id, waits).await?;
    source.open_item(id).await?;
    source.pause(waits.detail_settle_ms).await;

    let title = source.detail_title().await?;
    let first_comment = read_first_comment(source, waits.comment_timeout_ms).await;

    source.back_to_listing().await?;
    if !source.wait_for_items(waits.listing_timeout_ms).await? {
        return Err(Error::ListingLost { position });
    }
    source.pause(waits.listing_settle_ms).await;

    Ok(ExtractionResult {
        position,
        id: id.to_string(),
        title,
        first_comment,
    })
}

/// Scroll down until the post with `id` is rendered again.
async fn ensure_rendered<S>(source: &mut S, position: usize, id: &str, waits: &WaitPolicy) -> Result<()>
where
    S: ListingSource + ?Sized,
{
    for attempt in 0..=waits.resolve_max_attempts {
        if source.snapshot().await?.iter().any(|item| item.id == id) {
            if attempt > 0 {
                debug!("#{} back in view after {} scroll steps", position, attempt);
            }
            return Ok(());
        }
        if attempt == waits.resolve_max_attempts {
            break;
        }
        let count = source.item_count().await?;
        source.scroll_by(waits.scroll_step_px as i64).await?;
        wait::settle_for_growth(source, count, waits).await?;
    }
    Err(Error::ItemNotFound {
        position,
        id: id.to_string(),
    })
}

/// A missing or unreadable comment is expected, never an error.
async fn read_first_comment<S>(source: &mut S, timeout_ms: u64) -> String
where
    S: ListingSource + ?Sized,
{
    match source.first_comment(timeout_ms).await {
        Ok(Some(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => NO_COMMENT.to_string(),
        Err(e) => {
            debug!("First comment unavailable: {}", e);
            NO_COMMENT.to_string()
        }
    }
}

use crate::source::ListingSource;
use crate::wait::{self, WaitPolicy};
use crate::Result;
use tracing::{debug, info};

/// Consecutive unchanged height readings that mean the feed is exhausted.
const STALL_READINGS: u32 = 2;

/// Scroll until at least `required` posts are rendered or the page stops growing.
///
/// Starts with two coarse jumps (80% then 95% of the starting height), since
/// large jumps trigger lazy loading sooner than small steps. Then scrolls in
/// `scroll_step_px` increments, waiting after each step for the count to grow.
///
/// Returns the final count. A count below `required` is for the caller to reject.
pub async fn load<S>(source: &mut S, required: usize, waits: &WaitPolicy) -> Result<usize>
where
    S: ListingSource + ?Sized,
{
    source.pause(waits.initial_delay_ms).await;

    let height = source.document_height().await?;
    debug!("Coarse scroll from height {}", height);
    source.scroll_to(height * 80 / 100).await?;
    source.pause(waits.coarse_settle_ms).await;
    source.scroll_to(height * 95 / 100).await?;
    source.pause(waits.coarse_settle_ms).await;

    let mut count = source.item_count().await?;
    info!("{} posts after coarse scroll (need {})", count, required);
    if count >= required {
        source.pause(waits.final_settle_ms).await;
        return Ok(count);
    }

    let mut unchanged = 0;
    let mut iterations = 0;
    while iterations < waits.max_scroll_iterations {
        iterations += 1;
        let before = source.document_height().await?;
        source.scroll_by(waits.scroll_step_px as i64).await?;
        count = wait::settle_for_growth(source, count, waits).await?;
        let after = source.document_height().await?;
        debug!(
            "scroll {}: {} posts, height {} -> {}",
            iterations, count, before, after
        );

        if count >= required {
            source.pause(waits.final_settle_ms).await;
            break;
        }

        if after == before {
            unchanged += 1;
            if unchanged >= STALL_READINGS {
                info!("Feed stopped growing at {} posts", count);
                break;
            }
        } else {
            unchanged = 0;
        }
    }

    info!("Loaded {} posts after {} scroll steps", count, iterations);
    Ok(count)
}

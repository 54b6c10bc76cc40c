use crate::source::ListingSource;
use crate::wait::WaitPolicy;
use crate::Result;
use tracing::{debug, info, warn};

/// Return to the top and check the first post is still `first_title`.
///
/// Tries a direct jump first. If the top post does not match yet, steps up by
/// `locate_step_px` up to `locate_max_attempts` times. Identity is by title
/// only, so two posts sharing a title are indistinguishable here.
pub async fn locate<S>(source: &mut S, first_title: &str, waits: &WaitPolicy) -> Result<bool>
where
    S: ListingSource + ?Sized,
{
    source.scroll_to(0).await?;
    source.pause(waits.locate_settle_ms).await;
    if is_first(source, first_title).await? {
        debug!("First post found at top");
        return Ok(true);
    }

    for attempt in 1..=waits.locate_max_attempts {
        source.scroll_by(-(waits.locate_step_px as i64)).await?;
        source.pause(waits.locate_settle_ms).await;
        if is_first(source, first_title).await? {
            info!("First post found after {} scroll-up steps", attempt);
            return Ok(true);
        }
    }

    warn!(
        "First post '{}' not found after {} attempts",
        first_title, waits.locate_max_attempts
    );
    Ok(false)
}

async fn is_first<S>(source: &S, title: &str) -> Result<bool>
where
    S: ListingSource + ?Sized,
{
    Ok(source.item_title(0).await?.as_deref() == Some(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fake::FakeListing;

    #[tokio::test]
    async fn test_fast_path() {
        let waits = WaitPolicy::default();
        let mut listing = FakeListing::new(100).with_loaded(60);
        listing.scroll_to(3_000).await.unwrap();

        assert!(locate(&mut listing, "Post 1", &waits).await.unwrap());
        assert_eq!(listing.scroll_y(), 0);
        assert_eq!(listing.elapsed_ms(), waits.locate_settle_ms);
    }

    #[tokio::test]
    async fn test_slow_path_steps_up() {
        let waits = WaitPolicy::default();
        let mut listing = FakeListing::new(100).with_loaded(60).with_lagging_top(1_500);
        listing.scroll_to(4_000).await.unwrap();

        assert!(locate(&mut listing, "Post 1", &waits).await.unwrap());
        assert_eq!(listing.scroll_y(), 0);
        // jump + two steps of 1000px from 1500
        assert_eq!(listing.elapsed_ms(), 3 * waits.locate_settle_ms);
    }

    #[tokio::test]
    async fn test_repeat_call_takes_fast_path() {
        let waits = WaitPolicy::default();
        let mut listing = FakeListing::new(100).with_loaded(60).with_lagging_top(1_500);
        listing.scroll_to(4_000).await.unwrap();
        assert!(locate(&mut listing, "Post 1", &waits).await.unwrap());

        let before = listing.elapsed_ms();
        assert!(locate(&mut listing, "Post 1", &waits).await.unwrap());
        assert_eq!(listing.elapsed_ms() - before, waits.locate_settle_ms);
    }

    #[tokio::test]
    async fn test_gives_up_when_first_post_is_gone() {
        let waits = WaitPolicy {
            locate_max_attempts: 3,
            ..Default::default()
        };
        let mut listing = FakeListing::new(100);

        assert!(!locate(&mut listing, "Some other post", &waits).await.unwrap());
        assert_eq!(listing.elapsed_ms(), 4 * waits.locate_settle_ms);
    }
}

use crate::source::ListingSource;
use crate::wait::WaitPolicy;
use crate::{Error, Result};
use tracing::{debug, info};

/// Open the listing and wait for the first post.
///
/// Returns the title of the post rendered first, which the locator later
/// uses to check that nothing was reordered.
pub async fn navigate<S>(source: &mut S, url: &str, waits: &WaitPolicy) -> Result<String>
where
    S: ListingSource + ?Sized,
{
    info!("Navigating to: {}", url);
    source.open_listing(url).await?;

    if !source.wait_for_items(waits.listing_timeout_ms).await? {
        return Err(Error::NoItems {
            timeout_ms: waits.listing_timeout_ms,
        });
    }

    let title = source
        .item_title(0)
        .await?
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::Validation("navigator: first post has no title".into()))?;
    debug!("First post: '{}'", title);
    Ok(title)
}

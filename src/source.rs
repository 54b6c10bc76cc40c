//! The page capabilities the scrape stages need.
//!
//! [`crate::PageSource`] drives a real browser tab. Tests drive the stages
//! against an in-memory listing instead.

use crate::model::ListingItem;
use crate::Result;
use async_trait::async_trait;

/// A listing page that can be scrolled, inspected and navigated.
///
/// Indices are zero-based positions among currently rendered items.
#[async_trait(?Send)]
pub trait ListingSource {
    /// Navigate to the listing.
    async fn open_listing(&mut self, url: &str) -> Result<()>;

    /// Wait until at least one item is rendered. `Ok(false)` on timeout.
    async fn wait_for_items(&mut self, timeout_ms: u64) -> Result<bool>;

    /// Number of rendered items.
    async fn item_count(&self) -> Result<usize>;

    /// Title of the item at `index`, if one is rendered there.
    async fn item_title(&self, index: usize) -> Result<Option<String>>;

    /// Id and title of every rendered item, in listing order.
    async fn snapshot(&self) -> Result<Vec<ListingItem>>;

    /// Full scrollable height of the document in pixels.
    async fn document_height(&self) -> Result<u64>;

    /// Jump to an absolute vertical offset.
    async fn scroll_to(&mut self, y: u64) -> Result<()>;

    /// Scroll relative to the current offset. Negative scrolls up.
    async fn scroll_by(&mut self, dy: i64) -> Result<()>;

    /// Open the detail view of the rendered item with `id`.
    async fn open_item(&mut self, id: &str) -> Result<()>;

    /// Title shown in the detail view. Empty if none is present.
    async fn detail_title(&self) -> Result<String>;

    /// Text of the first comment in the detail view, waiting up to `timeout_ms`.
    async fn first_comment(&mut self, timeout_ms: u64) -> Result<Option<String>>;

    /// Return from the detail view to the listing.
    async fn back_to_listing(&mut self) -> Result<()>;

    /// Fixed delay.
    async fn pause(&mut self, ms: u64);
}

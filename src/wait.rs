//! Named wait policies and bounded condition waits.

use crate::source::ListingSource;
use crate::Result;
use serde::Deserialize;
use tracing::debug;

/// Every delay, step and bound the stages use.
///
/// All values are overridable from the `waits:` section of a config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaitPolicy {
    /// Delay before the first scroll so the first batch can settle.
    pub initial_delay_ms: u64,
    /// Wait after each of the two coarse jumps.
    pub coarse_settle_ms: u64,
    /// Pixels per incremental scroll step.
    pub scroll_step_px: u64,
    /// Upper bound on waiting for new items after a scroll step.
    pub scroll_settle_ms: u64,
    /// How often a condition wait re-checks.
    pub poll_interval_ms: u64,
    /// Extra wait once enough items are rendered.
    pub final_settle_ms: u64,
    /// Hard cap on incremental scroll steps.
    pub max_scroll_iterations: u32,
    /// Wait after jumping or stepping towards the top.
    pub locate_settle_ms: u64,
    /// Pixels per scroll-up step when relocating the first item.
    pub locate_step_px: u64,
    pub locate_max_attempts: u32,
    /// Wait after opening a post.
    pub detail_settle_ms: u64,
    /// How long to wait for a first comment to appear.
    pub comment_timeout_ms: u64,
    /// How long to wait for listing items after navigation.
    pub listing_timeout_ms: u64,
    /// Wait after the listing reappears.
    pub listing_settle_ms: u64,
    /// Scroll steps allowed when a target post has to be found again.
    pub resolve_max_attempts: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 3_000,
            coarse_settle_ms: 2_000,
            scroll_step_px: 1_000,
            scroll_settle_ms: 1_500,
            poll_interval_ms: 250,
            final_settle_ms: 1_000,
            max_scroll_iterations: 200,
            locate_settle_ms: 1_000,
            locate_step_px: 1_000,
            locate_max_attempts: 10,
            detail_settle_ms: 2_000,
            comment_timeout_ms: 5_000,
            listing_timeout_ms: 15_000,
            listing_settle_ms: 1_000,
            resolve_max_attempts: 30,
        }
    }
}

impl WaitPolicy {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(crate::Error::Config(
                "waits.poll_interval_ms must be greater than 0".into(),
            ));
        }
        if self.scroll_step_px == 0 || self.locate_step_px == 0 {
            return Err(crate::Error::Config(
                "waits: scroll steps must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Poll the item count until it exceeds `baseline` or `scroll_settle_ms` passes.
///
/// The count is read before the first pause, so a zero budget still measures.
/// Returns the last observed count.
pub async fn settle_for_growth<S>(source: &mut S, baseline: usize, policy: &WaitPolicy) -> Result<usize>
where
    S: ListingSource + ?Sized,
{
    let interval = policy.poll_interval_ms.max(1);
    let mut waited = 0;
    loop {
        let count = source.item_count().await?;
        if count > baseline {
            debug!("settle: {} -> {} items after {}ms", baseline, count, waited);
            return Ok(count);
        }
        if waited >= policy.scroll_settle_ms {
            return Ok(count);
        }
        let step = interval.min(policy.scroll_settle_ms - waited);
        source.pause(step).await;
        waited += step;
    }
}

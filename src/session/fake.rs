//! Deterministic in-memory listing for exercising the stages.
//!
//! Posts render in batches. A batch is requested whenever the viewport comes
//! within [`LOAD_THRESHOLD_PX`] of the document end and arrives after
//! `load_delay_ms` of paused time. Nothing really sleeps.

use crate::model::ListingItem;
use crate::source::ListingSource;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

pub const ITEM_HEIGHT_PX: u64 = 100;
pub const VIEWPORT_PX: u64 = 800;
pub const INITIAL_BATCH: usize = 25;
pub const LOAD_THRESHOLD_PX: u64 = 1_500;

pub struct FakeListing {
    total: usize,
    batch: usize,
    loaded: usize,
    scroll_y: u64,
    load_delay_ms: u64,
    pending_ms: Option<u64>,
    elapsed_ms: u64,
    comments: HashMap<usize, String>,
    failing_comments: HashSet<usize>,
    reset_on_back: bool,
    top_lag_px: Option<u64>,
    virtualized: bool,
    opened: Option<usize>,
    load_on_scroll: bool,
    real_sleep: bool,
    events: Vec<String>,
}

impl FakeListing {
    /// A listing that can supply `total` posts. 25 render up front, then 10 per batch.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            batch: 10,
            loaded: 0,
            scroll_y: 0,
            load_delay_ms: 200,
            pending_ms: None,
            elapsed_ms: 0,
            comments: HashMap::new(),
            failing_comments: HashSet::new(),
            reset_on_back: false,
            top_lag_px: None,
            virtualized: false,
            opened: None,
            load_on_scroll: false,
            real_sleep: false,
            events: Vec::new(),
        }
        .with_loaded(INITIAL_BATCH)
    }

    pub fn with_loaded(mut self, loaded: usize) -> Self {
        self.loaded = loaded.min(self.total);
        self
    }

    pub fn with_load_delay(mut self, ms: u64) -> Self {
        self.load_delay_ms = ms;
        self
    }

    /// Give the post at zero-based `index` a first comment.
    pub fn with_comment(mut self, index: usize, text: &str) -> Self {
        self.comments.insert(index, text.to_string());
        self
    }

    /// Make reading the comment of `index` fail outright.
    pub fn with_failing_comment(mut self, index: usize) -> Self {
        self.failing_comments.insert(index);
        self
    }

    /// Going back reloads the listing from its first batch.
    pub fn with_reset_on_back(mut self) -> Self {
        self.reset_on_back = true;
        self
    }

    /// Only items from the scroll offset down are rendered, and the next jump
    /// to the top stops `lag_px` short.
    pub fn with_lagging_top(mut self, lag_px: u64) -> Self {
        self.virtualized = true;
        self.top_lag_px = Some(lag_px);
        self
    }

    /// Batches render the moment a scroll reaches the load threshold.
    pub fn with_instant_loads(mut self) -> Self {
        self.load_delay_ms = 0;
        self.load_on_scroll = true;
        self
    }

    /// `pause` also sleeps on the tokio clock.
    pub fn with_real_sleep(mut self) -> Self {
        self.real_sleep = true;
        self
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn scroll_y(&self) -> u64 {
        self.scroll_y
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn id_of(index: usize) -> String {
        format!("t3_{:04}", index + 1)
    }

    pub fn title_of(index: usize) -> String {
        format!("Post {}", index + 1)
    }

    fn height(&self) -> u64 {
        self.loaded as u64 * ITEM_HEIGHT_PX
    }

    fn max_scroll(&self) -> u64 {
        self.height().saturating_sub(VIEWPORT_PX)
    }

    fn first_rendered(&self) -> usize {
        if self.virtualized {
            ((self.scroll_y / ITEM_HEIGHT_PX) as usize).min(self.loaded)
        } else {
            0
        }
    }

    fn near_bottom(&self) -> bool {
        self.scroll_y + VIEWPORT_PX + LOAD_THRESHOLD_PX >= self.height()
    }

    fn advance(&mut self, ms: u64) {
        self.elapsed_ms += ms;
        let mut remaining = ms;
        loop {
            if self.pending_ms.is_none() && self.loaded < self.total && self.near_bottom() {
                self.pending_ms = Some(self.load_delay_ms);
            }
            match self.pending_ms {
                Some(p) if p <= remaining => {
                    remaining -= p;
                    self.pending_ms = None;
                    self.loaded = (self.loaded + self.batch).min(self.total);
                }
                Some(p) => {
                    self.pending_ms = Some(p - remaining);
                    break;
                }
                None => break,
            }
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        (self.first_rendered()..self.loaded).find(|&i| Self::id_of(i) == id)
    }
}

#[async_trait(?Send)]
impl ListingSource for FakeListing {
    async fn open_listing(&mut self, url: &str) -> Result<()> {
        self.events.push(format!("goto {}", url));
        Ok(())
    }

    async fn wait_for_items(&mut self, timeout_ms: u64) -> Result<bool> {
        if self.loaded == 0 {
            self.advance(timeout_ms);
            return Ok(false);
        }
        Ok(true)
    }

    async fn item_count(&self) -> Result<usize> {
        Ok(self.loaded - self.first_rendered())
    }

    async fn item_title(&self, index: usize) -> Result<Option<String>> {
        let i = self.first_rendered() + index;
        Ok((i < self.loaded).then(|| Self::title_of(i)))
    }

    async fn snapshot(&self) -> Result<Vec<ListingItem>> {
        Ok((self.first_rendered()..self.loaded)
            .map(|i| ListingItem {
                id: Self::id_of(i),
                title: Self::title_of(i),
            })
            .collect())
    }

    async fn document_height(&self) -> Result<u64> {
        Ok(self.height())
    }

    async fn scroll_to(&mut self, y: u64) -> Result<()> {
        let y = match self.top_lag_px {
            Some(lag) if y == 0 => {
                self.top_lag_px = None;
                lag
            }
            _ => y,
        };
        self.scroll_y = y.min(self.max_scroll());
        if self.load_on_scroll {
            self.advance(0);
        }
        Ok(())
    }

    async fn scroll_by(&mut self, dy: i64) -> Result<()> {
        let y = self.scroll_y as i64 + dy;
        self.scroll_y = (y.max(0) as u64).min(self.max_scroll());
        if self.load_on_scroll {
            self.advance(0);
        }
        Ok(())
    }

    async fn open_item(&mut self, id: &str) -> Result<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::ActionFailed(format!("post '{}' not rendered", id)))?;
        self.events.push(format!("open {}", id));
        self.opened = Some(index);
        Ok(())
    }

    async fn detail_title(&self) -> Result<String> {
        Ok(self.opened.map(Self::title_of).unwrap_or_default())
    }

    async fn first_comment(&mut self, timeout_ms: u64) -> Result<Option<String>> {
        let Some(index) = self.opened else {
            return Ok(None);
        };
        if self.failing_comments.contains(&index) {
            return Err(Error::Browser(eoka::Error::CdpSimple(
                "comment node detached".into(),
            )));
        }
        match self.comments.get(&index) {
            Some(text) => Ok(Some(text.clone())),
            None => {
                self.advance(timeout_ms);
                Ok(None)
            }
        }
    }

    async fn back_to_listing(&mut self) -> Result<()> {
        self.events.push("back".into());
        self.opened = None;
        if self.reset_on_back {
            self.loaded = INITIAL_BATCH.min(self.total);
            self.scroll_y = 0;
            self.pending_ms = None;
        }
        Ok(())
    }

    async fn pause(&mut self, ms: u64) {
        if self.real_sleep {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
        self.advance(ms);
    }
}

//! The scrape procedure: navigate, load, locate, extract, validate.
//!
//! Each stage runs to completion before the next one starts, against a single
//! [`ListingSource`].

mod extractor;
mod loader;
mod locator;
mod navigator;
mod validate;

#[cfg(test)]
pub(crate) mod fake;

pub use extractor::extract;
pub use loader::load;
pub use locator::locate;
pub use navigator::navigate;
pub use validate::validate;

use crate::config::Config;
use crate::model::{ExtractionResult, TargetRange};
use crate::source::ListingSource;
use crate::wait::WaitPolicy;
use crate::{Error, Result};
use tracing::info;

/// One scrape of one listing.
pub struct ScrapeSession<S> {
    source: S,
    url: String,
    range: TargetRange,
    waits: WaitPolicy,
}

impl<S: ListingSource> ScrapeSession<S> {
    pub fn new(source: S, url: impl Into<String>, range: TargetRange, waits: WaitPolicy) -> Self {
        Self {
            source,
            url: url.into(),
            range,
            waits,
        }
    }

    /// Build a session for the listing, range and waits in `config`.
    pub fn from_config(source: S, config: &Config) -> Result<Self> {
        Ok(Self::new(
            source,
            config.target.resolve_url()?,
            config.range,
            config.waits.clone(),
        ))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Run every stage. Any failure ends the run without partial results.
    pub async fn run(&mut self) -> Result<Vec<ExtractionResult>> {
        let first_title = navigate(&mut self.source, &self.url, &self.waits).await?;

        let count = load(&mut self.source, self.range.end, &self.waits).await?;
        if count < self.range.end {
            return Err(Error::InsufficientPosts {
                found: count,
                required: self.range.end,
            });
        }

        if !locate(&mut self.source, &first_title, &self.waits).await? {
            return Err(Error::FirstItemMoved {
                title: first_title,
                attempts: self.waits.locate_max_attempts,
            });
        }

        let results = extract(&mut self.source, &self.range, &self.waits).await?;
        validate(&results, &self.range)?;

        for r in &results {
            info!("#{} {} | {}", r.position, r.title, r.first_comment);
        }
        Ok(results)
    }
}

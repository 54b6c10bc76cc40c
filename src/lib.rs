//! # feed-scraper
//!
//! Scroll a listing page until enough posts are rendered, then open a range of
//! them and read each post's title and first comment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use feed_scraper::{Config, Runner};
//!
//! # #[tokio::main]
//! # async fn main() -> feed_scraper::Result<()> {
//! let config = Config::load("configs/example.yaml")?;
//! let mut runner = Runner::new(&config.browser).await?;
//! let result = runner.run(&config).await?;
//! for post in &result.results {
//!     println!("{}", post);
//! }
//! runner.close().await?;
//! # Ok(())
//! # }
//! ```

mod browser;
mod config;
mod model;
mod runner;
pub mod session;
pub mod source;
pub mod wait;

pub use browser::PageSource;
pub use config::{BrowserConfig, Config, OnFailure, RetryConfig, Selectors, Target, Viewport};
pub use model::{ExtractionResult, ListingItem, TargetRange, NO_COMMENT};
pub use runner::{RunResult, Runner};
pub use session::ScrapeSession;
pub use source::ListingSource;
pub use wait::WaitPolicy;

/// Result type for feed-scraper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("action failed: {0}")]
    ActionFailed(String),

    #[error("navigator: no posts rendered within {timeout_ms}ms")]
    NoItems { timeout_ms: u64 },

    #[error("loader: insufficient posts, found {found} but need {required}")]
    InsufficientPosts { found: usize, required: usize },

    #[error("locator: first post '{title}' not back at the top after {attempts} scroll-up attempts")]
    FirstItemMoved { title: String, attempts: u32 },

    #[error("extractor: post #{position} ({id}) is no longer in the listing")]
    ItemNotFound { position: usize, id: String },

    #[error("extractor: listing did not reappear after leaving post #{position}")]
    ListingLost { position: usize },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

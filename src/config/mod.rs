mod schema;
mod selectors;

pub use schema::{BrowserConfig, Config, OnFailure, RetryConfig, Target, Viewport};
pub use selectors::Selectors;

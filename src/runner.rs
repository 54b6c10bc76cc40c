use crate::browser::PageSource;
use crate::config::{BrowserConfig, Config};
use crate::model::ExtractionResult;
use crate::session::ScrapeSession;
use crate::source::ListingSource;
use crate::{Error, Result};
use eoka::{Browser, Page};
use std::future::Future;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Result of running a config.
#[derive(Debug)]
pub struct RunResult {
    /// Whether the run succeeded.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
    /// Extracted posts. Empty unless the run succeeded.
    pub results: Vec<ExtractionResult>,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    /// Number of retry attempts made.
    pub retries: u32,
}

/// Owns the browser and runs scrapes in its single tab.
pub struct Runner {
    browser: Browser,
    page: Page,
}

impl Runner {
    /// Launch a browser with the given config.
    pub async fn new(config: &BrowserConfig) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: config.headless,
            proxy: config.proxy.clone(),
            user_agent: config.user_agent.clone(),
            viewport_width: config.viewport.as_ref().map(|v| v.width).unwrap_or(1280),
            viewport_height: config.viewport.as_ref().map(|v| v.height).unwrap_or(720),
            ..Default::default()
        };

        debug!(
            "Launching browser (headless: {}, proxy: {:?})",
            config.headless, config.proxy
        );
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self { browser, page })
    }

    /// Run the scrape, retrying whole attempts as configured.
    pub async fn run(&self, config: &Config) -> Result<RunResult> {
        let result = run_with_retries(config, || self.run_once(config)).await;
        if !result.success {
            self.handle_failure(config).await;
        }
        Ok(result)
    }

    async fn run_once(&self, config: &Config) -> Result<Vec<ExtractionResult>> {
        let source = PageSource::new(&self.page, config.selectors.clone());
        run_session(source, config).await
    }

    async fn handle_failure(&self, config: &Config) {
        let Some(path) = config.on_failure.as_ref().and_then(|f| f.screenshot.as_ref()) else {
            return;
        };
        let path = screenshot_path(path);
        info!("Saving failure screenshot to: {}", path);
        match self.page.screenshot().await {
            Ok(data) => {
                if let Err(e) = std::fs::write(&path, data) {
                    warn!("Failed to save screenshot: {}", e);
                }
            }
            Err(e) => warn!("Failed to capture screenshot: {}", e),
        }
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

/// Run `attempt` up to `on_failure.retry.attempts` times, sleeping
/// `delay_ms` between tries. Results are only kept from a successful attempt.
pub(crate) async fn run_with_retries<F, Fut>(config: &Config, mut attempt: F) -> RunResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<ExtractionResult>>>,
{
    let start = Instant::now();
    let retry_config = config.on_failure.as_ref().and_then(|f| f.retry.as_ref());
    let max_attempts = retry_config.map(|r| r.attempts).unwrap_or(1).max(1);
    let retry_delay = retry_config.map(|r| r.delay_ms).unwrap_or(0);

    let mut last_error = None;
    let mut retries = 0;

    for n in 1..=max_attempts {
        if n > 1 {
            retries += 1;
            info!("Retry attempt {}/{}", n, max_attempts);
            if retry_delay > 0 {
                tokio::time::sleep(Duration::from_millis(retry_delay)).await;
            }
        }

        match attempt().await {
            Ok(results) => {
                return RunResult {
                    success: true,
                    error: None,
                    results,
                    duration_ms: start.elapsed().as_millis() as u64,
                    retries,
                };
            }
            Err(e) => {
                warn!("Attempt {} failed: {}", n, e);
                last_error = Some(e.to_string());
            }
        }
    }

    RunResult {
        success: false,
        error: last_error,
        results: Vec::new(),
        duration_ms: start.elapsed().as_millis() as u64,
        retries,
    }
}

/// One full session over `source`, bounded by `timeout_ms`.
pub(crate) async fn run_session<S: ListingSource>(
    source: S,
    config: &Config,
) -> Result<Vec<ExtractionResult>> {
    let mut session = ScrapeSession::from_config(source, config)?;
    let budget = Duration::from_millis(config.timeout_ms);
    match tokio::time::timeout(budget, session.run()).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(format!(
            "run exceeded {}ms",
            config.timeout_ms
        ))),
    }
}

fn screenshot_path(template: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    template.replace("{timestamp}", &timestamp.to_string())
}

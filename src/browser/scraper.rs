use crate::error::RenderError;
use headless_chrome::Tab;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counts resources requested so far; stable across polls means the network went quiet
const RESOURCE_COUNT_SCRIPT: &str = "document.readyState === 'complete' \
    ? performance.getEntriesByType('resource').length : -1";

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Browser identity matching the static HTTP client
#[derive(Debug, Clone)]
pub struct PageIdentity {
    pub user_agent: String,
    pub accept_language: String,
    pub referer: String,
}

/// Page-level operations on one browser tab
pub struct BrowserScraper {
    tab: Arc<Tab>,
    default_timeout: Duration,
}

impl BrowserScraper {
    /// Create a new scraper with a custom default timeout
    pub fn with_timeout(tab: Arc<Tab>, timeout: Duration) -> Self {
        Self {
            tab,
            default_timeout: timeout,
        }
    }

    /// Present the same user agent and referer as the static client
    pub fn apply_identity(&self, identity: &PageIdentity) -> Result<(), RenderError> {
        self.tab
            .set_user_agent(&identity.user_agent, Some(&identity.accept_language), None)
            .map_err(|e| RenderError::Navigation(format!("Failed to set user agent: {}", e)))?;

        let headers = HashMap::from([("Referer", identity.referer.as_str())]);
        self.tab
            .set_extra_http_headers(headers)
            .map_err(|e| RenderError::Navigation(format!("Failed to set headers: {}", e)))?;
        Ok(())
    }

    /// Navigate to a URL and wait for page load
    pub fn navigate(&self, url: &str) -> Result<(), RenderError> {
        log::debug!("Navigating to {}", url);
        self.tab
            .navigate_to(url)
            .map_err(|e| RenderError::Navigation(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| RenderError::Navigation(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait until the document is loaded and no new resource has been
    /// requested for a short quiet period
    pub fn wait_for_network_idle(&self) -> Result<(), RenderError> {
        let start = Instant::now();
        let mut last_count: i64 = -1;
        let mut stable_since = Instant::now();

        loop {
            if start.elapsed() > self.default_timeout {
                return Err(RenderError::Timeout("network idle".to_string()));
            }

            let count = self
                .tab
                .evaluate(RESOURCE_COUNT_SCRIPT, false)
                .ok()
                .and_then(|result| result.value)
                .and_then(|v| v.as_i64())
                .unwrap_or(-1);

            if count < 0 || count != last_count {
                last_count = count;
                stable_since = Instant::now();
            } else if stable_since.elapsed() >= QUIET_PERIOD {
                log::debug!(
                    "Network idle after {:?} ({} resources)",
                    start.elapsed(),
                    count
                );
                return Ok(());
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Give deferred scripts time to populate the page
    pub fn settle(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Run a script that returns `JSON.stringify(...)` and decode its result
    pub fn evaluate_json<T: DeserializeOwned>(&self, script: &str) -> Result<T, RenderError> {
        let raw = self.evaluate_script(script)?;
        serde_json::from_str(&raw)
            .map_err(|e| RenderError::Evaluation(format!("Unexpected script result: {}", e)))
    }

    /// Execute JavaScript and return the result as a string
    pub fn evaluate_script(&self, script: &str) -> Result<String, RenderError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| RenderError::Evaluation(e.to_string()))?;

        result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .ok_or_else(|| RenderError::Evaluation("Script returned no value".to_string()))
    }

    /// Close the tab; failures are logged since the browser goes away anyway
    pub fn close(&self) {
        if let Err(e) = self.tab.close(true) {
            log::debug!("Tab close failed: {}", e);
        }
    }
}

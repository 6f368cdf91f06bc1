use super::config::BrowserConfig;
use crate::error::RenderError;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::{OsStr, OsString};
use std::sync::Arc;

/// One isolated Chrome process.
///
/// The process is killed when the session is dropped, so every exit path of
/// a render (success, error, timeout of the surrounding task) tears it down.
pub struct BrowserSession {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Launch a fresh browser with the given configuration
    pub fn launch(config: BrowserConfig) -> Result<Self, RenderError> {
        let args: Vec<OsString> = config.chrome_flags.iter().map(OsString::from).collect();
        let launch_options = Self::build_launch_options(&config, &args)?;

        log::info!("Launching headless browser (headless={})", config.headless);
        let browser =
            Browser::new(launch_options).map_err(|e| RenderError::Launch(e.to_string()))?;

        Ok(Self { browser, config })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [OsString],
    ) -> Result<LaunchOptions<'a>, RenderError> {
        LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((config.window_width, config.window_height)))
            .path(config.chrome_path.clone())
            .idle_browser_timeout(config.idle_timeout())
            .args(args.iter().map(OsString::as_os_str).collect::<Vec<&OsStr>>())
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))
    }

    /// Open a new tab with the configured default timeout
    pub fn new_tab(&self) -> Result<Arc<Tab>, RenderError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| RenderError::TabCreation(e.to_string()))?;
        tab.set_default_timeout(self.config.timeout());
        Ok(tab)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        log::debug!("Closing browser session");
    }
}

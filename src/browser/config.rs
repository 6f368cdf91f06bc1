use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for headless browser sessions
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Navigation and network-idle timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Extra wait after network idle for deferred scripts, in milliseconds
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Chrome/Chromium binary; auto-detected when unset
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Seconds an idle browser is kept alive before it shuts itself down
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Chrome sandboxing; containers running as root usually need it off
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,

    /// Additional Chrome flags
    #[serde(default = "default_chrome_flags")]
    pub chrome_flags: Vec<String>,
}

fn default_headless() -> bool { true }
fn default_timeout() -> u64 { 30 }
fn default_settle_delay() -> u64 { 3000 }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_idle_timeout() -> u64 { 60 }
fn default_sandbox() -> bool { true }
fn default_chrome_flags() -> Vec<String> {
    vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-dev-shm-usage".to_string(),
    ]
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            timeout_secs: default_timeout(),
            settle_delay_ms: default_settle_delay(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            chrome_path: None,
            idle_timeout_secs: default_idle_timeout(),
            sandbox: default_sandbox(),
            chrome_flags: default_chrome_flags(),
        }
    }
}

impl BrowserConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Upper bound for one whole render: launch, navigation, network idle,
    /// settle delay and extraction
    pub fn render_timeout(&self) -> Duration {
        self.timeout() * 2 + self.settle_delay() + Duration::from_secs(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!((config.window_width, config.window_height), (1920, 1080));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.settle_delay(), Duration::from_secs(3));
        assert!(config
            .chrome_flags
            .iter()
            .any(|f| f.contains("AutomationControlled")));
    }

    #[test]
    fn test_render_timeout_covers_all_waits() {
        let config = BrowserConfig {
            timeout_secs: 5,
            settle_delay_ms: 1500,
            ..Default::default()
        };
        assert!(config.render_timeout() > config.timeout() * 2 + config.settle_delay());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BrowserConfig = toml::from_str(
            r#"
            sandbox = false
            chrome_path = "/usr/bin/chromium"
            "#,
        )
        .unwrap();
        assert!(!config.sandbox);
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.settle_delay_ms, 3000);
    }
}

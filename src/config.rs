use crate::browser::{BrowserConfig, HeadlessRenderer};
use crate::error::{ConfigError, FetchError};
use crate::http_client::{HttpClientConfig, SiteHttpClient};
use crate::site::SiteProfile;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://www.leercapitulo.co";

/// Environment variable overriding `site.base_url`
pub const BASE_URL_ENV: &str = "LEERCAPITULO_BASE_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpClientConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Origin every relative url is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        let mut config = if path.exists() {
            match Self::from_path(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.apply_env();
        config
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<Config>(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(base) = std::env::var(BASE_URL_ENV) {
            if !base.trim().is_empty() {
                self.site.base_url = base.trim().to_string();
            }
        }
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.site.base_url.trim())
            .map_err(|_| ConfigError::InvalidBaseUrl(self.site.base_url.clone()))?;
        if !url.has_host() {
            return Err(ConfigError::InvalidBaseUrl(self.site.base_url.clone()));
        }
        Ok(url)
    }

    /// Build the immutable recognition profile injected into the extractors
    pub fn site_profile(&self) -> Result<SiteProfile, ConfigError> {
        Ok(SiteProfile::new(self.base_url()?))
    }

    /// Create the static client for `site` from the `[http]` settings
    pub fn create_http_client(&self, site: &SiteProfile) -> Result<SiteHttpClient, FetchError> {
        SiteHttpClient::new(self.http.clone(), site)
    }

    /// Create a headless renderer sharing the static client's identity
    pub fn create_renderer(&self, site: &SiteProfile) -> HeadlessRenderer {
        HeadlessRenderer::new(self.browser.clone(), &self.http, site)
    }
}

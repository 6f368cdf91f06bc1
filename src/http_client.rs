use crate::document::Document;
use crate::error::FetchError;
use crate::site::SiteProfile;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, REFERER};
use reqwest::{redirect, Client, ClientBuilder, Response, Url};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const HTML_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8";

/// Configuration for the static HTTP client
#[derive(Debug, Deserialize, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Redirect hops followed before giving up
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_timeout() -> u64 { 30 }
fn default_max_redirects() -> usize { 10 }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_accept_language() -> String { "es-ES,es;q=0.9,en;q=0.8".to_string() }

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP client presenting itself as a regular browser to the site.
///
/// Every call is a single attempt: non-2xx statuses, network failures and
/// timeouts come back as [`FetchError`] for the caller to retry or not.
/// Idle connections are not kept between calls.
#[derive(Clone)]
pub struct SiteHttpClient {
    client: Client,
    base_url: Url,
}

impl SiteHttpClient {
    pub fn new(config: HttpClientConfig, site: &SiteProfile) -> Result<Self, FetchError> {
        let headers = Self::default_headers(&config, &site.base_url)?;

        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .brotli(true)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: site.base_url.clone(),
        })
    }

    /// Headers that mimic a real browser visiting the site
    fn default_headers(config: &HttpClientConfig, base_url: &Url) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(HTML_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, header_value("Accept-Language", &config.accept_language)?);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(REFERER, header_value("Referer", base_url.as_str())?);
        Ok(headers)
    }

    async fn get(&self, url: &str, accept: &'static str) -> Result<Response, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        log::info!("Fetching {}", parsed);
        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        log::debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    /// Fetch a page and return its body
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url, HTML_ACCEPT).await?;
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        log::debug!("Fetched {} bytes of HTML from {}", text.len(), url);
        Ok(text)
    }

    /// Fetch a page and parse it, resolving relative urls against the site origin
    pub async fn fetch_document(&self, url: &str) -> Result<Document, FetchError> {
        let html = self.fetch_html(url).await?;
        Ok(Document::parse(&html, self.base_url.clone()))
    }

    /// Download the raw bytes of one image
    pub async fn fetch_bytes(&self, image_url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(image_url, IMAGE_ACCEPT).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(image_url, e))?;
        log::debug!("Downloaded {} bytes from {}", bytes.len(), image_url);
        Ok(bytes.to_vec())
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SiteHttpClient::new(HttpClientConfig::default(), &SiteProfile::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_default_headers() {
        let config = HttpClientConfig::default();
        let base = Url::parse("https://www.leercapitulo.co").unwrap();
        let headers = SiteHttpClient::default_headers(&config, &base).unwrap();

        assert_eq!(headers[REFERER], "https://www.leercapitulo.co/");
        assert_eq!(headers[ACCEPT_LANGUAGE], "es-ES,es;q=0.9,en;q=0.8");
        assert_eq!(headers[CACHE_CONTROL], "no-cache");
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
    }

    #[test]
    fn test_invalid_header_value() {
        let config = HttpClientConfig {
            accept_language: "es\nen".to_string(),
            ..Default::default()
        };
        let result = SiteHttpClient::new(config, &SiteProfile::default());
        assert!(matches!(result, Err(FetchError::InvalidHeader { name: "Accept-Language", .. })));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = SiteHttpClient::new(HttpClientConfig::default(), &SiteProfile::default()).unwrap();
        let result = client.fetch_html("/manga/relative").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}

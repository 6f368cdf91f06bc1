use reqwest::StatusCode;

/// Errors raised by the static fetch layer and the image fetcher
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid header value for {name}: {value}")]
    InvalidHeader { name: &'static str, value: String },

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url: url.to_string(),
                status,
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// Errors raised while driving the headless browser
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Tab creation failed: {0}")]
    TabCreation(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("JavaScript evaluation error: {0}")]
    Evaluation(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Render task failed: {0}")]
    Join(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid site base url '{0}'")]
    InvalidBaseUrl(String),
}

/// Any failure surfaced by a site operation
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "https://example.com/manga/x".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("/manga/x"));
    }

    #[test]
    fn test_scrape_error_is_transparent() {
        let err: ScrapeError = RenderError::Timeout("network idle".to_string()).into();
        assert_eq!(err.to_string(), "Timeout waiting for: network idle");
        assert!(matches!(err, ScrapeError::Render(_)));
    }
}

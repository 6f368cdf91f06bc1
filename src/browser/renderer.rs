use super::config::BrowserConfig;
use super::images::{select_page_images, RenderedPage, EXTRACTION_SCRIPT};
use super::manager::BrowserSession;
use super::scraper::{BrowserScraper, PageIdentity};
use crate::error::RenderError;
use crate::http_client::HttpClientConfig;
use crate::models::ChapterImageSet;
use crate::site::SiteProfile;
use async_trait::async_trait;

/// Turns a chapter reader url into its ordered page image urls
#[async_trait]
pub trait ChapterRenderer: Send + Sync {
    async fn extract_images(&self, chapter_url: &str) -> Result<ChapterImageSet, RenderError>;
}

/// Renders chapters in a fresh headless Chrome per call
pub struct HeadlessRenderer {
    config: BrowserConfig,
    identity: PageIdentity,
    site: SiteProfile,
}

impl HeadlessRenderer {
    /// Browser requests carry the same user agent, language and referer as
    /// the static client built from `http`
    pub fn new(config: BrowserConfig, http: &HttpClientConfig, site: &SiteProfile) -> Self {
        let identity = PageIdentity {
            user_agent: http.user_agent.clone(),
            accept_language: http.accept_language.clone(),
            referer: site.base_url.to_string(),
        };
        Self {
            config,
            identity,
            site: site.clone(),
        }
    }
}

#[async_trait]
impl ChapterRenderer for HeadlessRenderer {
    async fn extract_images(&self, chapter_url: &str) -> Result<ChapterImageSet, RenderError> {
        let config = self.config.clone();
        let identity = self.identity.clone();
        let url = chapter_url.to_string();
        let limit = config.render_timeout();

        log::info!("Rendering chapter {}", chapter_url);
        let task = tokio::task::spawn_blocking(move || render_page(config, &identity, &url));

        // On timeout the blocking task keeps running until its own tab
        // timeouts fire; its session is dropped when it returns.
        let page = match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(RenderError::Join(join_err.to_string())),
            Err(_) => Err(RenderError::Timeout(format!("rendering {}", chapter_url))),
        }
        .inspect_err(|e| log::warn!("Render of {} failed: {}", chapter_url, e))?;

        let set = ChapterImageSet {
            chapter_url: chapter_url.to_string(),
            images: select_page_images(&page, &self.site),
        };
        if set.is_empty() {
            log::warn!("No images found for {}", chapter_url);
        } else {
            log::info!("Found {} images for {}", set.len(), chapter_url);
        }
        Ok(set)
    }
}

/// Blocking render: one session, one tab, torn down on return
fn render_page(
    config: BrowserConfig,
    identity: &PageIdentity,
    url: &str,
) -> Result<RenderedPage, RenderError> {
    let settle = config.settle_delay();
    let timeout = config.timeout();
    let session = BrowserSession::launch(config)?;
    let scraper = BrowserScraper::with_timeout(session.new_tab()?, timeout);

    let result = (|| {
        scraper.apply_identity(identity)?;
        scraper.navigate(url)?;
        scraper.wait_for_network_idle()?;
        scraper.settle(settle);
        scraper.evaluate_json::<RenderedPage>(EXTRACTION_SCRIPT)
    })();

    scraper.close();
    drop(session);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matches_static_client() {
        let site = SiteProfile::default();
        let renderer = HeadlessRenderer::new(BrowserConfig::default(), &HttpClientConfig::default(), &site);
        assert_eq!(renderer.identity.referer, "https://www.leercapitulo.co/");
        assert_eq!(renderer.identity.user_agent, crate::http_client::DEFAULT_USER_AGENT);
        assert_eq!(renderer.identity.accept_language, "es-ES,es;q=0.9,en;q=0.8");
    }

    #[tokio::test]
    async fn test_missing_browser_is_a_render_error() {
        let config = BrowserConfig {
            chrome_path: Some("/nonexistent/chrome".into()),
            ..Default::default()
        };
        let renderer = HeadlessRenderer::new(config, &HttpClientConfig::default(), &SiteProfile::default());
        let result = renderer
            .extract_images("https://www.leercapitulo.co/leer/x/1/")
            .await;
        assert!(matches!(result, Err(RenderError::Launch(_))));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome and network access
    async fn test_render_live_chapter() {
        let site = SiteProfile::default();
        let renderer = HeadlessRenderer::new(BrowserConfig::default(), &HttpClientConfig::default(), &site);
        let set = renderer
            .extract_images("https://www.leercapitulo.co/leer/one-piece/1/")
            .await
            .unwrap();
        assert!(!set.is_empty());
        assert_eq!(set.len(), set.images.len());
    }
}

use crate::browser::ChapterRenderer;
use crate::config::Config;
use crate::error::Result;
use crate::http_client::SiteHttpClient;
use crate::models::{Chapter, ChapterImageSet, ListingPage, MangaDetail};
use crate::parsers::{
    has_next_latest_page, has_next_page, parse_chapter_list, parse_manga_detail, parse_manga_list,
};
use crate::site::SiteProfile;

/// Every extraction the engine offers for leercapitulo.co.
///
/// Each call fetches or renders fresh; nothing is cached between calls and
/// nothing is retried. Url arguments may be absolute or relative to the
/// site origin.
pub struct LeerCapitulo {
    site: SiteProfile,
    http: SiteHttpClient,
    renderer: Box<dyn ChapterRenderer>,
}

impl LeerCapitulo {
    pub fn new(site: SiteProfile, http: SiteHttpClient, renderer: Box<dyn ChapterRenderer>) -> Self {
        Self {
            site,
            http,
            renderer,
        }
    }

    /// Wire the static client and the headless renderer from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let site = config.site_profile()?;
        let http = config.create_http_client(&site)?;
        let renderer = Box::new(config.create_renderer(&site));
        Ok(Self::new(site, http, renderer))
    }

    pub fn site(&self) -> &SiteProfile {
        &self.site
    }

    fn resolve(&self, url: &str) -> String {
        crate::helpers::absolutize(&self.site.base_url, url)
    }

    /// Ongoing series, most popular first
    pub async fn popular(&self, page: u32) -> Result<ListingPage> {
        let page = page.max(1);
        let url = format!("{}/status/ongoing/?page={}", self.site.origin(), page);
        let doc = self.http.fetch_document(&url).await?;

        Ok(ListingPage {
            items: parse_manga_list(&doc, &self.site),
            page,
            has_next: has_next_page(&doc, page),
        })
    }

    /// Recently updated series
    pub async fn latest(&self, page: u32) -> Result<ListingPage> {
        let page = page.max(1);
        let url = if page == 1 {
            self.site.base_url.to_string()
        } else {
            format!("{}/?page={}", self.site.origin(), page)
        };
        let doc = self.http.fetch_document(&url).await?;

        Ok(ListingPage {
            items: parse_manga_list(&doc, &self.site),
            page,
            has_next: has_next_latest_page(&doc, page),
        })
    }

    /// Series whose title contains `query`, case-insensitively.
    ///
    /// The site filters in the browser, so the full listing is fetched and
    /// filtered here.
    pub async fn search(&self, query: &str, page: u32) -> Result<ListingPage> {
        let page = page.max(1);
        let url = format!(
            "{}/?q={}&page={}",
            self.site.origin(),
            urlencoding::encode(query),
            page
        );
        let doc = self.http.fetch_document(&url).await?;

        let needle = query.trim().to_lowercase();
        let items: Vec<_> = parse_manga_list(&doc, &self.site)
            .into_iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect();
        log::debug!("Search '{}' matched {} entries", query, items.len());

        Ok(ListingPage {
            items,
            page,
            has_next: has_next_page(&doc, page),
        })
    }

    pub async fn manga_detail(&self, manga_url: &str) -> Result<MangaDetail> {
        let url = self.resolve(manga_url);
        let doc = self.http.fetch_document(&url).await?;
        Ok(parse_manga_detail(&doc, &self.site, &url))
    }

    /// Chapters of a manga, oldest first
    pub async fn chapters(&self, manga_url: &str) -> Result<Vec<Chapter>> {
        let url = self.resolve(manga_url);
        let doc = self.http.fetch_document(&url).await?;
        Ok(parse_chapter_list(&doc, &self.site))
    }

    /// Page images of one chapter, in reading order
    pub async fn chapter_images(&self, chapter_url: &str) -> Result<ChapterImageSet> {
        let url = self.resolve(chapter_url);
        Ok(self.renderer.extract_images(&url).await?)
    }

    /// Raw bytes of one page image
    pub async fn image_bytes(&self, image_url: &str) -> Result<Vec<u8>> {
        let url = self.resolve(image_url);
        Ok(self.http.fetch_bytes(&url).await?)
    }
}

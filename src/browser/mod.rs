//! Headless-browser image extraction for chapter reader pages
//!
//! Reader pages fill in their images from script, so they are rendered in an
//! isolated headless Chrome per call. The rest of the crate only sees the
//! [`ChapterRenderer`] trait, which tests replace with a static fake.
//!
//! # Example
//!
//! ```no_run
//! use leercapitulo_scraper::browser::{BrowserConfig, ChapterRenderer, HeadlessRenderer};
//! use leercapitulo_scraper::http_client::HttpClientConfig;
//! use leercapitulo_scraper::site::SiteProfile;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let site = SiteProfile::default();
//! let renderer = HeadlessRenderer::new(BrowserConfig::default(), &HttpClientConfig::default(), &site);
//!
//! let set = renderer
//!     .extract_images("https://www.leercapitulo.co/leer/one-piece/1/")
//!     .await?;
//! println!("Found {} pages", set.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod images;
pub mod manager;
pub mod renderer;
pub mod scraper;

pub use config::BrowserConfig;
pub use images::{select_page_images, ImageCandidate, RenderedPage};
pub use manager::BrowserSession;
pub use renderer::{ChapterRenderer, HeadlessRenderer};
pub use scraper::{BrowserScraper, PageIdentity};

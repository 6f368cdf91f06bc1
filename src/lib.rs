// Library interface for leercapitulo_scraper
// The binary and the integration tests both go through these modules

pub mod browser;
pub mod config;
pub mod dates;
pub mod document;
pub mod error;
pub mod helpers;
pub mod http_client;
pub mod models;
pub mod parsers;
pub mod site;
pub mod sources;

pub use error::{ConfigError, FetchError, RenderError, Result, ScrapeError};
pub use sources::LeerCapitulo;

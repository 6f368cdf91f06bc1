//! Recognition patterns and fixed vocabularies for LeerCapitulo
//!
//! Everything an extractor needs to know about the site lives in a
//! [`SiteProfile`], built once from the configured origin and passed by
//! reference. Tests build profiles against a mock origin.

use regex::Regex;
use reqwest::Url;

const TITLE_SUFFIXES: [&str; 3] = [
    " - Read Manga Online leercapitulo.co",
    " - Leer Manga Online leercapitulo.co",
    " - leercapitulo.co",
];

/// Category words that show up among genre links but are not genres
const NON_GENRES: [&str; 14] = [
    "manga",
    "manhwa",
    "manhua",
    "novel",
    "one shot",
    "oneshot",
    "ongoing",
    "completed",
    "hiatus",
    "cancelled",
    "en curso",
    "finalizado",
    "publicándose",
    "cancelado",
];

/// href fragments of genre links, used when no genre container exists
const GENRE_HINTS: [&str; 6] = [
    "Action",
    "Adventure",
    "Comedy",
    "Accion",
    "Aventura",
    "Comedia",
];

const ASSET_PATHS: [&str; 1] = ["/assets/"];

#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub base_url: Url,
    pub title_suffixes: Vec<String>,
    /// Path fragment of manga detail links
    pub manga_path: String,
    /// Path fragment of chapter reader links
    pub reader_path: String,
    pub chapter_number: Regex,
    pub chapter_marker: Regex,
    pub image_extension: Regex,
    pub absolute_url: Regex,
    pub non_genres: Vec<String>,
    pub genre_hints: Vec<String>,
    pub asset_paths: Vec<String>,
}

impl SiteProfile {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            title_suffixes: TITLE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            manga_path: "/manga/".to_string(),
            reader_path: "/leer/".to_string(),
            chapter_number: Regex::new(
                r"(?i)(?:Cap[ií]tulo|Cap\.?|Chapter|Ch\.?)\s*(\d+(?:\.\d+)?)",
            )
            .expect("chapter number pattern"),
            chapter_marker: Regex::new(r"(?i)cap|chapter").expect("chapter marker pattern"),
            image_extension: Regex::new(r"(?i)\.(?:jpe?g|png|webp|gif)")
                .expect("image extension pattern"),
            absolute_url: Regex::new(r"^https?://").expect("absolute url pattern"),
            non_genres: NON_GENRES.iter().map(|s| s.to_string()).collect(),
            genre_hints: GENRE_HINTS.iter().map(|s| s.to_string()).collect(),
            asset_paths: ASSET_PATHS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Origin without a trailing slash, for building listing urls
    pub fn origin(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn is_image_url(&self, url: &str) -> bool {
        self.image_extension.is_match(url)
    }

    pub fn is_asset(&self, url: &str) -> bool {
        self.asset_paths.iter().any(|p| url.contains(p.as_str()))
    }

    pub fn is_non_genre(&self, candidate: &str) -> bool {
        let lower = candidate.trim().to_lowercase();
        self.non_genres.iter().any(|w| *w == lower)
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        let base = Url::parse(crate::config::DEFAULT_BASE_URL).expect("default base url");
        Self::new(base)
    }
}

//! Small pure functions shared by the extractors
//!
//! - Title suffix stripping
//! - Url absolutization and image source resolution
//! - Chapter number, status and genre normalization
//!
//! None of these fail: unrecognized input maps to an explicit "no match"
//! value (`None`, [`MangaStatus::Unknown`], the input unchanged).
//!
//! # Examples
//!
//! ```
//! use leercapitulo_scraper::helpers::parse_chapter_number;
//! use leercapitulo_scraper::site::SiteProfile;
//!
//! let profile = SiteProfile::default();
//! assert_eq!(parse_chapter_number(&profile, "Capítulo 12"), Some(12.0));
//! assert_eq!(parse_chapter_number(&profile, "Epílogo"), None);
//! ```

use crate::document::{first_attr, Document};
use crate::models::MangaStatus;
use crate::site::SiteProfile;
use reqwest::Url;
use scraper::ElementRef;
use std::collections::HashSet;

/// Attributes holding an image's real source, lazy-load first
pub const IMAGE_SOURCE_ATTRS: [&str; 3] = ["data-src", "data-lazy", "src"];

/// Remove known site-branding suffixes. Repeats until none applies, so
/// stripping an already stripped title is a no-op.
pub fn strip_title_suffix(title: &str, suffixes: &[String]) -> String {
    let mut current = title.trim();
    loop {
        let stripped = suffixes
            .iter()
            .find_map(|suffix| current.strip_suffix(suffix.as_str()));
        match stripped {
            Some(rest) => current = rest.trim(),
            None => return current.to_string(),
        }
    }
}

/// Resolve `raw` against `base`. Urls that already carry a scheme are
/// returned unchanged; empty input stays empty.
pub fn absolutize(base: &Url, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    match base.join(raw) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::debug!("Could not resolve '{}' against {}: {}", raw, base, e);
            raw.to_string()
        }
    }
}

/// Absolute source of an image element (`data-src → data-lazy → src`)
pub fn image_source(doc: &Document, img: ElementRef<'_>) -> Option<String> {
    first_attr(img, &IMAGE_SOURCE_ATTRS)
        .map(|src| doc.absolutize(&src))
        .filter(|src| !src.is_empty())
}

/// Chapter number from labels like "Capítulo 12", "Cap. 12", "Chapter 12.5" or "Ch 12"
pub fn parse_chapter_number(site: &SiteProfile, label: &str) -> Option<f64> {
    site.chapter_number
        .captures(label)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Map a localized status label to a [`MangaStatus`]
pub fn parse_status(label: &str) -> MangaStatus {
    let lower = label.to_lowercase();
    const ONGOING: [&str; 5] = ["ongoing", "publicándose", "publicandose", "en curso", "en emisión"];
    const COMPLETED: [&str; 4] = ["completed", "finalizado", "completado", "terminado"];

    if ONGOING.iter().any(|s| lower.contains(s)) {
        MangaStatus::Ongoing
    } else if COMPLETED.iter().any(|s| lower.contains(s)) {
        MangaStatus::Completed
    } else {
        MangaStatus::Unknown
    }
}

/// Drop empty entries and non-genre vocabulary, keeping first occurrences in order
pub fn filter_genres<I, S>(site: &SiteProfile, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|g| g.as_ref().trim().to_string())
        .filter(|g| !g.is_empty() && !site.is_non_genre(g))
        .filter(|g| seen.insert(g.to_lowercase()))
        .collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel chapter number for chapters whose label carries no number
pub const UNNUMBERED_CHAPTER: f64 = -1.0;

/// One entry of a listing page (popular, latest, search)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MangaSummary {
    pub url: String,
    pub title: String,
    /// Absolute image url, or empty when no thumbnail was found
    pub thumbnail: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MangaStatus {
    Ongoing,
    Completed,
    #[default]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MangaDetail {
    pub url: String,
    pub title: String,
    pub cover: String,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub status: MangaStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Chapter {
    pub url: String,
    pub name: String,
    /// Non-negative, or [`UNNUMBERED_CHAPTER`]
    pub chapter_number: f64,
    pub date: Option<DateTime<Utc>>,
}

impl Chapter {
    pub fn is_numbered(&self) -> bool {
        self.chapter_number >= 0.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListingPage {
    pub items: Vec<MangaSummary>,
    pub page: u32,
    pub has_next: bool,
}

/// Ordered page images of one chapter
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ChapterImageSet {
    pub chapter_url: String,
    pub images: Vec<String>,
}

impl ChapterImageSet {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MangaStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
        assert_eq!(MangaStatus::default(), MangaStatus::Unknown);
    }

    #[test]
    fn test_chapter_date_is_iso8601() {
        let chapter = Chapter {
            url: "https://www.leercapitulo.co/leer/abc/1/".to_string(),
            name: "Capítulo 1".to_string(),
            chapter_number: 1.0,
            date: Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()),
        };
        let json = serde_json::to_value(&chapter).unwrap();
        assert_eq!(json["date"], "2024-03-05T00:00:00Z");
        assert_eq!(json["chapter_number"], 1.0);
        assert!(chapter.is_numbered());
    }
}

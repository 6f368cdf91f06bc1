//! Static HTML extractors
//!
//! Each extractor is a pure function over a parsed [`Document`](crate::document::Document)
//! and the [`SiteProfile`](crate::site::SiteProfile). An empty result is the
//! expected outcome for unfamiliar markup, never an error.

pub mod chapters;
pub mod detail;
pub mod listing;
pub mod pagination;

pub use chapters::{parse_chapter_list, parse_chapter_list_at};
pub use detail::parse_manga_detail;
pub use listing::parse_manga_list;
pub use pagination::{has_next_latest_page, has_next_page};

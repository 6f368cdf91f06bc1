use crate::document::{parent_element, select_in, text, Document};
use crate::helpers::{image_source, strip_title_suffix};
use crate::models::MangaSummary;
use crate::site::SiteProfile;
use scraper::ElementRef;
use std::collections::HashSet;

/// Extract every manga linked from a listing page (popular, latest, search).
///
/// Entries are unique by url and keep the order of their first anchor.
pub fn parse_manga_list(doc: &Document, site: &SiteProfile) -> Vec<MangaSummary> {
    let anchor_css = format!(r#"a[href*="{}"]"#, site.manga_path);
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for anchor in doc.select_all(&anchor_css) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.contains(site.reader_path.as_str()) {
            continue;
        }
        let title = strip_title_suffix(&text(anchor), &site.title_suffixes);
        if title.is_empty() {
            continue;
        }
        let url = doc.absolutize(href);
        if url.is_empty() || !seen.insert(url.clone()) {
            continue;
        }

        let thumbnail = find_thumbnail(doc, anchor).unwrap_or_default();
        items.push(MangaSummary {
            url,
            title,
            thumbnail,
        });
    }

    if items.is_empty() {
        log::debug!("No manga entries found on listing page");
    } else {
        log::debug!("Found {} manga entries", items.len());
    }
    items
}

/// Image inside the anchor, then its parent, then its grandparent. Cover
/// links that sit next to the title link are siblings of the parent and so
/// are reached through the grandparent.
fn find_thumbnail(doc: &Document, anchor: ElementRef<'_>) -> Option<String> {
    let parent = parent_element(anchor);
    let grandparent = parent.and_then(parent_element);

    [Some(anchor), parent, grandparent]
        .into_iter()
        .flatten()
        .find_map(|scope| select_in(scope, "img").and_then(|img| image_source(doc, img)))
}

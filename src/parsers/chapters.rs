use crate::dates::normalize_date_at;
use crate::document::{
    attr, following_element_siblings, parent_element, select_in, selector, text, Document,
};
use crate::helpers::parse_chapter_number;
use crate::models::{Chapter, UNNUMBERED_CHAPTER};
use crate::site::SiteProfile;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Selector};

const DATE_CSS: &str = ".date, .fecha, time, span.time";

/// Extract the chapter list of a manga page, oldest first.
///
/// The site lists chapters newest first; the result is reversed from
/// document order. Dates are resolved relative to the current instant.
pub fn parse_chapter_list(doc: &Document, site: &SiteProfile) -> Vec<Chapter> {
    parse_chapter_list_at(doc, site, Utc::now())
}

/// Same as [`parse_chapter_list`] with a fixed reference instant for
/// relative dates
pub fn parse_chapter_list_at(
    doc: &Document,
    site: &SiteProfile,
    now: DateTime<Utc>,
) -> Vec<Chapter> {
    let mut anchors = doc.select_all(&format!(r#"h4 > a[href*="{}"]"#, site.reader_path));
    if anchors.is_empty() {
        log::debug!("No heading-wrapped chapter links, scanning all reader links");
        anchors = doc
            .select_all(&format!(r#"a[href*="{}"]"#, site.reader_path))
            .into_iter()
            .filter(|a| site.chapter_marker.is_match(&text(*a)))
            .collect();
    }

    let mut chapters: Vec<Chapter> = anchors
        .into_iter()
        .filter_map(|anchor| parse_chapter(doc, site, anchor, now))
        .collect();
    chapters.reverse();

    log::debug!("Found {} chapters", chapters.len());
    chapters
}

fn parse_chapter(
    doc: &Document,
    site: &SiteProfile,
    anchor: ElementRef<'_>,
    now: DateTime<Utc>,
) -> Option<Chapter> {
    let url = doc.absolutize(anchor.value().attr("href")?);
    if url.is_empty() {
        return None;
    }

    let label = text(anchor);
    let title = attr(anchor, "title");
    let name = if label.is_empty() {
        title.clone().unwrap_or_default()
    } else {
        label.clone()
    };

    let chapter_number = parse_chapter_number(site, &label)
        .or_else(|| title.as_deref().and_then(|t| parse_chapter_number(site, t)))
        .unwrap_or(UNNUMBERED_CHAPTER);

    let date = find_date_text(anchor, site).and_then(|raw| normalize_date_at(&raw, now));

    Some(Chapter {
        url,
        name,
        chapter_number,
        date,
    })
}

/// Date text near a chapter link. Looked up inside the link, then in the
/// elements that follow it, then inside its parent when the parent holds no
/// other chapter link, then in the elements that follow the parent. Sibling
/// scans stop at the next chapter link.
fn find_date_text(anchor: ElementRef<'_>, site: &SiteProfile) -> Option<String> {
    let reader = selector(&format!(r#"a[href*="{}"]"#, site.reader_path))?;
    if let Some(el) = select_in(anchor, DATE_CSS) {
        return non_empty_text(el);
    }
    if let Some(raw) = date_after(anchor, &reader) {
        return Some(raw);
    }

    let parent = parent_element(anchor)?;
    if parent.select(&reader).count() == 1 {
        if let Some(el) = select_in(parent, DATE_CSS) {
            return non_empty_text(el);
        }
    }
    date_after(parent, &reader)
}

fn date_after(start: ElementRef<'_>, reader: &Selector) -> Option<String> {
    for sibling in following_element_siblings(start) {
        if is_date_element(sibling) {
            return non_empty_text(sibling);
        }
        if reader.matches(&sibling) || sibling.select(reader).next().is_some() {
            break;
        }
        if let Some(el) = select_in(sibling, DATE_CSS) {
            return non_empty_text(el);
        }
    }
    None
}

fn non_empty_text(el: ElementRef<'_>) -> Option<String> {
    Some(text(el)).filter(|t| !t.is_empty())
}

fn is_date_element(el: ElementRef<'_>) -> bool {
    let value = el.value();
    value.name() == "time"
        || value.has_class("date", scraper::CaseSensitivity::AsciiCaseInsensitive)
        || value.has_class("fecha", scraper::CaseSensitivity::AsciiCaseInsensitive)
        || (value.name() == "span"
            && value.has_class("time", scraper::CaseSensitivity::AsciiCaseInsensitive))
}

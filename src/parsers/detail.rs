//! Manga detail page extraction
//!
//! Every field is resolved by an ordered list of probes. A probe is a plain
//! function from the document to an optional value; the first probe that
//! yields something wins. Markup drift is handled by adding or reordering
//! probes, each of which can be exercised on its own.

use crate::document::{first_attr, text, Document};
use crate::helpers::{filter_genres, parse_status, strip_title_suffix};
use crate::models::{MangaDetail, MangaStatus};
use crate::site::SiteProfile;

pub type Probe<T> = fn(&Document, &SiteProfile) -> Option<T>;

/// Elements that may hold a "Label:" in key/value metadata blocks
const LABEL_CSS: &str = "span, dt, th, strong, b, label";

const AUTHOR_LABELS: [&str; 2] = ["Autor", "Author"];
const ARTIST_LABELS: [&str; 2] = ["Artista", "Artist"];
const STATUS_LABELS: [&str; 2] = ["Estado", "Status"];

const COVER_ATTRS: [&str; 3] = ["content", "data-src", "src"];
const COVER_PATH_SELECTORS: [&str; 2] = [r#"img[src*="/covers/"]"#, r#"img[src*="/uploads/"]"#];
const COVER_CONTAINER_SELECTORS: [&str; 6] = [
    ".cover img",
    ".manga-cover img",
    ".thumb img",
    ".poster img",
    "article img",
    ".entry-content img",
];

const DESCRIPTION_SELECTORS: [&str; 6] = [
    ".synopsis",
    ".sinopsis",
    ".description",
    ".descripcion",
    "div.manga-desc",
    "p.summary",
];
const MIN_PARAGRAPH_CHARS: usize = 100;

const GENRE_SELECTORS: [&str; 5] = [
    ".genres a",
    ".generos a",
    "span.genre",
    r#"a[href*="genero"]"#,
    r#"a[href*="genre"]"#,
];

pub const TITLE_PROBES: [(&str, Probe<String>); 2] =
    [("heading", title_from_heading), ("og:title", title_from_meta)];

pub const COVER_PROBES: [(&str, Probe<String>); 3] = [
    ("og:image", cover_from_meta),
    ("cover path", cover_from_path),
    ("cover container", cover_from_container),
];

pub const AUTHOR_PROBES: [(&str, Probe<String>); 2] =
    [("author class", author_from_class), ("author label", author_from_label)];

pub const ARTIST_PROBES: [(&str, Probe<String>); 2] =
    [("artist class", artist_from_class), ("artist label", artist_from_label)];

pub const DESCRIPTION_PROBES: [(&str, Probe<String>); 2] = [
    ("description class", description_from_class),
    ("long paragraph", description_from_paragraph),
];

pub const GENRE_PROBES: [(&str, Probe<Vec<String>>); 2] =
    [("genre links", genres_from_links), ("genre hints", genres_from_hints)];

pub const STATUS_PROBES: [(&str, Probe<MangaStatus>); 2] =
    [("status class", status_from_class), ("status label", status_from_label)];

/// Run `probes` in order and return the first hit
pub fn first_hit<T>(
    doc: &Document,
    site: &SiteProfile,
    field: &str,
    probes: &[(&str, Probe<T>)],
) -> Option<T> {
    for (name, probe) in probes {
        if let Some(value) = probe(doc, site) {
            log::debug!("{} resolved by '{}'", field, name);
            return Some(value);
        }
    }
    log::debug!("{} not found", field);
    None
}

/// Extract the metadata of one manga. Missing fields are left empty; this
/// never fails on a successfully fetched page.
pub fn parse_manga_detail(doc: &Document, site: &SiteProfile, url: &str) -> MangaDetail {
    let genres = first_hit(doc, site, "genres", &GENRE_PROBES)
        .map(|candidates| filter_genres(site, candidates))
        .unwrap_or_default();

    MangaDetail {
        url: url.to_string(),
        title: first_hit(doc, site, "title", &TITLE_PROBES).unwrap_or_default(),
        cover: first_hit(doc, site, "cover", &COVER_PROBES).unwrap_or_default(),
        author: first_hit(doc, site, "author", &AUTHOR_PROBES),
        artist: first_hit(doc, site, "artist", &ARTIST_PROBES),
        description: first_hit(doc, site, "description", &DESCRIPTION_PROBES),
        genres,
        status: first_hit(doc, site, "status", &STATUS_PROBES).unwrap_or_default(),
    }
}

/// Text of the first element, over `selectors` in priority order, that has any
fn first_text(doc: &Document, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        doc.select_all(css)
            .into_iter()
            .map(text)
            .find(|t| !t.is_empty())
    })
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn title_from_heading(doc: &Document, site: &SiteProfile) -> Option<String> {
    first_text(doc, &["h1", ".manga-title"])
        .map(|t| strip_title_suffix(&t, &site.title_suffixes))
        .and_then(non_empty)
}

fn title_from_meta(doc: &Document, site: &SiteProfile) -> Option<String> {
    doc.select_one(r#"meta[property="og:title"]"#)
        .and_then(|m| m.value().attr("content"))
        .map(|t| strip_title_suffix(t, &site.title_suffixes))
        .and_then(non_empty)
}

fn cover_from(doc: &Document, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        doc.select_one(css)
            .and_then(|el| first_attr(el, &COVER_ATTRS))
            .map(|src| doc.absolutize(&src))
            .and_then(non_empty)
    })
}

fn cover_from_meta(doc: &Document, _site: &SiteProfile) -> Option<String> {
    cover_from(doc, &[r#"meta[property="og:image"]"#])
}

fn cover_from_path(doc: &Document, _site: &SiteProfile) -> Option<String> {
    cover_from(doc, &COVER_PATH_SELECTORS)
}

fn cover_from_container(doc: &Document, _site: &SiteProfile) -> Option<String> {
    cover_from(doc, &COVER_CONTAINER_SELECTORS)
}

fn author_from_class(doc: &Document, _site: &SiteProfile) -> Option<String> {
    first_text(doc, &[".author", ".autor"])
}

fn author_from_label(doc: &Document, _site: &SiteProfile) -> Option<String> {
    doc.label_value(LABEL_CSS, &AUTHOR_LABELS)
}

fn artist_from_class(doc: &Document, _site: &SiteProfile) -> Option<String> {
    first_text(doc, &[".artist", ".artista"])
}

fn artist_from_label(doc: &Document, _site: &SiteProfile) -> Option<String> {
    doc.label_value(LABEL_CSS, &ARTIST_LABELS)
}

fn description_from_class(doc: &Document, _site: &SiteProfile) -> Option<String> {
    first_text(doc, &DESCRIPTION_SELECTORS)
}

fn description_from_paragraph(doc: &Document, _site: &SiteProfile) -> Option<String> {
    doc.select_all("p")
        .into_iter()
        .map(text)
        .find(|t| t.chars().count() > MIN_PARAGRAPH_CHARS)
}

/// Texts of everything matching any of `selectors`, in document order
fn collect_texts(doc: &Document, selectors: &[String]) -> Option<Vec<String>> {
    if selectors.is_empty() {
        return None;
    }
    let texts: Vec<String> = doc
        .select_all(&selectors.join(", "))
        .into_iter()
        .map(text)
        .filter(|t| !t.is_empty())
        .collect();
    (!texts.is_empty()).then_some(texts)
}

fn genres_from_links(doc: &Document, _site: &SiteProfile) -> Option<Vec<String>> {
    let selectors: Vec<String> = GENRE_SELECTORS.iter().map(|s| s.to_string()).collect();
    collect_texts(doc, &selectors)
}

fn genres_from_hints(doc: &Document, site: &SiteProfile) -> Option<Vec<String>> {
    let selectors: Vec<String> = site
        .genre_hints
        .iter()
        .map(|hint| format!(r#"a[href*="{}"]"#, hint))
        .collect();
    collect_texts(doc, &selectors)
}

fn known_status(label: String) -> Option<MangaStatus> {
    match parse_status(&label) {
        MangaStatus::Unknown => None,
        status => Some(status),
    }
}

fn status_from_class(doc: &Document, _site: &SiteProfile) -> Option<MangaStatus> {
    first_text(doc, &[".status", ".estado"]).and_then(known_status)
}

fn status_from_label(doc: &Document, _site: &SiteProfile) -> Option<MangaStatus> {
    doc.label_value(LABEL_CSS, &STATUS_LABELS).and_then(known_status)
}

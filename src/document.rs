//! Query-able HTML tree
//!
//! Thin layer over `scraper::Html` giving the extractors selector lookups,
//! whitespace-normalized text, attribute cascades and the "label → following
//! value" lookup used by key/value metadata blocks. Selectors that fail to
//! parse are treated as matching nothing.

use crate::helpers;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
    base_url: Url,
}

impl Document {
    pub fn parse(html: &str, base_url: Url) -> Self {
        Self {
            html: Html::parse_document(html),
            base_url,
        }
    }

    pub fn select_one(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = selector(css)?;
        self.html.select(&sel).next()
    }

    /// All matches in document order
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match selector(css) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    pub fn exists(&self, css: &str) -> bool {
        self.select_one(css).is_some()
    }

    /// Resolve a possibly relative url against the site origin
    pub fn absolutize(&self, raw: &str) -> String {
        helpers::absolutize(&self.base_url, raw)
    }

    /// Find an element among `label_css` whose own text equals one of
    /// `labels` (case-insensitive, trailing colon ignored) and return the
    /// text of its next element sibling.
    pub fn label_value(&self, label_css: &str, labels: &[&str]) -> Option<String> {
        for el in self.select_all(label_css) {
            let label = text(el);
            let label = label.trim_end_matches(':').trim().to_lowercase();
            if !labels.iter().any(|l| l.to_lowercase() == label) {
                continue;
            }
            if let Some(value) = next_element_sibling(el).map(text) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
        None
    }
}

pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            log::warn!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Text content with runs of whitespace collapsed to single spaces
pub fn text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed, non-empty attribute value
pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First non-empty attribute among `names`, in order
pub fn first_attr(el: ElementRef<'_>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| attr(el, name))
}

pub fn select_in<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    el.select(&sel).next()
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    following_element_siblings(el).next()
}

/// Element siblings after `el`, nearest first
pub fn following_element_siblings(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Document {
        Document::parse(html, Url::parse("https://www.leercapitulo.co").unwrap())
    }

    #[test]
    fn test_select_all_keeps_document_order() {
        let d = doc(r#"<ul><li>a</li><li>b</li><li>c</li></ul>"#);
        let items: Vec<String> = d.select_all("li").into_iter().map(text).collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let d = doc("<p>x</p>");
        assert!(d.select_one("p[").is_none());
        assert!(d.select_all("::::").is_empty());
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let d = doc("<h1>\n  One   <b>Piece</b>\n</h1>");
        assert_eq!(text(d.select_one("h1").unwrap()), "One Piece");
    }

    #[test]
    fn test_first_attr_skips_empty_values() {
        let d = doc(r#"<img data-src="  " data-lazy="/a.jpg" src="/b.jpg">"#);
        let img = d.select_one("img").unwrap();
        assert_eq!(first_attr(img, &["data-src", "data-lazy", "src"]).unwrap(), "/a.jpg");
    }

    #[test]
    fn test_label_value() {
        let d = doc(
            r#"<div class="info">
                <span>Autor:</span><span>Eiichiro Oda</span>
                <dt>Estado</dt><dd> En curso </dd>
            </div>"#,
        );
        assert_eq!(d.label_value("span, dt", &["Autor"]).unwrap(), "Eiichiro Oda");
        assert_eq!(d.label_value("span, dt", &["estado"]).unwrap(), "En curso");
        assert!(d.label_value("span, dt", &["Artista"]).is_none());
    }

    #[test]
    fn test_absolutize_uses_site_origin() {
        let d = doc("");
        assert_eq!(d.absolutize("/manga/x/"), "https://www.leercapitulo.co/manga/x/");
    }
}

//! Chapter image discovery on a rendered reader page
//!
//! The in-page script only collects raw candidates; which of them count as
//! page images is decided by [`select_page_images`], so the same rules apply
//! to a live browser and to static fixtures.

use crate::document::{attr, text, Document};
use crate::helpers::absolutize;
use crate::site::SiteProfile;
use serde::Deserialize;
use std::collections::HashSet;

/// Collects page-selector option values and image attributes. Data
/// attributes are resolved against the document; `src` is already absolute.
pub const EXTRACTION_SCRIPT: &str = r#"
(() => {
    const resolve = (value) => {
        if (!value) return null;
        try { return new URL(value, document.baseURI).href; } catch (e) { return value; }
    };
    const selectOptions = [];
    for (const sel of document.querySelectorAll('select')) {
        for (const opt of sel.options) {
            selectOptions.push((opt.value || '').trim());
        }
    }
    const images = Array.from(document.querySelectorAll('img')).map((img) => ({
        data_src: resolve(img.getAttribute('data-src')),
        data_original: resolve(img.getAttribute('data-original')),
        data_lazy: resolve(img.getAttribute('data-lazy')),
        src: img.src || null,
    }));
    return JSON.stringify({ select_options: selectOptions, images: images });
})()
"#;

/// Attribute values of one `<img>` element
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ImageCandidate {
    #[serde(default)]
    pub data_src: Option<String>,
    #[serde(default)]
    pub data_original: Option<String>,
    #[serde(default)]
    pub data_lazy: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

impl ImageCandidate {
    /// Lazy-load attributes first, then `src`
    pub fn best_source(&self) -> Option<&str> {
        [&self.data_src, &self.data_original, &self.data_lazy, &self.src]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }
}

/// Raw image candidates of a rendered reader page, in document order
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RenderedPage {
    #[serde(default)]
    pub select_options: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageCandidate>,
}

impl RenderedPage {
    /// Collect the same candidates from static HTML
    pub fn from_document(doc: &Document) -> Self {
        let select_options = doc
            .select_all("select option")
            .into_iter()
            .map(|opt| attr(opt, "value").unwrap_or_else(|| text(opt)))
            .collect();

        let images = doc
            .select_all("img")
            .into_iter()
            .map(|img| ImageCandidate {
                data_src: attr(img, "data-src"),
                data_original: attr(img, "data-original"),
                data_lazy: attr(img, "data-lazy"),
                src: attr(img, "src"),
            })
            .collect();

        Self {
            select_options,
            images,
        }
    }
}

/// Ordered, de-duplicated page image urls.
///
/// Page-selector options holding absolute image urls win; when there are
/// none, content images are taken instead, skipping site assets.
pub fn select_page_images(page: &RenderedPage, site: &SiteProfile) -> Vec<String> {
    let from_options = dedup(
        page.select_options
            .iter()
            .map(|v| v.trim())
            .filter(|v| site.absolute_url.is_match(v) && site.is_image_url(v))
            .map(str::to_string),
    );
    if !from_options.is_empty() {
        log::debug!("Found {} images in page selector", from_options.len());
        return from_options;
    }

    let from_images = dedup(
        page.images
            .iter()
            .filter_map(ImageCandidate::best_source)
            .map(|src| absolutize(&site.base_url, src))
            .filter(|src| site.is_image_url(src) && !site.is_asset(src)),
    );
    log::debug!("Found {} images in img elements", from_images.len());
    from_images
}

fn dedup(urls: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.filter(|u| seen.insert(u.clone())).collect()
}

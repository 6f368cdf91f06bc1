use crate::document::Document;

/// Markers of a "next page" link shared by every listing template
const NEXT_MARKERS: [&str; 2] = ["a.next", r#"a[rel="next"]"#];

/// Whether the listing shows a link to `current_page + 1` or a generic
/// next-page marker. False negatives are possible on unfamiliar templates.
pub fn has_next_page(doc: &Document, current_page: u32) -> bool {
    let page_link = format!(r#"a[href*="page={}"]"#, current_page.saturating_add(1));
    doc.exists(&page_link) || NEXT_MARKERS.iter().any(|css| doc.exists(css))
}

/// Next-page detection for the "latest updates" listing.
///
/// That listing only exposes a link to its second page, so anything past
/// page 1 reports no next page.
pub fn has_next_latest_page(doc: &Document, current_page: u32) -> bool {
    current_page == 1 && (doc.exists(r#"a[href*="page=2"]"#) || doc.exists("a.next"))
}

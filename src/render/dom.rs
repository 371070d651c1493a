//! HTML extraction for the HTTP renderer
//!
//! This module answers the DOM queries a render session supports by parsing
//! a response body with scraper. Parsed documents never outlive a single
//! call, so nothing here is held across an await.

use scraper::{Html, Selector};

/// Extracts raw `href` values from every `<a href>` in document order
///
/// # Example
///
/// ```
/// use site_signals::render::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a>No href</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    select_attribute(&document, "a[href]", "href")
}

/// Checks whether the document contains a `<form>` element
pub fn has_form(html: &str) -> bool {
    let document = Html::parse_document(html);
    match Selector::parse("form") {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

/// Extracts `src` values of every `<iframe src>`
pub fn extract_iframe_sources(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    select_attribute(&document, "iframe[src]", "src")
}

fn select_attribute(document: &Html, selector: &str, attribute: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attribute))
        .map(str::to_string)
        .collect()
}

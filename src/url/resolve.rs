use url::Url;

/// Checks whether a raw anchor href is worth resolving
///
/// Fragment-only links point back at the same page, and `mailto:` / `tel:`
/// links are not pages at all.
pub fn is_followable_href(href: &str) -> bool {
    let href = href.trim();
    !href.starts_with('#') && !href.contains("mailto:") && !href.contains("tel:")
}

/// Resolves an href against the page it was found on
///
/// Returns None if the href cannot be resolved to an absolute URL; the
/// caller drops that single link and keeps the rest of the page.
///
/// # Examples
///
/// ```
/// use site_signals::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/team/").unwrap();
/// assert_eq!(resolve_link("jobs", &base), Some("https://example.com/team/jobs".to_string()));
/// assert_eq!(resolve_link("/", &base), Some("https://example.com/".to_string()));
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok().map(|url| url.to_string())
}

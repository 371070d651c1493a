//! URL admission filter
//!
//! A pure allow/deny heuristic deciding whether a URL may be queued for
//! traversal or analysis. The rules are literal substring and suffix tests,
//! so both noise pages slipping through and legitimate pages being rejected
//! are expected.

use url::Url;

/// File extensions that mark a document download rather than a page
pub const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".xlsx"];

/// Path fragments of asset, archive/news/case, and login/admin sections
pub const NON_CONTENT_SEGMENTS: &[&str] = &[
    "wp-content",
    "archives",
    "news",
    "case",
    "login",
    "portal",
    "admin",
];

/// A single admission rule that rejected a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Contains a `?`
    QueryString,
    /// Contains a `#`
    Fragment,
    /// Path ends in a denylisted document extension
    DocumentExtension(&'static str),
    /// Path contains a denylisted section name
    NonContentSegment(&'static str),
    /// Not parseable as an absolute URL
    Unparseable,
}

/// Returns every rule the URL violates
///
/// All rules are evaluated independently; the order of the returned list
/// carries no meaning.
pub fn rejections(url: &str) -> Vec<Rejection> {
    let mut found = Vec::new();

    if url.contains('?') {
        found.push(Rejection::QueryString);
    }

    if url.contains('#') {
        found.push(Rejection::Fragment);
    }

    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => {
            found.push(Rejection::Unparseable);
            return found;
        }
    };

    found.extend(
        DOCUMENT_EXTENSIONS
            .iter()
            .filter(|ext| path.ends_with(**ext))
            .map(|ext| Rejection::DocumentExtension(*ext)),
    );

    found.extend(
        NON_CONTENT_SEGMENTS
            .iter()
            .filter(|segment| path.contains(**segment))
            .map(|segment| Rejection::NonContentSegment(*segment)),
    );

    found
}

/// Checks whether a URL may be queued for traversal or analysis
///
/// # Examples
///
/// ```
/// use site_signals::url::is_admissible;
///
/// assert!(is_admissible("https://example.com/about"));
/// assert!(!is_admissible("https://example.com/about?lang=en"));
/// assert!(!is_admissible("https://example.com/files/report.PDF"));
/// assert!(!is_admissible("https://example.com/Admin/users"));
/// ```
pub fn is_admissible(url: &str) -> bool {
    rejections(url).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pages_admitted() {
        assert!(is_admissible("https://example.com/"));
        assert!(is_admissible("https://example.com/about-us"));
        assert!(is_admissible("https://example.com/services/web"));
    }

    #[test]
    fn test_query_and_fragment_rejected() {
        assert!(!is_admissible("https://example.com/page?id=1"));
        assert!(!is_admissible("https://example.com/page#top"));
        assert!(!is_admissible("https://example.com/?"));
    }

    #[test]
    fn test_document_extensions_rejected() {
        for url in [
            "https://example.com/a.pdf",
            "https://example.com/a.doc",
            "https://example.com/a.docx",
            "https://example.com/a.xlsx",
            "https://example.com/A.DOCX",
        ] {
            assert!(!is_admissible(url), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_extension_must_be_suffix() {
        assert!(is_admissible("https://example.com/pdf-guide"));
        assert!(is_admissible("https://example.com/a.pdf/view"));
        assert!(is_admissible("https://example.com/a.xls"));
    }

    #[test]
    fn test_non_content_segments_rejected_case_insensitively() {
        assert!(!is_admissible("https://example.com/wp-content/uploads/x.png"));
        assert!(!is_admissible("https://example.com/Archives/2020"));
        assert!(!is_admissible("https://example.com/NEWS"));
        assert!(!is_admissible("https://example.com/customer-login"));
        assert!(!is_admissible("https://example.com/portal"));
        assert!(!is_admissible("https://example.com/admin/settings"));
    }

    #[test]
    fn test_literal_substring_false_positives_preserved() {
        // "showcase" contains "case", "newsletter" contains "news"
        assert!(!is_admissible("https://example.com/showcase"));
        assert!(!is_admissible("https://example.com/newsletter"));
        assert!(!is_admissible("https://example.com/administration"));
    }

    #[test]
    fn test_host_is_not_matched_against_segments() {
        assert!(is_admissible("https://news.example.com/about"));
        assert!(is_admissible("https://casestudies.example.com/"));
    }

    #[test]
    fn test_all_rules_evaluated() {
        let found = rejections("https://example.com/news/report.pdf?x=1#y");
        assert!(found.contains(&Rejection::QueryString));
        assert!(found.contains(&Rejection::Fragment));
        assert!(found.contains(&Rejection::NonContentSegment("news")));
        // The query string follows the extension, so the path still ends in .pdf
        assert!(found.contains(&Rejection::DocumentExtension(".pdf")));
    }

    #[test]
    fn test_rejection_is_stable() {
        let url = "https://example.com/login";
        for _ in 0..3 {
            assert!(!is_admissible(url));
        }
    }

    #[test]
    fn test_unparseable_rejected() {
        assert_eq!(rejections("not a url"), vec![Rejection::Unparseable]);
    }
}

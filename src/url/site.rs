use serde::Deserialize;
use url::Url;

/// Rule deciding whether a discovered link belongs to the domain being walked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSiteRule {
    /// Literal string prefix match against the domain root
    ///
    /// `https://example.com.evil.com/` matches `https://example.com`, while
    /// `https://www.example.com/` does not.
    #[default]
    Prefix,

    /// Scheme, host and port must equal those of the domain root
    Origin,
}

impl SameSiteRule {
    /// Checks whether `url` belongs to the site rooted at `domain`
    ///
    /// # Examples
    ///
    /// ```
    /// use site_signals::url::SameSiteRule;
    ///
    /// assert!(SameSiteRule::Prefix.matches("https://example.com", "https://example.com/about"));
    /// assert!(!SameSiteRule::Prefix.matches("https://example.com", "https://other.com/"));
    /// assert!(!SameSiteRule::Origin.matches("https://example.com", "https://example.com.evil.com/"));
    /// ```
    pub fn matches(&self, domain: &str, url: &str) -> bool {
        match self {
            Self::Prefix => url.starts_with(domain),
            Self::Origin => match (Url::parse(domain), Url::parse(url)) {
                (Ok(root), Ok(candidate)) => {
                    root.scheme() == candidate.scheme()
                        && root.host_str() == candidate.host_str()
                        && root.port_or_known_default() == candidate.port_or_known_default()
                }
                _ => false,
            },
        }
    }
}

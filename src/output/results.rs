//! Result model for page analysis and per-domain aggregation

use crate::render::CookieRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Signals extracted from one page
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    /// The analyzed URL
    pub url: String,

    /// Cookies visible after loading the page
    pub cookies: Vec<CookieRecord>,

    /// Whether the page contains a form
    pub has_form: bool,

    /// Whether the page embeds a map widget
    pub has_google_maps: bool,
}

impl PageAnalysis {
    /// Creates the default-valued result used when analysis fails
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cookies: Vec::new(),
            has_form: false,
            has_google_maps: false,
        }
    }
}

/// Aggregate of every page analyzed for one domain
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResult {
    pub total_subpages_analyzed: usize,
    pub total_cookies_found: usize,
    pub subpages_with_forms: Vec<String>,
    pub subpages_with_google_maps: Vec<String>,
    pub subpages: Vec<PageAnalysis>,
}

impl DomainResult {
    /// Creates an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one page's analysis into the aggregate
    ///
    /// Every cookie counts, including cookies sharing a name with another
    /// cookie from a different owning domain.
    pub fn fold(&mut self, analysis: PageAnalysis) {
        self.total_subpages_analyzed += 1;
        self.total_cookies_found += analysis.cookies.len();

        if analysis.has_form {
            self.subpages_with_forms.push(analysis.url.clone());
        }
        if analysis.has_google_maps {
            self.subpages_with_google_maps.push(analysis.url.clone());
        }

        self.subpages.push(analysis);
    }

    /// Builds an aggregate from a sequence of analyses, preserving their order
    pub fn from_analyses(analyses: impl IntoIterator<Item = PageAnalysis>) -> Self {
        let mut result = Self::new();
        for analysis in analyses {
            result.fold(analysis);
        }
        result
    }
}

/// Mapping from domain to its result, in the order domains finished
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsIndex {
    entries: Vec<(String, DomainResult)>,
}

impl ResultsIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a domain's result, replacing an earlier one in place
    pub fn insert(&mut self, domain: impl Into<String>, result: DomainResult) {
        let domain = domain.into();
        match self.entries.iter_mut().find(|(d, _)| *d == domain) {
            Some((_, existing)) => *existing = result,
            None => self.entries.push((domain, result)),
        }
    }

    /// Looks up a domain's result
    pub fn get(&self, domain: &str) -> Option<&DomainResult> {
        self.entries
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, result)| result)
    }

    /// Number of domains in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over domains and results in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainResult)> {
        self.entries.iter().map(|(d, r)| (d.as_str(), r))
    }
}

impl Serialize for ResultsIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (domain, result) in &self.entries {
            map.serialize_entry(domain, result)?;
        }
        map.end()
    }
}

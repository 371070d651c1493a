//! Run statistics derived from a results index
//!
//! This module provides functionality for summarizing and displaying
//! what a run found across all domains.

use crate::output::results::ResultsIndex;

/// Totals across every domain of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Number of domains with a result
    pub domains: usize,

    /// Pages analyzed across all domains
    pub pages: usize,

    /// Cookies found across all pages
    pub cookies: usize,

    /// Pages containing a form
    pub pages_with_forms: usize,

    /// Pages embedding a map widget
    pub pages_with_maps: usize,
}

impl RunStatistics {
    /// Computes totals from a results index
    pub fn from_index(index: &ResultsIndex) -> Self {
        index
            .iter()
            .fold(Self::default(), |mut stats, (_, result)| {
                stats.domains += 1;
                stats.pages += result.total_subpages_analyzed;
                stats.cookies += result.total_cookies_found;
                stats.pages_with_forms += result.subpages_with_forms.len();
                stats.pages_with_maps += result.subpages_with_google_maps.len();
                stats
            })
    }
}

/// Prints a per-domain summary to stdout
///
/// # Arguments
///
/// * `index` - The results to display
pub fn print_summary(index: &ResultsIndex) {
    println!("=== Scan Summary ===\n");

    for (domain, result) in index.iter() {
        println!("{}:", domain);
        println!("  Pages analyzed: {}", result.total_subpages_analyzed);
        println!("  Cookies found: {}", result.total_cookies_found);
        println!("  Pages with forms: {}", result.subpages_with_forms.len());
        println!(
            "  Pages with Google Maps: {}",
            result.subpages_with_google_maps.len()
        );
        println!();
    }

    let stats = RunStatistics::from_index(index);
    println!(
        "Total: {} domains, {} pages, {} cookies, {} forms, {} maps",
        stats.domains, stats.pages, stats.cookies, stats.pages_with_forms, stats.pages_with_maps
    );
}

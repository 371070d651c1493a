//! Domain list loading
//!
//! The domain list is a CSV file whose header names a `domain`
//! (or `Domain`) column. Every non-empty cell in that column is one domain
//! root, kept in file order.

use crate::InputError;
use std::path::Path;

/// Column names accepted for the domain column
const DOMAIN_COLUMNS: &[&str] = &["domain", "Domain"];

/// Loads domain roots from a CSV file
///
/// # Arguments
///
/// * `path` - Path to the domain list
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Domains in file order
/// * `Err(InputError)` - File unreadable or no domain column
pub fn load_domains(path: &Path) -> Result<Vec<String>, InputError> {
    let content = std::fs::read_to_string(path)?;
    parse_domains(&content)
}

/// Parses domain roots from CSV text
///
/// # Example
///
/// ```
/// use site_signals::input::parse_domains;
///
/// let domains = parse_domains("name,domain\nAcme,https://acme.example\n").unwrap();
/// assert_eq!(domains, vec!["https://acme.example".to_string()]);
/// ```
pub fn parse_domains(content: &str) -> Result<Vec<String>, InputError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|name| DOMAIN_COLUMNS.contains(&name))
        .ok_or(InputError::MissingColumn)?;

    let mut domains = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(cell) if !cell.is_empty() => domains.push(cell.to_string()),
            _ => {}
        }
    }

    Ok(domains)
}

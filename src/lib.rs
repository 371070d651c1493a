//! Site-Signals: a per-domain site scanner
//!
//! This crate walks a list of website domains, discovers same-site subpages
//! within a bounded depth while respecting robots.txt and URL admission rules,
//! and analyzes every discovered page for cookies, forms and embedded maps.

pub mod config;
pub mod crawler;
pub mod input;
pub mod output;
pub mod render;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Signals operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by a page-rendering client
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to open render session: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation timeout of {timeout_ms}ms exceeded for {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("No page loaded in session")]
    NoPage,
}

/// Errors raised while loading the domain list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read domain list: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed domain list: {0}")]
    Csv(#[from] csv::Error),

    #[error("Domain list has no 'domain' column")]
    MissingColumn,
}

/// Result type alias for Site-Signals operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{analyze_all, analyze_page, traverse_site, Orchestrator};
pub use output::{DomainResult, PageAnalysis, ResultsIndex};
pub use state::{SkipEvent, SkipReason, VisitOutcome};
pub use url::{is_admissible, SameSiteRule};

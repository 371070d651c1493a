//! Configuration module for Site-Signals
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without a config file uses
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use site_signals::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_BROWSER_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, validate_domain_root};

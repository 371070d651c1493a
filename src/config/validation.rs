use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and 100, got {}",
            config.max_concurrent_pages
        )));
    }

    if config.navigation_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be >= 100ms, got {}ms",
            config.navigation_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.browser.trim().is_empty() {
        return Err(ConfigError::Validation(
            "browser user agent cannot be empty".to_string(),
        ));
    }

    // Must be usable as an HTTP header value
    if config.browser.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "browser user agent cannot contain control characters".to_string(),
        ));
    }

    if config.robots_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "robots_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.analysis_dir.is_empty() {
        return Err(ConfigError::Validation(
            "analysis_dir cannot be empty".to_string(),
        ));
    }

    if config.skip_log_path.is_empty() {
        return Err(ConfigError::Validation(
            "skip_log_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a domain root is an absolute http(s) URL without a path,
/// query or fragment
///
/// Used on the loaded domain list before a run starts, so malformed rows are
/// reported instead of being crawled.
pub fn validate_domain_root(domain: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(domain)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid domain '{}': {}", domain, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Domain '{}' must use http or https",
            domain
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Domain '{}' has no host",
            domain
        )));
    }

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "Domain '{}' must not have a path, query or fragment",
            domain
        )));
    }

    Ok(())
}

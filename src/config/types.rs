use crate::url::SameSiteRule;
use serde::Deserialize;
use std::time::Duration;

/// User agent presented by the renderer while navigating
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.5735.199 Safari/537.36";

/// Main configuration structure for Site-Signals
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum BFS depth from the domain root
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Number of pages analyzed concurrently (chunk size)
    #[serde(rename = "max-concurrent-pages", default = "default_max_concurrent_pages")]
    pub max_concurrent_pages: u32,

    /// Per-navigation timeout (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Rule deciding whether a discovered link belongs to the domain
    #[serde(rename = "same-site", default)]
    pub same_site: SameSiteRule,
}

impl CrawlerConfig {
    /// Navigation timeout as a [`Duration`]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_concurrent_pages: default_max_concurrent_pages(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            same_site: SameSiteRule::default(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// User-Agent header sent on page navigations
    #[serde(default = "default_browser_user_agent")]
    pub browser: String,

    /// Agent token matched against robots.txt groups
    #[serde(rename = "robots-agent", default = "default_robots_agent")]
    pub robots_agent: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            browser: default_browser_user_agent(),
            robots_agent: default_robots_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving timestamped results files
    #[serde(rename = "analysis-dir", default = "default_analysis_dir")]
    pub analysis_dir: String,

    /// Append-only log of skipped pages
    #[serde(rename = "skip-log-path", default = "default_skip_log_path")]
    pub skip_log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            analysis_dir: default_analysis_dir(),
            skip_log_path: default_skip_log_path(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_concurrent_pages() -> u32 {
    5
}

fn default_navigation_timeout_ms() -> u64 {
    15_000
}

fn default_browser_user_agent() -> String {
    DEFAULT_BROWSER_USER_AGENT.to_string()
}

fn default_robots_agent() -> String {
    "*".to_string()
}

fn default_analysis_dir() -> String {
    "analysis".to_string()
}

fn default_skip_log_path() -> String {
    "logs/skipped_pages.log".to_string()
}

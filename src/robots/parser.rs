//! Robots.txt parser implementation
//!
//! This module provides functionality for parsing robots.txt content using the robotstxt crate.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt directives for one agent
///
/// This is a wrapper around the robotstxt crate's matcher, bound to the agent
/// token the crawler identifies as.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content
    content: String,
    /// Agent token used for group matching
    user_agent: String,
}

impl RobotsPolicy {
    /// Creates a new RobotsPolicy from raw robots.txt content
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    /// * `user_agent` - The agent token whose group applies (`*` for the default group)
    pub fn from_content(content: &str, user_agent: &str) -> Self {
        Self {
            content: content.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Checks if a URL is allowed
    ///
    /// # Arguments
    ///
    /// * `url` - An absolute URL or a path (e.g., "/page.html")
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, &self.user_agent, url)
    }
}

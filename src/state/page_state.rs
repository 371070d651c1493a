/// Visit outcome definitions for a single page of a site walk
///
/// Recoverable per-page failures are values here rather than errors, so the
/// traverser can match on them instead of unwinding.
use std::fmt;

/// Why a page was not visited or not expanded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// robots.txt disallows the URL for our agent
    DisallowedByRobots,

    /// The page answered with anything but HTTP 200 (redirects included),
    /// or produced no response at all
    NonSuccessResponse,

    /// Navigation or extraction failed (timeouts included)
    Error(String),
}

impl SkipReason {
    /// Returns true if this reason comes from a failure rather than a policy
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisallowedByRobots => write!(f, "Disallowed by robots.txt"),
            Self::NonSuccessResponse => write!(f, "Non-200 response or redirect"),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// A recorded decision not to visit or expand a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipEvent {
    /// Domain root being walked
    pub domain: String,

    /// The skipped URL
    pub url: String,

    /// Why it was skipped
    pub reason: SkipReason,
}

impl SkipEvent {
    /// Creates a new skip event
    pub fn new(domain: impl Into<String>, url: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            domain: domain.into(),
            url: url.into(),
            reason,
        }
    }
}

impl fmt::Display for SkipEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Domain: {}, URL: {}, Reason: {}",
            self.domain, self.url, self.reason
        )
    }
}

/// Result of rendering one page during a site walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Page loaded with HTTP 200; carries its raw anchor hrefs
    Expanded {
        /// Anchor hrefs in document order, unresolved
        hrefs: Vec<String>,
    },

    /// Page was reached but must not be expanded
    Skipped(SkipReason),

    /// Rendering failed before a verdict could be made
    Failed(String),
}

impl VisitOutcome {
    /// Converts a non-expanded outcome into the reason reported for it
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Expanded { .. } => None,
            Self::Skipped(reason) => Some(reason.clone()),
            Self::Failed(message) => Some(SkipReason::Error(message.clone())),
        }
    }
}

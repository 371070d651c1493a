//! URL handling module for Site-Signals
//!
//! This module provides the URL admission filter, the same-site admission
//! rule and href resolution used while walking a site.

mod filter;
mod resolve;
mod site;

// Re-export main functions
pub use filter::{is_admissible, rejections, Rejection, DOCUMENT_EXTENSIONS, NON_CONTENT_SEGMENTS};
pub use resolve::{is_followable_href, resolve_link};
pub use site::SameSiteRule;

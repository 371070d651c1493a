//! Outcome tracking module
//!
//! This module defines the outcome of visiting one page during a site walk
//! and the skip events reported when a page is not visited or not expanded.

mod page_state;

pub use page_state::{SkipEvent, SkipReason, VisitOutcome};

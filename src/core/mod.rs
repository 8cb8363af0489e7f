//! Core eligibility and state-transition logic.
//!
//! Everything here is pure: status is derived from the catalog and the
//! completed set on every call, never cached.

pub mod eligibility;
pub mod progress;

pub use eligibility::{
    CourseStatus, can_toggle_on, is_completed, missing_prerequisites, status,
};
pub use progress::{CompletedSet, ToggleAction, ToggleOutcome, toggle};

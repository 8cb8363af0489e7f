//! Prerequisite gating: per-course status derived from the completed set.

use serde::Serialize;

use crate::catalog::{Course, CourseId};
use crate::core::progress::CompletedSet;

/// Derived per-course status. Never stored; recomputed from the catalog and
/// the completed set on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Completed,
    Eligible,
    Locked,
}

impl CourseStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Eligible => "eligible",
            Self::Locked => "locked",
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "eligible" => Ok(Self::Eligible),
            "locked" => Ok(Self::Locked),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Membership test. Unknown ids are simply not completed.
#[must_use]
pub fn is_completed(id: CourseId, completed: &CompletedSet) -> bool {
    completed.contains(id)
}

/// True when every prerequisite is completed (vacuously true for none).
/// Ignores whether the course itself is already completed.
#[must_use]
pub fn can_toggle_on(course: &Course, completed: &CompletedSet) -> bool {
    course.prereqs.iter().all(|&id| completed.contains(id))
}

#[must_use]
pub fn status(course: &Course, completed: &CompletedSet) -> CourseStatus {
    if completed.contains(course.id) {
        CourseStatus::Completed
    } else if can_toggle_on(course, completed) {
        CourseStatus::Eligible
    } else {
        CourseStatus::Locked
    }
}

/// The prerequisites not yet completed, in catalog order.
#[must_use]
pub fn missing_prerequisites(course: &Course, completed: &CompletedSet) -> Vec<CourseId> {
    course
        .prereqs
        .iter()
        .copied()
        .filter(|&id| !completed.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: CourseId, prereqs: &[CourseId]) -> Course {
        Course {
            id,
            name: format!("Course {id}"),
            prereqs: prereqs.to_vec(),
        }
    }

    #[test]
    fn no_prereqs_is_never_locked() {
        let c = course(1, &[]);
        assert_eq!(status(&c, &CompletedSet::new()), CourseStatus::Eligible);

        let done = CompletedSet::from_ids([1]);
        assert_eq!(status(&c, &done), CourseStatus::Completed);
    }

    #[test]
    fn completed_iff_member() {
        let c = course(6, &[1, 2]);
        let done = CompletedSet::from_ids([6]);
        assert_eq!(status(&c, &done), CourseStatus::Completed);
        assert!(is_completed(6, &done));
        assert!(!is_completed(1, &done));
    }

    #[test]
    fn locked_until_all_prereqs_done() {
        let c = course(6, &[1, 2]);

        assert_eq!(status(&c, &CompletedSet::new()), CourseStatus::Locked);
        assert_eq!(
            status(&c, &CompletedSet::from_ids([1])),
            CourseStatus::Locked
        );
        assert_eq!(
            status(&c, &CompletedSet::from_ids([1, 2])),
            CourseStatus::Eligible
        );
    }

    #[test]
    fn can_toggle_on_ignores_own_membership() {
        let c = course(6, &[1, 2]);
        // Completed but with a prereq now missing: still not re-toggleable on.
        let done = CompletedSet::from_ids([2, 6]);
        assert!(!can_toggle_on(&c, &done));
    }

    #[test]
    fn missing_prerequisites_in_catalog_order() {
        let c = course(21, &[10, 9]);
        let done = CompletedSet::from_ids([9]);
        assert_eq!(missing_prerequisites(&c, &done), vec![10]);
        assert_eq!(missing_prerequisites(&c, &CompletedSet::new()), vec![10, 9]);
    }

    #[test]
    fn status_parses_from_str() {
        assert_eq!("locked".parse::<CourseStatus>().unwrap(), CourseStatus::Locked);
        assert_eq!(
            "Completed".parse::<CourseStatus>().unwrap(),
            CourseStatus::Completed
        );
        assert!("done".parse::<CourseStatus>().is_err());
    }
}

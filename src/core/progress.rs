//! The completed set and its single state transition.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{Course, CourseId};
use crate::core::eligibility::can_toggle_on;

/// The set of course ids the user has marked complete. Ordered so that every
/// serialization of the same set is identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedSet(BTreeSet<CourseId>);

impl CompletedSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = CourseId>) -> Self {
        Self(ids.into_iter().collect())
    }

    #[must_use]
    pub fn contains(&self, id: CourseId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.0.iter().copied()
    }

    /// Ids in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<CourseId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<CourseId> for CompletedSet {
    fn from_iter<I: IntoIterator<Item = CourseId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    /// The course was added to the completed set.
    Marked,
    /// The course was removed from the completed set.
    Unmarked,
    /// The course is locked; the set is unchanged. A no-op, not an error.
    Rejected,
}

impl ToggleAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Marked => "marked",
            Self::Unmarked => "unmarked",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub next: CompletedSet,
    pub action: ToggleAction,
}

/// The one state transition over the completed set.
///
/// Completed courses are always removable, even when other completed courses
/// depend on them; dependents simply recompute to locked on the next render.
/// Un-completed courses are added only when eligible, otherwise the input set
/// is returned unchanged. Never touches any id other than the target's.
#[must_use]
pub fn toggle(course: &Course, completed: &CompletedSet) -> ToggleOutcome {
    if completed.contains(course.id) {
        let mut next = completed.clone();
        next.0.remove(&course.id);
        ToggleOutcome {
            next,
            action: ToggleAction::Unmarked,
        }
    } else if can_toggle_on(course, completed) {
        let mut next = completed.clone();
        next.0.insert(course.id);
        ToggleOutcome {
            next,
            action: ToggleAction::Marked,
        }
    } else {
        ToggleOutcome {
            next: completed.clone(),
            action: ToggleAction::Rejected,
        }
    }
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
    fn marks_eligible_course() {
        let c = course(1, &[]);
        let outcome = toggle(&c, &CompletedSet::new());
        assert_eq!(outcome.action, ToggleAction::Marked);
        assert_eq!(outcome.next, CompletedSet::from_ids([1]));
    }

    #[test]
    fn unmarks_completed_course_unconditionally() {
        // 6 depends on 1; removing 1 while 6 stays completed is allowed.
        let c = course(1, &[]);
        let done = CompletedSet::from_ids([1, 6]);
        let outcome = toggle(&c, &done);
        assert_eq!(outcome.action, ToggleAction::Unmarked);
        assert_eq!(outcome.next, CompletedSet::from_ids([6]));
    }

    #[test]
    fn rejects_locked_course_without_mutation() {
        let c = course(6, &[1, 2]);
        let set = CompletedSet::from_ids([1]);
        let outcome = toggle(&c, &set);
        assert_eq!(outcome.action, ToggleAction::Rejected);
        assert_eq!(outcome.next, set);

        // Idempotent under repeated rejection.
        let again = toggle(&c, &outcome.next);
        assert_eq!(again.action, ToggleAction::Rejected);
        assert_eq!(again.next, set);
    }

    #[test]
    fn toggle_only_touches_the_target_id() {
        let c = course(6, &[1, 2]);
        let set = CompletedSet::from_ids([1, 2, 9]);
        let outcome = toggle(&c, &set);
        assert_eq!(outcome.action, ToggleAction::Marked);
        assert_eq!(outcome.next, CompletedSet::from_ids([1, 2, 6, 9]));
    }

    #[test]
    fn off_then_on_restores_the_set() {
        let c = course(6, &[1, 2]);
        let original = CompletedSet::from_ids([1, 2, 6]);

        let off = toggle(&c, &original);
        assert_eq!(off.action, ToggleAction::Unmarked);

        let on = toggle(&c, &off.next);
        assert_eq!(on.action, ToggleAction::Marked);
        assert_eq!(on.next, original);
    }
}

use proptest::collection::btree_set;
use proptest::prelude::*;

use malla::catalog::{Catalog, Course, CourseId};
use malla::core::{self, CompletedSet, CourseStatus, ToggleAction};
use malla::transfer;

fn course(id: CourseId, prereqs: &[CourseId]) -> Course {
    Course {
        id,
        name: format!("Course {id}"),
        prereqs: prereqs.to_vec(),
    }
}

proptest! {
    #[test]
    fn no_prereq_course_is_never_locked(ids in btree_set(0u32..200, 0..40)) {
        let c = course(7, &[]);
        let set = CompletedSet::from_ids(ids);
        prop_assert_ne!(core::status(&c, &set), CourseStatus::Locked);
    }

    #[test]
    fn completed_iff_member(ids in btree_set(0u32..50, 0..25), id in 0u32..50) {
        let c = course(id, &[]);
        let set = CompletedSet::from_ids(ids);
        prop_assert_eq!(
            core::status(&c, &set) == CourseStatus::Completed,
            set.contains(id)
        );
    }

    #[test]
    fn rejected_toggle_returns_input_unchanged(
        ids in btree_set(0u32..50, 0..20),
        target in 100u32..150,
    ) {
        // The prerequisite 99 can never be in the set (members are < 50),
        // and neither can the target itself, so this is always a rejection.
        let c = course(target, &[99]);
        let set = CompletedSet::from_ids(ids);
        let outcome = core::toggle(&c, &set);
        prop_assert_eq!(outcome.action, ToggleAction::Rejected);
        prop_assert_eq!(outcome.next.clone(), set.clone());

        // And stays rejected however often it is repeated.
        let again = core::toggle(&c, &outcome.next);
        prop_assert_eq!(again.next, set);
    }

    #[test]
    fn toggle_changes_exactly_the_target(
        ids in btree_set(0u32..60, 0..30),
        target in 0u32..60,
    ) {
        let c = course(target, &[]);
        let set = CompletedSet::from_ids(ids);
        let outcome = core::toggle(&c, &set);

        prop_assert_ne!(outcome.next.contains(target), set.contains(target));
        for id in 0..60 {
            if id != target {
                prop_assert_eq!(outcome.next.contains(id), set.contains(id));
            }
        }
    }

    #[test]
    fn off_then_on_restores_any_set_containing_the_target(
        ids in btree_set(0u32..60, 1..30),
    ) {
        let target = *ids.iter().next().unwrap();
        let c = course(target, &[]);
        let original = CompletedSet::from_ids(ids);

        let off = core::toggle(&c, &original);
        prop_assert_eq!(off.action, ToggleAction::Unmarked);
        let on = core::toggle(&c, &off.next);
        prop_assert_eq!(on.action, ToggleAction::Marked);
        prop_assert_eq!(on.next, original);
    }

    #[test]
    fn export_import_round_trips(ids in btree_set(0u32..500, 0..60)) {
        let catalog = Catalog::builtin().unwrap();
        let set = CompletedSet::from_ids(ids);
        let payload = transfer::export_payload(&set).unwrap();
        let restored = transfer::import_payload(&payload, &catalog).unwrap();
        prop_assert_eq!(restored, set);
    }
}

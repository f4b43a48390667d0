use proptest::prelude::*;

use dealgrown::internal::comments::CommentsSheet;
use dealgrown::internal::gesture::{DragController, DragPolicy, ReleaseOutcome};
use dealgrown::internal::pagination::{Paginated, has_more};
use dealgrown::utils::text::{truncate, wrap};

proptest! {
    #[test]
    fn has_more_iff_current_page_below_total(current in 0u32..1000, pages in 0u32..1000) {
        prop_assert_eq!(has_more(current, pages), current < pages);
    }

    #[test]
    fn merged_length_is_sum_of_appended_pages(sizes in prop::collection::vec(0usize..50, 1..6)) {
        let mut list: Paginated<usize> = Paginated::default();
        let pages = sizes.len() as u32;
        for (i, size) in sizes.iter().enumerate() {
            let page_no = i as u32 + 1;
            list.merge((0..*size).collect(), page_no, pages, 0);
        }
        let expected: usize = sizes.iter().sum();
        prop_assert_eq!(list.len(), expected);
        prop_assert!(!list.has_more());
    }

    #[test]
    fn release_at_or_below_threshold_always_snaps_back(delta in -100.0f32..=100.0) {
        let mut controller = DragController::new(DragPolicy::vertical_feed(640.0));
        controller.begin();
        controller.drag_to(delta);
        prop_assert_eq!(controller.release(|_| true), ReleaseOutcome::SnappingBack);
    }

    #[test]
    fn release_past_threshold_always_commits(magnitude in 101.0f32..10_000.0, down in any::<bool>()) {
        let delta = if down { magnitude } else { -magnitude };
        let mut controller = DragController::new(DragPolicy::vertical_feed(640.0));
        controller.begin();
        controller.drag_to(delta);
        prop_assert!(matches!(
            controller.release(|_| true),
            ReleaseOutcome::Committing(_)
        ));
    }

    #[test]
    fn whitespace_only_comment_is_never_submitted(input in "[ \t\r\n]{0,40}") {
        let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
        sheet.input = input;
        prop_assert_eq!(sheet.take_input(), None);
    }

    #[test]
    fn nonblank_comment_is_submitted_trimmed(body in "[a-zA-Z0-9 ]*[a-zA-Z0-9][a-zA-Z0-9 ]*") {
        let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
        sheet.input = format!("  {body}  ");
        let taken = sheet.take_input().unwrap();
        prop_assert_eq!(taken, body.trim().to_string());
        prop_assert!(sheet.input.is_empty());
    }

    #[test]
    fn truncate_never_exceeds_limit(s in "\\PC*", max in 1usize..100) {
        prop_assert!(truncate(&s, max).chars().count() <= max);
    }

    #[test]
    fn wrap_never_panics(s in "\\PC*", width in 0usize..200) {
        let _ = wrap(&s, width);
    }
}

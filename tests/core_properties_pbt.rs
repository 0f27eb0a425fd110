use proptest::prelude::*;

use daneo_backend_rust::highlight::{diff_words, render_highlight, DiffSegment};
use daneo_backend_rust::quiz::shuffled;

proptest! {
    #[test]
    fn shuffle_preserves_the_multiset(xs in proptest::collection::vec(any::<u32>(), 0..64)) {
        let mut expected = xs.clone();
        let mut actual = shuffled(&xs);
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn diff_reconstructs_the_corrected_sentence(
        original in "[ a-z.,]{0,60}",
        corrected in "[ a-z.,]{0,60}",
    ) {
        let rebuilt: String = diff_words(&original, &corrected)
            .into_iter()
            .filter_map(|segment| match segment {
                DiffSegment::Unchanged(text) | DiffSegment::Inserted(text) => Some(text),
                DiffSegment::Deleted(_) => None,
            })
            .collect();
        prop_assert_eq!(rebuilt, corrected);
    }

    #[test]
    fn diff_drops_the_original_outside_deletions(
        original in "[ a-z.,]{0,60}",
        corrected in "[ a-z.,]{0,60}",
    ) {
        let kept: String = diff_words(&original, &corrected)
            .into_iter()
            .filter_map(|segment| match segment {
                DiffSegment::Unchanged(text) | DiffSegment::Deleted(text) => Some(text),
                DiffSegment::Inserted(_) => None,
            })
            .collect();
        prop_assert_eq!(kept, original);
    }

    #[test]
    fn equal_inputs_render_without_markers(text in "[ a-z.,]{0,60}") {
        let html = render_highlight(&text, &text);
        prop_assert!(!html.contains("<ins>"));
        prop_assert!(!html.contains("<del>"));
    }
}

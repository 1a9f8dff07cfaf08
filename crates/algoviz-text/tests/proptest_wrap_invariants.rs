//! Property-based invariants for greedy pixel wrapping.
//!
//! 1. At least one line is always committed.
//! 2. Concatenating the lines reproduces the input plus one trailing space.
//! 3. A line only overflows the width when it holds a single word.
//! 4. When every word is wider than the box, there is one line per word.
//! 5. Laid-out baselines are evenly spaced by the line height.

use algoviz_core::geometry::Point;
use algoviz_text::wrap::{WrapBox, layout_lines, wrap_lines};
use proptest::prelude::*;

fn chars(s: &str) -> f64 {
    s.chars().count() as f64
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,80}"
}

proptest! {
    #[test]
    fn always_at_least_one_line(text in text_strategy(), width in 0.0f64..60.0) {
        prop_assert!(!wrap_lines(&text, width, chars).is_empty());
    }

    #[test]
    fn lines_reassemble_input(text in text_strategy(), width in 0.0f64..60.0) {
        let joined: String = wrap_lines(&text, width, chars).concat();
        prop_assert_eq!(joined, format!("{text} "));
    }

    #[test]
    fn overflow_only_for_single_words(text in text_strategy(), width in 1.0f64..60.0) {
        for line in wrap_lines(&text, width, chars) {
            if chars(&line) > width {
                // One word plus its trailing space.
                prop_assert_eq!(line.trim_end_matches(' ').matches(' ').count(), 0);
            }
        }
    }

    #[test]
    fn every_word_too_wide_gives_one_line_each(words in proptest::collection::vec("[a-z]{3,8}", 1..12)) {
        let text = words.join(" ");
        let lines = wrap_lines(&text, 2.0, chars);
        prop_assert_eq!(lines.len(), words.len());
    }

    #[test]
    fn baselines_evenly_spaced(text in text_strategy(), lh in 1.0f64..40.0) {
        let bounds = WrapBox::new(Point::new(16.0, 60.0), 20.0).line_height(lh);
        let placed = layout_lines(&text, &bounds, chars);
        for (i, line) in placed.iter().enumerate() {
            prop_assert!((line.origin.y - (60.0 + i as f64 * lh)).abs() < 1e-9);
        }
    }
}

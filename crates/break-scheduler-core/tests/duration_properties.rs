//! Property-based tests for the duration expression parser.
//!
//! 1. Formatted text parses back to the same seconds, for any previous value
//! 2. `<h>h<m>m<s>s` in any unit order sums to h*3600 + m*60 + s
//! 3. Empty or whitespace-only input returns the previous value
//! 4. Relative edits add to / subtract from the previous value
//! 5. The parser is deterministic and never panics on arbitrary input

use break_scheduler_core::{format_duration_text, parse_duration_expr};
use proptest::prelude::*;

proptest! {
    #[test]
    fn formatted_text_roundtrips(n in 0u64..=50_000_000, previous in any::<i64>()) {
        let text = format_duration_text(n);
        prop_assert_eq!(parse_duration_expr(&text, previous), Ok(n as i64));
    }

    #[test]
    fn unit_order_does_not_matter(
        h in 0i64..1000,
        m in 0i64..1000,
        s in 0i64..1000,
        order in 0usize..6,
    ) {
        let parts = [format!("{h}h"), format!("{m}m"), format!("{s}s")];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        let text: String = orders[order].iter().map(|&i| parts[i].as_str()).collect();
        prop_assert_eq!(parse_duration_expr(&text, 0), Ok(h * 3600 + m * 60 + s));
    }

    #[test]
    fn blank_input_keeps_previous(spaces in "[ \t\n]{0,8}", previous in any::<i64>()) {
        prop_assert_eq!(parse_duration_expr(&spaces, previous), Ok(previous));
    }

    #[test]
    fn relative_edits_shift_previous(
        delta in 0i64..1_000_000,
        previous in -1_000_000_000i64..1_000_000_000,
    ) {
        prop_assert_eq!(parse_duration_expr(&format!("+{delta}"), previous), Ok(previous + delta));
        prop_assert_eq!(parse_duration_expr(&format!("-{delta}s"), previous), Ok(previous - delta));
    }

    #[test]
    fn parsing_is_deterministic(input in "\\PC{0,24}", previous in any::<i64>()) {
        let first = parse_duration_expr(&input, previous);
        let second = parse_duration_expr(&input, previous);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn documented_examples() {
    assert_eq!(parse_duration_expr("1h2m3s", 999), Ok(3723));
    assert_eq!(parse_duration_expr("", 77), Ok(77));
    assert_eq!(parse_duration_expr("+5m", 60), Ok(360));
    assert_eq!(parse_duration_expr("-30s", 60), Ok(30));
    let negative = parse_duration_expr("-90s", 60).unwrap();
    assert!(negative < 0);
    assert_eq!(format_duration_text(3723), "1h 2m 3s");
    assert_eq!(parse_duration_expr("1h 2m 3s", 0), Ok(3723));
}

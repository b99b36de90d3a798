//! Property tests for the history store
//!
//! Generates arbitrary append/recall/clear sequences and checks the cursor
//! and length invariants hold after every step.

use console_types::Line;
use proptest::prelude::*;
use services_history::HistoryStore;

#[derive(Debug, Clone)]
enum Op {
    Append(String),
    Recall(isize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => "[ \\ta-z/]{0,8}".prop_map(Op::Append),
        6 => (-3isize..=3).prop_map(Op::Recall),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    /// Length equals the number of non-blank appends.
    #[test]
    fn length_counts_only_non_blank_appends(lines in proptest::collection::vec("[ \\ta-z]{0,6}", 0..40)) {
        let mut store = HistoryStore::new();
        let mut expected = 0;
        for line in &lines {
            let recorded = store.append(Line::from(line.as_str()));
            prop_assert_eq!(recorded, !line.trim().is_empty());
            if recorded {
                expected += 1;
            }
        }
        prop_assert_eq!(store.len(), expected);
    }

    /// The cursor never escapes `[0, len]`, whatever the operation sequence.
    #[test]
    fn cursor_stays_clamped(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let mut store = HistoryStore::new();
        for op in ops {
            match op {
                Op::Append(text) => { store.append(Line::from(text)); }
                Op::Recall(delta) => {
                    let before = store.cursor();
                    let hit = store.recall(delta).is_some();
                    if !hit {
                        prop_assert_eq!(store.cursor(), before);
                    }
                }
                Op::Clear => store.clear(),
            }
            prop_assert!(store.cursor() <= store.len());
        }
    }

    /// Appending a line and immediately recalling one step back yields that line.
    #[test]
    fn append_then_recall_round_trips(
        prior in proptest::collection::vec("[a-z]{1,5}", 0..10),
        line in "[a-z][a-z ]{0,10}",
    ) {
        let mut store = HistoryStore::new();
        for p in &prior {
            store.append(Line::from(p.as_str()));
        }
        store.append(Line::from(line.as_str()));
        let recalled = store.recall(-1).cloned();
        prop_assert_eq!(recalled, Some(Line::from(line.as_str())));
    }

    /// Once the cursor reaches the oldest entry, further backward recalls are refused.
    #[test]
    fn backward_recall_is_idempotent_at_oldest(
        lines in proptest::collection::vec("[a-z]{1,5}", 1..10),
        extra in 1usize..8,
    ) {
        let mut store = HistoryStore::new();
        for l in &lines {
            store.append(Line::from(l.as_str()));
        }
        for _ in 0..lines.len() {
            prop_assert!(store.recall(-1).is_some());
        }
        for _ in 0..extra {
            prop_assert!(store.recall(-1).is_none());
            prop_assert_eq!(store.cursor(), 0);
        }
    }
}

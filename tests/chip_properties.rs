//! Property tests for the validator, drag engine and collection.

use proptest::prelude::*;
use proptest::sample::select;

use sieve::core::chip::{Chip, IdentifierPool};
use sieve::core::collection::ChipCollection;
use sieve::core::drag::{ChipRect, DragCommit, DragConfig, DragEngine, Point};
use sieve::core::validator::{Violation, validate};

// ============================================================================
// Helper Functions
// ============================================================================

const LABELS: &[&str] = &["AND", "OR", "(", ")", "pizza", "sushi", "tacos"];
const IDENTIFIERS: &[&str] = &["pizza", "sushi", "tacos", "pasta", "ramen", "curry"];
const CHIP_HEIGHT: f64 = 32.0;
const CHIP_GAP: f64 = 8.0;
const ROW_PITCH: f64 = 72.0;

/// One row per entry in `rows`, chips laid out left to right.
fn layout(rows: &[Vec<f64>]) -> Vec<ChipRect> {
    let mut rects = Vec::new();
    for (r, widths) in rows.iter().enumerate() {
        let mut left = 0.0;
        for &width in widths {
            rects.push(ChipRect::new(left, r as f64 * ROW_PITCH, width, CHIP_HEIGHT));
            left += width + CHIP_GAP;
        }
    }
    rects
}

fn center(rect: &ChipRect) -> Point {
    Point::new(rect.mid_x(), rect.top + CHIP_HEIGHT / 2.0)
}

fn sequence_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(select(LABELS), 0..12)
}

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(20.0..80.0f64, 1..5), 1..4)
}

/// Identifiers `c0..cN`, all placed in order, leaving the pool empty.
fn collection_of(n: usize) -> ChipCollection {
    let labels: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
    ChipCollection::new(IdentifierPool::from_labels(&labels), &labels)
}

fn sorted_pool(collection: &ChipCollection) -> Vec<String> {
    let mut labels: Vec<String> = collection.pool().iter().map(|c| c.label.clone()).collect();
    labels.sort();
    labels
}

// ============================================================================
// Validator
// ============================================================================

proptest! {
    #[test]
    fn test_singleton_rule_only_for_length_one(labels in sequence_strategy()) {
        let verdict = validate(&labels);
        if labels.len() != 1 {
            prop_assert_ne!(verdict.violation(), Some(Violation::SingleIdentifier));
        }
        prop_assert_eq!(verdict.is_valid(), verdict.message().is_empty());
    }

    #[test]
    fn test_identifier_names_do_not_matter(labels in sequence_strategy()) {
        let renamed: Vec<&str> = labels
            .iter()
            .map(|l| match *l {
                "AND" | "OR" | "(" | ")" => *l,
                _ => "x",
            })
            .collect();
        prop_assert_eq!(validate(&labels), validate(&renamed));
    }
}

// ============================================================================
// Drag engine
// ============================================================================

proptest! {
    #[test]
    fn test_small_moves_leave_preview_untouched(
        (rows, index) in rows_strategy().prop_flat_map(|rows| {
            let n: usize = rows.iter().map(Vec::len).sum();
            (Just(rows), 0..n)
        }),
        dx in -6.0..6.0f64,
        dy in -6.0..6.0f64,
    ) {
        let rects = layout(&rows);
        let sequence: Vec<usize> = (0..rects.len()).collect();
        let mut engine = DragEngine::new(DragConfig::default());
        let start = center(&rects[index]);
        engine.begin_drag(index, start, &rects);
        // Both offsets under 6 keep the pointer within the 10 unit threshold.
        engine.drag_to(Point::new(start.x + dx, start.y + dy));

        let preview = engine.preview_sequence(&sequence);
        prop_assert_eq!(preview.as_ref(), sequence.as_slice());
        prop_assert_eq!(engine.end_drag(false), DragCommit::Unchanged);
        prop_assert_eq!(engine.pointer_hub().active(), 0);
    }

    #[test]
    fn test_drop_before_successor_is_unchanged(
        widths in prop::collection::vec(20.0..80.0f64, 2..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let rects = layout(&[widths.clone()]);
        let index = pick.index(widths.len() - 1);
        let successor = &rects[index + 1];
        let mut engine = DragEngine::new(DragConfig::default());
        engine.begin_drag(index, center(&rects[index]), &rects);
        engine.drag_to(Point::new(successor.left + 1.0, successor.top + 4.0));

        prop_assert_eq!(engine.session().map(|s| s.placeholder()), Some(index));
        prop_assert_eq!(engine.end_drag(false), DragCommit::Unchanged);
    }

    #[test]
    fn test_commit_matches_last_preview(
        (rows, index) in rows_strategy().prop_flat_map(|rows| {
            let n: usize = rows.iter().map(Vec::len).sum();
            (Just(rows), 0..n)
        }),
        path in prop::collection::vec((-40.0..400.0f64, -60.0..260.0f64), 1..6),
    ) {
        let rects = layout(&rows);
        let mut collection = collection_of(rects.len());
        let mut engine = DragEngine::new(DragConfig::default());
        engine.begin_drag(index, center(&rects[index]), &rects);
        for (x, y) in path {
            engine.drag_to(Point::new(x, y));
        }
        let preview: Vec<Chip> = engine.preview_sequence(collection.sequence()).into_owned();

        collection.apply(engine.end_drag(false));

        prop_assert_eq!(collection.sequence(), preview.as_slice());
        prop_assert_eq!(engine.pointer_hub().active(), 0);
    }

    #[test]
    fn test_cancel_never_changes_sequence(
        widths in prop::collection::vec(20.0..80.0f64, 1..8),
        pick in any::<prop::sample::Index>(),
        x in -40.0..600.0f64,
    ) {
        let rects = layout(&[widths.clone()]);
        let index = pick.index(widths.len());
        let mut collection = collection_of(rects.len());
        let before = collection.sequence().to_vec();
        let mut engine = DragEngine::new(DragConfig::default());
        engine.begin_drag(index, center(&rects[index]), &rects);
        engine.drag_to(Point::new(x, 10.0));

        collection.apply(engine.cancel_drag());

        prop_assert_eq!(collection.sequence(), before.as_slice());
        prop_assert!(!engine.is_capturing());
    }
}

// ============================================================================
// Collection
// ============================================================================

proptest! {
    #[test]
    fn test_trash_shrinks_sequence_by_one(
        placed in prop::sample::subsequence(IDENTIFIERS.to_vec(), 1..IDENTIFIERS.len()),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut collection = ChipCollection::new(IdentifierPool::from_labels(IDENTIFIERS), &placed);
        let len = collection.sequence().len();
        let pool_len = collection.pool().len();

        let removed = collection.remove_via_trash(pick.index(len));

        prop_assert!(removed.is_some());
        prop_assert_eq!(collection.sequence().len(), len - 1);
        prop_assert_eq!(collection.pool().len(), pool_len + 1);
    }

    #[test]
    fn test_add_absent_identifier_is_noop(labels in sequence_strategy()) {
        let mut collection = ChipCollection::new(IdentifierPool::from_labels(["pizza"]), &labels);
        let before = collection.sequence().to_vec();
        let pool_before = sorted_pool(&collection);

        prop_assert!(!collection.add_from_pool(&Chip::identifier("not-in-pool")));
        prop_assert_eq!(collection.sequence(), before.as_slice());
        prop_assert_eq!(sorted_pool(&collection), pool_before);
        prop_assert!(!collection.schedule().is_pending());
    }

    #[test]
    fn test_add_then_trash_restores_pool(pick in select(IDENTIFIERS)) {
        let mut collection =
            ChipCollection::new(IdentifierPool::from_labels(IDENTIFIERS), ["pizza", "AND"]);
        let pool_before = sorted_pool(&collection);
        let sequence_before = collection.sequence().to_vec();

        if collection.add_from_pool(&Chip::identifier(pick)) {
            let last = collection.sequence().len() - 1;
            collection.remove_via_trash(last);
        }

        prop_assert_eq!(sorted_pool(&collection), pool_before);
        prop_assert_eq!(collection.sequence(), sequence_before.as_slice());
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::chip::IdentifierPool;
use crate::core::collection::ChipCollection;
use crate::core::drag::{ChipRect, DragConfig, Point};
use crate::core::state::App;

pub const CHIP_HEIGHT: f64 = 32.0;
pub const CHIP_GAP: f64 = 8.0;
/// Vertical gap between rows. Wider than the default row tolerance so each
/// row's band stays clear of its neighbours.
pub const ROW_GAP: f64 = 40.0;

/// Lay chips out in rows. Each inner slice holds the widths of one row.
pub fn grid(rows: &[&[f64]]) -> Vec<ChipRect> {
    let mut rects = Vec::new();
    for (r, widths) in rows.iter().enumerate() {
        let top = r as f64 * (CHIP_HEIGHT + ROW_GAP);
        let mut left = 0.0;
        for &width in widths.iter() {
            rects.push(ChipRect::new(left, top, width, CHIP_HEIGHT));
            left += width + CHIP_GAP;
        }
    }
    rects
}

pub fn chip_center(rects: &[ChipRect], index: usize) -> Point {
    let rect = rects[index];
    Point::new(rect.mid_x(), rect.top + (rect.bottom - rect.top) / 2.0)
}

/// `pizza AND tacos` with `sushi` and `pasta` left in the pool.
pub fn test_collection() -> ChipCollection {
    let pool = IdentifierPool::from_labels(["pizza", "sushi", "tacos", "pasta"]);
    ChipCollection::new(pool, ["pizza", "AND", "tacos"])
}

/// Creates a test App around [`test_collection`].
pub fn test_app() -> App {
    App::new(test_collection(), DragConfig::default())
}

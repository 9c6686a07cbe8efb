//! # Drag Reorder Engine
//!
//! Turns a stream of pointer positions into a live insertion point for the
//! chip being dragged, and into a single [`DragCommit`] when it is released.
//!
//! ```text
//!            begin_drag()                 end_drag() / cancel_drag()
//!   Idle ─────────────────────▶ Dragging ─────────────────────────────▶ Idle
//!                               │      ▲
//!                               └──────┘ update_pointer() / drag_to()
//! ```
//!
//! Idle is `session == None`. Everything a drag needs lives in one
//! [`DragSession`], including the [`PointerCapture`] that keeps pointer
//! events routed to the engine. Taking the session out of the engine drops
//! the capture, so every way out of a drag releases it.
//!
//! ## Placeholder
//!
//! The placeholder is an insertion slot in the sequence *with the dragged
//! chip removed*. A chip at index `i` after the dragged one occupies slot
//! `i - 1`. Releasing with `placeholder == index` therefore changes nothing,
//! which is what dropping a chip right before its own successor should do.

use std::borrow::Cow;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::{debug, info, warn};

/// Minimum pointer travel (geometry units) before the placeholder moves.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 10.0;
/// Vertical slack (geometry units) above and below a row that still counts as inside it.
pub const DEFAULT_ROW_TOLERANCE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    pub distance_threshold: f64,
    pub row_tolerance: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            row_tolerance: DEFAULT_ROW_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Bounding box of one rendered chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ChipRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
        }
    }

    pub fn mid_x(&self) -> f64 {
        self.left + (self.right - self.left) / 2.0
    }
}

/// Supplies chip rectangles in display order.
///
/// Implemented by whatever lays the chips out. The engine copies the result
/// when a drag starts and never holds on to the source.
pub trait GeometrySource {
    fn chip_rects(&self) -> Vec<ChipRect>;
}

impl GeometrySource for [ChipRect] {
    fn chip_rects(&self) -> Vec<ChipRect> {
        self.to_vec()
    }
}

impl GeometrySource for Vec<ChipRect> {
    fn chip_rects(&self) -> Vec<ChipRect> {
        self.clone()
    }
}

/// A visual row of chips sharing the same (rounded) top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    /// Indices into the snapshot, in snapshot order.
    pub members: Vec<usize>,
}

/// Group rectangles into rows, ordered top to bottom.
pub fn group_rows(rects: &[ChipRect]) -> Vec<Row> {
    let mut rows: BTreeMap<i64, Row> = BTreeMap::new();
    for (i, rect) in rects.iter().enumerate() {
        let key = rect.top.round() as i64;
        let row = rows.entry(key).or_insert_with(|| Row {
            top: rect.top,
            bottom: rect.bottom,
            left: rect.left,
            right: rect.right,
            members: Vec::new(),
        });
        row.members.push(i);
        row.bottom = rect.bottom;
        row.left = row.left.min(rect.left);
        row.right = row.right.max(rect.right);
    }
    rows.into_values().collect()
}

/// Where the dragged chip would land for `pointer`, or `None` to keep the
/// current placeholder.
fn placeholder_for(
    config: &DragConfig,
    drag_index: usize,
    start: Point,
    pointer: Point,
    rects: &[ChipRect],
) -> Option<usize> {
    if start.distance(pointer) < config.distance_threshold {
        return None;
    }

    let rows = group_rows(rects);
    let row = rows.iter().find(|row| {
        pointer.y >= row.top - config.row_tolerance
            && pointer.y <= row.bottom + config.row_tolerance
    })?;

    let slot_before = |i: usize| if i > drag_index { i - 1 } else { i };
    let slot_after = |i: usize| if i == drag_index { i } else { slot_before(i) + 1 };

    let first = *row.members.first()?;
    if pointer.x < rects[first].mid_x() {
        return Some(slot_before(first));
    }

    let last = *row.members.last()?;
    let mut candidate = slot_after(last);
    for &i in &row.members {
        if i == drag_index {
            continue;
        }
        if pointer.x > rects[i].mid_x() {
            candidate = slot_after(i);
        } else {
            candidate = slot_before(i);
            break;
        }
    }
    Some(candidate)
}

// ============================================================================
// Pointer capture
// ============================================================================

/// Hands out [`PointerCapture`] guards and counts the live ones.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    live: Rc<Cell<usize>>,
}

impl PointerHub {
    pub fn acquire(&self) -> PointerCapture {
        self.live.set(self.live.get() + 1);
        debug!("Pointer capture acquired (live={})", self.live.get());
        PointerCapture {
            live: Rc::clone(&self.live),
        }
    }

    /// Number of captures not yet dropped.
    pub fn active(&self) -> usize {
        self.live.get()
    }
}

/// Pointer-move/pointer-up subscription for one drag. Released on drop.
#[derive(Debug)]
pub struct PointerCapture {
    live: Rc<Cell<usize>>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
        debug!("Pointer capture released (live={})", self.live.get());
    }
}

// ============================================================================
// Session + engine
// ============================================================================

#[derive(Debug)]
pub struct DragSession {
    index: usize,
    placeholder: usize,
    start: Point,
    pointer: Point,
    over_delete_target: bool,
    snapshot: Vec<ChipRect>,
    _capture: PointerCapture,
}

impl DragSession {
    /// Index of the dragged chip in the committed sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn placeholder(&self) -> usize {
        self.placeholder
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn over_delete_target(&self) -> bool {
        self.over_delete_target
    }

    /// Geometry frozen when the drag began.
    pub fn snapshot(&self) -> &[ChipRect] {
        &self.snapshot
    }

    fn retarget(&mut self, config: &DragConfig, pointer: Point, rects: &[ChipRect]) -> bool {
        self.pointer = pointer;
        match placeholder_for(config, self.index, self.start, pointer, rects) {
            Some(candidate) if candidate != self.placeholder => {
                debug!(
                    "Placeholder {} -> {} (dragging {})",
                    self.placeholder, candidate, self.index
                );
                self.placeholder = candidate;
                true
            }
            _ => false,
        }
    }
}

/// What a finished drag asks the collection to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCommit {
    /// Dropped on the trash: remove the chip at `index`.
    Remove { index: usize },
    /// Move the chip at `from` into slot `to`.
    Reorder { from: usize, to: usize },
    /// Released where it started.
    Unchanged,
    /// Abandoned without committing anything.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct DragEngine {
    config: DragConfig,
    session: Option<DragSession>,
    hub: PointerHub,
}

impl DragEngine {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
            hub: PointerHub::default(),
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// True while a drag holds the pointer capture.
    pub fn is_capturing(&self) -> bool {
        self.hub.active() > 0
    }

    pub fn pointer_hub(&self) -> &PointerHub {
        &self.hub
    }

    /// Start dragging the chip at `index`.
    ///
    /// Only one drag may be active. Starting a second one is a caller bug:
    /// it asserts in debug builds and is ignored otherwise.
    pub fn begin_drag<G>(&mut self, index: usize, pointer: Point, geometry: &G)
    where
        G: GeometrySource + ?Sized,
    {
        debug_assert!(
            self.session.is_none(),
            "begin_drag called while a drag is already active"
        );
        if let Some(active) = &self.session {
            warn!(
                "Ignoring begin_drag({}) while dragging {}",
                index, active.index
            );
            return;
        }

        info!("Drag started on chip {}", index);
        self.session = Some(DragSession {
            index,
            placeholder: index,
            start: pointer,
            pointer,
            over_delete_target: false,
            snapshot: geometry.chip_rects(),
            _capture: self.hub.acquire(),
        });
    }

    /// Recompute the placeholder against `geometry`.
    /// Returns whether it moved.
    pub fn update_pointer(&mut self, pointer: Point, geometry: &[ChipRect]) -> bool {
        match self.session.as_mut() {
            Some(session) => session.retarget(&self.config, pointer, geometry),
            None => false,
        }
    }

    /// Recompute the placeholder against the geometry frozen at drag start.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let snapshot = std::mem::take(&mut session.snapshot);
        let moved = session.retarget(&self.config, pointer, &snapshot);
        session.snapshot = snapshot;
        moved
    }

    pub fn set_over_delete_target(&mut self, over: bool) {
        if let Some(session) = self.session.as_mut() {
            session.over_delete_target = over;
        }
    }

    /// `sequence` as it would look if the chip were dropped right now.
    /// Never modifies `sequence`.
    pub fn preview_sequence<'a, T: Clone>(&self, sequence: &'a [T]) -> Cow<'a, [T]> {
        let Some(session) = &self.session else {
            return Cow::Borrowed(sequence);
        };
        if session.placeholder == session.index || session.index >= sequence.len() {
            return Cow::Borrowed(sequence);
        }
        let mut preview = sequence.to_vec();
        let dragged = preview.remove(session.index);
        let slot = session.placeholder.min(preview.len());
        preview.insert(slot, dragged);
        Cow::Owned(preview)
    }

    /// Release the drag and report what should happen to the sequence.
    pub fn end_drag(&mut self, over_delete_target: bool) -> DragCommit {
        let Some(session) = self.session.take() else {
            warn!("end_drag called with no active drag");
            return DragCommit::Unchanged;
        };

        let commit = if over_delete_target {
            DragCommit::Remove {
                index: session.index,
            }
        } else if session.placeholder != session.index {
            DragCommit::Reorder {
                from: session.index,
                to: session.placeholder,
            }
        } else {
            DragCommit::Unchanged
        };
        info!("Drag ended: {:?}", commit);
        commit
    }

    /// Abandon the drag without committing.
    pub fn cancel_drag(&mut self) -> DragCommit {
        match self.session.take() {
            Some(session) => {
                info!("Drag on chip {} cancelled", session.index);
                DragCommit::Cancelled
            }
            None => DragCommit::Unchanged,
        }
    }
}

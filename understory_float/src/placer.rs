// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float tracking and placement for a single block formatting context.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::types::{ClearSides, FloatSide, FloatedBox, FlowBox, FlowCursor};
use crate::util::{intersects, line_probe, to_shared};

/// Placement record for a tracked float.
#[derive(Clone, Debug)]
pub(crate) struct TrackedFloat {
    pub(crate) side: FloatSide,
    /// Current bounds in the float's own local frame.
    pub(crate) local_bounds: Rect,
    /// Formatting-context offset at the time the float was saved. Never updated.
    pub(crate) offset: Vec2,
}

impl TrackedFloat {
    fn shared_bounds(&self) -> Rect {
        to_shared(self.local_bounds, self.offset)
    }
}

/// Tracks the left and right floats of one block formatting context.
///
/// Floats are identified by a caller-chosen key `K` (an index or a handle),
/// never by reference. Each placed float remembers the formatting-context
/// offset that was current when it was placed. All comparisons happen in a
/// shared frame obtained by subtracting that frozen offset, so floats placed
/// from nested formatting contexts can be compared with each other.
///
/// Floats must be placed in the order the layout engine meets them in flow.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect, Size};
/// use understory_float::{FloatPlacer, FloatSide, FloatedBox, FlowCursor};
///
/// let mut floats = FloatPlacer::new();
/// let cursor = FlowCursor::default();
///
/// let mut a = FloatedBox::new(1_u32, FloatSide::Left, Size::new(150.0, 50.0), 400.0);
/// floats.place_float(&cursor, &mut a);
/// assert_eq!(a.origin, Point::new(0.0, 0.0));
///
/// // A line next to the float yields its width.
/// let line = Rect::new(0.0, 10.0, 400.0, 30.0);
/// assert_eq!(floats.left_float_distance(cursor.bfc_offset, line), 150.0);
/// ```
#[derive(Clone, Debug)]
pub struct FloatPlacer<K> {
    pub(crate) left: SmallVec<[K; 4]>,
    pub(crate) right: SmallVec<[K; 4]>,
    pub(crate) entries: HashMap<K, TrackedFloat>,
    pub(crate) anchor: Point,
}

impl<K: Copy + Eq + Hash> Default for FloatPlacer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> FloatPlacer<K> {
    /// Create an empty placer anchored at the origin.
    pub fn new() -> Self {
        Self {
            left: SmallVec::new(),
            right: SmallVec::new(),
            entries: HashMap::new(),
            anchor: Point::ORIGIN,
        }
    }

    /// Position `float` at the cursor and start tracking it.
    ///
    /// The float starts at `cursor.floating_y`, is moved against its side, and
    /// is then pushed sideways or down until it neither leaves the containing
    /// block nor overlaps another float. Any clearance it requests is applied
    /// last. Placement never fails; the worst case is a float moved below
    /// every other float.
    ///
    /// Placing a key that is already tracked replaces the old record.
    pub fn place_float(&mut self, cursor: &FlowCursor, float: &mut FloatedBox<K>) {
        if self.remove_float(float.id) {
            debug!("float re-placed; previous record evicted");
        }
        float.origin.y = cursor.floating_y;
        self.position(cursor.bfc_offset, float);
        self.save_float(cursor.bfc_offset, float);
    }

    /// Place a batch of deferred floats in order and empty the batch.
    ///
    /// Only the first float starts from the caller's `floating_y`; the cursor
    /// is reset to zero before each later one. Every float has its pending
    /// flag cleared once placed.
    pub fn flush_pending<'a>(
        &mut self,
        cursor: &mut FlowCursor,
        pending: &mut Vec<&'a mut FloatedBox<K>>,
    ) where
        K: 'a,
    {
        if pending.is_empty() {
            return;
        }
        trace!("flushing {} pending floats", pending.len());
        for (i, float) in pending.drain(..).enumerate() {
            if i != 0 {
                cursor.floating_y = 0.0;
            }
            self.place_float(cursor, float);
            float.pending = false;
        }
    }

    /// Push `target` below the floats on the requested sides.
    ///
    /// For each side in `sides`, the clearance line is the lowest bottom edge
    /// among that side's floats (zero when there are none). If the box's top
    /// is above the line it is moved straight down onto it. Boxes are never
    /// moved up or sideways.
    pub fn clear<B: FlowBox + ?Sized>(&self, offset: Vec2, target: &mut B, sides: ClearSides) {
        if sides.contains(ClearSides::LEFT) {
            self.move_clear(offset, target, FloatSide::Left);
        }
        if sides.contains(ClearSides::RIGHT) {
            self.move_clear(offset, target, FloatSide::Right);
        }
    }

    /// Apply the clearance requested by the float itself.
    ///
    /// If `float` is already tracked, its record follows the new position;
    /// the offset recorded at placement is kept.
    pub fn clear_box(&mut self, offset: Vec2, float: &mut FloatedBox<K>) {
        let sides = float.clear;
        self.clear(offset, float, sides);
        self.move_float(float.id, float.origin);
    }

    /// Move a tracked float to `origin`, given in the local frame it was
    /// placed from.
    ///
    /// Floats moved after placement must be reported here so later overlap,
    /// clearance, distance and paint queries see their live position. The
    /// offset recorded at placement is not changed. Returns `false` if `id`
    /// is not tracked.
    pub fn move_float(&mut self, id: K, origin: Point) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if entry.local_bounds.origin() != origin {
            trace!("tracked float moved to {origin:?}");
            entry.local_bounds = entry.local_bounds.with_origin(origin);
        }
        true
    }

    /// Stop tracking a float.
    ///
    /// Returns `true` if the key was tracked. Removing an unknown key is not an
    /// error.
    pub fn remove_float(&mut self, id: K) -> bool {
        let removed = self.entries.remove(&id).is_some();
        self.left.retain(|k| *k != id);
        self.right.retain(|k| *k != id);
        if removed {
            trace!("float removed; {} remain", self.entries.len());
        }
        removed
    }

    /// Stop tracking every float. The anchor is kept.
    pub fn clear_all(&mut self) {
        self.left.clear();
        self.right.clear();
        self.entries.clear();
    }

    /// Horizontal space that floats on `side` take out of `line`.
    ///
    /// `line` is in the local frame of the formatting context with the given
    /// `offset`. A zero width or height is treated as 10 so unsized lines can
    /// still be tested. Floats are visited in placement order; each one that
    /// intersects the probe adds its width and pushes the probe inward by
    /// that width before the next float is tested.
    pub fn float_distance(&self, offset: Vec2, side: FloatSide, line: Rect) -> f64 {
        if self.list(side).is_empty() {
            return 0.0;
        }
        let mut probe = line_probe(to_shared(line, offset));
        let mut distance = 0.0;
        for bounds in self.shared_bounds_of(side) {
            if intersects(probe, bounds) {
                let width = bounds.width();
                let shift = match side {
                    FloatSide::Left => width,
                    FloatSide::Right => -width,
                };
                probe = probe + Vec2::new(shift, 0.0);
                distance += width;
            }
        }
        distance
    }

    /// [`FloatPlacer::float_distance`] for left floats.
    pub fn left_float_distance(&self, offset: Vec2, line: Rect) -> f64 {
        self.float_distance(offset, FloatSide::Left, line)
    }

    /// [`FloatPlacer::float_distance`] for right floats.
    pub fn right_float_distance(&self, offset: Vec2, line: Rect) -> f64 {
        self.float_distance(offset, FloatSide::Right, line)
    }

    /// Lowest bottom edge, in the shared frame, among floats on `sides`.
    ///
    /// This is the line [`FloatPlacer::clear`] pushes boxes onto. Returns zero
    /// when no matching float is tracked.
    pub fn lowest_float_bottom(&self, sides: ClearSides) -> f64 {
        let mut lowest = 0.0_f64;
        if sides.contains(ClearSides::LEFT) {
            lowest = lowest.max(self.lowest_bottom(FloatSide::Left));
        }
        if sides.contains(ClearSides::RIGHT) {
            lowest = lowest.max(self.lowest_bottom(FloatSide::Right));
        }
        lowest
    }

    /// Set the origin of the box floats are painted relative to.
    pub fn set_anchor(&mut self, origin: Point) {
        self.anchor = origin;
    }

    /// Origin of the box floats are painted relative to.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Keys of the floats on `side`, in placement order.
    pub fn floats(&self, side: FloatSide) -> impl Iterator<Item = K> + '_ {
        self.list(side).iter().copied()
    }

    /// Returns `true` if `id` is tracked.
    pub fn contains(&self, id: K) -> bool {
        self.entries.contains_key(&id)
    }

    /// Side a tracked float was placed on.
    pub fn side_of(&self, id: K) -> Option<FloatSide> {
        self.entries.get(&id).map(|e| e.side)
    }

    /// Formatting-context offset recorded when `id` was placed.
    pub fn offset_of(&self, id: K) -> Option<Vec2> {
        self.entries.get(&id).map(|e| e.offset)
    }

    /// Bounds of a tracked float in the shared frame.
    pub fn float_bounds(&self, id: K) -> Option<Rect> {
        self.entries.get(&id).map(TrackedFloat::shared_bounds)
    }

    /// Number of tracked floats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no floats are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn list(&self, side: FloatSide) -> &[K] {
        match side {
            FloatSide::Left => &self.left,
            FloatSide::Right => &self.right,
        }
    }

    fn list_mut(&mut self, side: FloatSide) -> &mut SmallVec<[K; 4]> {
        match side {
            FloatSide::Left => &mut self.left,
            FloatSide::Right => &mut self.right,
        }
    }

    fn last_float(&self, side: FloatSide) -> Option<&TrackedFloat> {
        self.list(side).last().and_then(|id| self.entries.get(id))
    }

    fn shared_bounds_of(&self, side: FloatSide) -> impl Iterator<Item = Rect> + '_ {
        self.list(side)
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(TrackedFloat::shared_bounds)
    }

    fn lowest_bottom(&self, side: FloatSide) -> f64 {
        self.shared_bounds_of(side)
            .fold(0.0_f64, |lowest, b| lowest.max(b.y1))
    }

    fn overlaps(&self, offset: Vec2, bounds: Rect, side: FloatSide) -> bool {
        let bounds = to_shared(bounds, offset);
        self.shared_bounds_of(side).any(|b| intersects(b, bounds))
    }

    fn position(&self, offset: Vec2, current: &mut FloatedBox<K>) {
        let side = current.side;
        current.move_to_edge();

        // Cheap pass: only the most recent float on each side is consulted.
        self.align_to_last_opposing_float(offset, current);
        self.align_to_last_float(offset, current);

        // Full pass: repair against every tracked float.
        if !current.fits_in_containing_block() || self.overlaps(offset, current.bounds(), side) {
            trace!("{side:?} float does not fit beside its last float; clearing same side");
            current.move_to_edge();
            self.move_clear(offset, current, side);
        }

        if self.overlaps(offset, current.bounds(), side.opposite()) {
            trace!("{side:?} float overlaps opposite floats; clearing both sides");
            current.move_to_edge();
            self.move_clear(offset, current, side);
            self.move_clear(offset, current, side.opposite());
        }

        if !current.clear.is_empty() {
            let sides = current.clear;
            self.clear(offset, current, sides);
        }
        trace!("{side:?} float placed at {:?}", current.origin);
    }

    /// Keeps a float from rising above the last float on the other side.
    fn align_to_last_opposing_float(&self, offset: Vec2, current: &mut FloatedBox<K>) {
        let Some(last) = self.last_float(current.side.opposite()) else {
            return;
        };
        let bounds = to_shared(current.bounds(), offset);
        let last_bounds = last.shared_bounds();
        if bounds.y0 < last_bounds.y0 {
            current.origin.y = last_bounds.y0 + offset.y;
        }
    }

    /// Stacks a float beside the last float on its own side.
    fn align_to_last_float(&self, offset: Vec2, current: &mut FloatedBox<K>) {
        let Some(last) = self.last_float(current.side) else {
            return;
        };
        let mut bounds = to_shared(current.bounds(), offset);
        let last_bounds = last.shared_bounds();

        let mut move_over = false;
        if bounds.y0 < last_bounds.y0 {
            bounds = bounds + Vec2::new(0.0, last_bounds.y0 - bounds.y0);
            move_over = true;
        }
        if bounds.y0 >= last_bounds.y0 && bounds.y0 < last_bounds.y1 {
            move_over = true;
        }

        if move_over {
            let x = match current.side {
                FloatSide::Left => last_bounds.x1,
                FloatSide::Right => last_bounds.x0 - current.width(),
            };
            current.origin = Point::new(x, bounds.y0) + offset;
        }
    }

    fn move_clear<B: FlowBox + ?Sized>(&self, offset: Vec2, target: &mut B, side: FloatSide) {
        let local = target.bounds();
        let bounds = to_shared(local, offset);
        let y = self.lowest_bottom(side);
        if bounds.y0 < y {
            target.set_origin(Point::new(local.x0, y + offset.y));
        }
    }

    /// Record the float's final position. Must run after positioning, since
    /// the frozen offset is what later comparisons use.
    fn save_float(&mut self, offset: Vec2, float: &FloatedBox<K>) {
        self.entries.insert(
            float.id,
            TrackedFloat {
                side: float.side,
                local_bounds: float.bounds(),
                offset,
            },
        );
        self.list_mut(float.side).push(float.id);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint traversal over tracked floats.

use core::hash::Hash;

use kurbo::Vec2;

use crate::placer::FloatPlacer;

/// Drawing surface the floats of a formatting context are painted onto.
///
/// The placer does not know how to draw a box; it only decides the order and
/// the translation each float is painted with.
pub trait FloatSurface<K> {
    /// Moves the surface origin by `by`.
    fn translate(&mut self, by: Vec2);

    /// Paints the float `id` at its own position shifted by `offset`.
    fn paint_float(&mut self, id: K, offset: Vec2);
}

impl<K: Copy + Eq + Hash> FloatPlacer<K> {
    /// Paint every tracked float onto `surface`.
    ///
    /// The surface origin is moved to the anchor for the duration of the
    /// call. Left floats are painted first, then right floats, each in
    /// placement order and shifted by the negative of the offset recorded
    /// when it was placed.
    pub fn paint_floats<S: FloatSurface<K> + ?Sized>(&self, surface: &mut S) {
        let anchor = self.anchor.to_vec2();
        surface.translate(anchor);
        for id in self.left.iter().chain(self.right.iter()) {
            if let Some(entry) = self.entries.get(id) {
                surface.paint_float(*id, -entry.offset);
            }
        }
        surface.translate(-anchor);
    }
}

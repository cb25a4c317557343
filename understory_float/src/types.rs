// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for float placement: sides, clear requests, floated boxes, and flow state.

use kurbo::{Point, Rect, Size, Vec2};

/// Edge of the containing block a float is pushed against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FloatSide {
    /// Floated to the left edge; later content flows on its right.
    Left,
    /// Floated to the right edge; later content flows on its left.
    Right,
}

impl FloatSide {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the clear request that clears past floats on this side.
    #[must_use]
    pub const fn as_clear(self) -> ClearSides {
        match self {
            Self::Left => ClearSides::LEFT,
            Self::Right => ClearSides::RIGHT,
        }
    }
}

bitflags::bitflags! {
    /// Sides a box asks to be cleared past.
    ///
    /// The empty set means no clearance is requested.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ClearSides: u8 {
        /// Top edge must sit below every left float.
        const LEFT  = 0b0000_0001;
        /// Top edge must sit below every right float.
        const RIGHT = 0b0000_0010;
        /// Top edge must sit below every float.
        const BOTH  = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// A floated box as handed to the placer.
///
/// The box is owned by the caller; the placer only writes [`FloatedBox::origin`]
/// and [`FloatedBox::pending`]. Size and containing-block width are fixed at
/// construction, so a float can never reach the placer without a resolved
/// containing block.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatedBox<K> {
    /// Stable identifier used to track the float after placement.
    pub id: K,
    /// Side the float is pushed against.
    pub side: FloatSide,
    /// Clearance requested by the float itself.
    pub clear: ClearSides,
    /// Top-left corner in the local frame of the current formatting context.
    pub origin: Point,
    /// Set while the float sits in a deferred batch.
    pub pending: bool,
    size: Size,
    containing_width: f64,
}

impl<K> FloatedBox<K> {
    /// Create a float at the local origin with no clearance and no pending flag.
    pub fn new(id: K, side: FloatSide, size: Size, containing_width: f64) -> Self {
        Self {
            id,
            side,
            clear: ClearSides::empty(),
            origin: Point::ORIGIN,
            pending: false,
            size,
            containing_width,
        }
    }

    /// Builder-style setter for the clearance request.
    #[must_use]
    pub fn with_clear(mut self, clear: ClearSides) -> Self {
        self.clear = clear;
        self
    }

    /// Size of the float's margin box.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Width of the float's margin box.
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height of the float's margin box.
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Content width of the containing block.
    pub fn containing_width(&self) -> f64 {
        self.containing_width
    }

    /// Bounds in the local frame of the current formatting context.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Moves the float flush against its side of the containing block.
    pub(crate) fn move_to_edge(&mut self) {
        self.origin.x = match self.side {
            FloatSide::Left => 0.0,
            FloatSide::Right => self.containing_width - self.size.width,
        };
    }

    pub(crate) fn fits_in_containing_block(&self) -> bool {
        self.origin.x >= 0.0 && self.origin.x + self.size.width <= self.containing_width
    }
}

/// Flow state of the formatting context the placer is serving.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowCursor {
    /// Vertical position a newly encountered float starts from.
    pub floating_y: f64,
    /// Offset between the formatting context's local frame and the shared frame.
    ///
    /// Shared-frame coordinates are local coordinates minus this offset.
    pub bfc_offset: Vec2,
}

impl FlowCursor {
    /// Create a cursor at `floating_y` inside a context with the given offset.
    pub const fn new(floating_y: f64, bfc_offset: Vec2) -> Self {
        Self {
            floating_y,
            bfc_offset,
        }
    }
}

/// A box that can be pushed down by clearance.
///
/// Implemented for [`FloatedBox`] and for bare [`Rect`]s, which is enough for
/// block boxes that only need their position adjusted.
pub trait FlowBox {
    /// Bounds in the local frame of the current formatting context.
    fn bounds(&self) -> Rect;

    /// Moves the box so its top-left corner sits at `origin`.
    fn set_origin(&mut self, origin: Point);
}

impl<K> FlowBox for FloatedBox<K> {
    fn bounds(&self) -> Rect {
        Self::bounds(self)
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }
}

impl FlowBox for Rect {
    fn bounds(&self) -> Rect {
        *self
    }

    fn set_origin(&mut self, origin: Point) {
        *self = self.with_origin(origin);
    }
}

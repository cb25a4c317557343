// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_float --heading-base-level=0

//! Understory Float: float placement for block formatting contexts.
//!
//! Understory Float positions boxes that are taken out of normal flow and pushed
//! against the left or right edge of their containing block, the way CSS `float`
//! and `clear` behave. Later content queries it to learn how much room a line
//! has to give up.
//!
//! - Places floats in flow order with [`FloatPlacer::place_float`], keeping
//!   same-side floats from overlapping and keeping floats out of the other side's way.
//! - Pushes boxes below floats with [`FloatPlacer::clear`].
//! - Answers line-avoidance queries with [`FloatPlacer::float_distance`].
//! - Paints floats in a stable order through the [`FloatSurface`] trait.
//!
//! ## Shared frame
//!
//! Each float remembers the formatting-context offset ([`FlowCursor::bfc_offset`])
//! that was current when it was placed. Bounds are compared after subtracting
//! that frozen offset, which lets floats placed from nested formatting contexts
//! interact with each other in a single frame.
//!
//! ## Not a layout engine
//!
//! This crate does not build box trees, resolve styles, break lines, or compute
//! containing-block sizes. The host engine hands in [`FloatedBox`]es with a
//! resolved size and containing width, drives the cursor, and draws the boxes.
//! Each pass rebuilds placement from scratch; there is no incremental relayout.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_float::{ClearSides, FloatPlacer, FloatSide, FloatedBox, FlowCursor};
//!
//! let mut floats = FloatPlacer::new();
//! let cursor = FlowCursor::default();
//!
//! let mut a = FloatedBox::new(1_u32, FloatSide::Left, Size::new(150.0, 50.0), 400.0);
//! let mut b = FloatedBox::new(2_u32, FloatSide::Left, Size::new(100.0, 50.0), 400.0);
//! let mut c = FloatedBox::new(3_u32, FloatSide::Right, Size::new(200.0, 30.0), 400.0);
//! floats.place_float(&cursor, &mut a);
//! floats.place_float(&cursor, &mut b);
//! floats.place_float(&cursor, &mut c);
//!
//! assert_eq!(b.origin, Point::new(150.0, 0.0));
//! // C would overlap B, so it drops below the left floats.
//! assert_eq!(c.origin, Point::new(200.0, 50.0));
//!
//! // A block that clears both sides starts below every float.
//! let mut block = Rect::new(0.0, 0.0, 400.0, 20.0);
//! floats.clear(cursor.bfc_offset, &mut block, ClearSides::BOTH);
//! assert_eq!(block.y0, 80.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod paint;
mod placer;
mod types;
mod util;

pub use paint::FloatSurface;
pub use placer::FloatPlacer;
pub use types::{ClearSides, FloatSide, FloatedBox, FlowBox, FlowCursor};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size, Vec2};

/// Extent substituted for an unset line width or height.
pub(crate) const MIN_LINE_EXTENT: f64 = 10.0;

/// Re-express a local rectangle in the shared frame.
pub(crate) fn to_shared(rect: Rect, offset: Vec2) -> Rect {
    rect - offset
}

/// Strict interior intersection. Empty rectangles never intersect and
/// rectangles that only share an edge do not either.
pub(crate) fn intersects(a: Rect, b: Rect) -> bool {
    if a.width() <= 0.0 || a.height() <= 0.0 || b.width() <= 0.0 || b.height() <= 0.0 {
        return false;
    }
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Line boxes are often unsized until floats have been accounted for, so a
/// zero extent is replaced with [`MIN_LINE_EXTENT`] to keep them testable.
pub(crate) fn line_probe(line: Rect) -> Rect {
    let width = if line.width() == 0.0 {
        MIN_LINE_EXTENT
    } else {
        line.width()
    };
    let height = if line.height() == 0.0 {
        MIN_LINE_EXTENT
    } else {
        line.height()
    };
    Rect::from_origin_size(line.origin(), Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!intersects(a, Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(intersects(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
    }

    #[test]
    fn empty_rects_never_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(a, Rect::new(5.0, 5.0, 5.0, 8.0)));
        assert!(!intersects(Rect::ZERO, a));
    }

    #[test]
    fn probe_fills_unset_extents() {
        let probe = line_probe(Rect::new(4.0, 6.0, 4.0, 6.0));
        assert_eq!(probe, Rect::new(4.0, 6.0, 14.0, 16.0));
        let sized = Rect::new(0.0, 0.0, 200.0, 18.0);
        assert_eq!(line_probe(sized), sized);
    }

    #[test]
    fn shared_frame_undoes_offset() {
        let r = to_shared(Rect::new(0.0, 0.0, 10.0, 10.0), Vec2::new(5.0, -40.0));
        assert_eq!(r, Rect::new(-5.0, 40.0, 5.0, 50.0));
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::Rect;

/// Whether two rectangles share a region of positive area.
///
/// Rectangles that only touch along an edge do not intersect, so a grid row
/// ending exactly where a query starts is not reported.
pub(crate) fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Rows of height `side` starting at `origin` that overlap `top..bottom`,
/// clamped to `0..rows`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Row indices are clamped to `0..rows` before the cast."
)]
pub(crate) fn overlapping_rows(
    top: f64,
    bottom: f64,
    origin: f64,
    side: f64,
    rows: usize,
) -> Range<usize> {
    if rows == 0 || side <= 0.0 || bottom <= top {
        return 0..0;
    }
    let max = rows as f64;
    let first = ((top - origin) / side).floor().clamp(0.0, max);
    let last = ((bottom - origin) / side).ceil().clamp(0.0, max);
    first as usize..last as usize
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{overlapping_rows, rects_intersect};

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!rects_intersect(a, Rect::new(0.0, 100.0, 100.0, 200.0)));
        assert!(rects_intersect(a, Rect::new(99.0, 99.0, 200.0, 200.0)));
    }

    #[test]
    fn rows_are_clamped_to_the_section() {
        assert_eq!(overlapping_rows(0.0, 250.0, 60.0, 100.0, 20), 0..2);
        assert_eq!(overlapping_rows(160.0, 161.0, 60.0, 100.0, 20), 1..2);
        assert_eq!(overlapping_rows(5000.0, 6000.0, 60.0, 100.0, 20), 20..20);
        assert_eq!(overlapping_rows(0.0, 10.0, 60.0, 0.0, 20), 0..0);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky section headers.
//!
//! A header whose section top has scrolled above the viewport rides along
//! with the scroll position ("stuck") until the next section's header would
//! overlap it. From that point it is frozen just above the next section, so
//! the next header appears to push it out while becoming the stuck one.

use crate::{Attribute, DerivedMetrics, Metrics, Viewport};

use super::grid;

/// Vertical position of a sticky header.
///
/// - `natural` is the top of the header's section.
/// - `next` is the top of the following section (or the content end).
/// - `scroll_y` is the viewport origin.
///
/// The header is stuck while `natural < scroll_y < next - header_height`, and
/// frozen at `next - header_height` from that boundary on, inclusive. At the
/// boundary both branches agree, so the result is continuous.
#[must_use]
pub fn sticky_offset(natural: f64, next: f64, header_height: f64, scroll_y: f64) -> f64 {
    if scroll_y <= natural {
        return natural;
    }
    let boundary = next - header_height;
    if scroll_y < boundary {
        scroll_y
    } else {
        boundary.max(natural)
    }
}

/// Places the header of `section`, repositioned for the current scroll offset.
#[must_use]
pub fn place_header(
    section: usize,
    derived: &DerivedMetrics,
    metrics: &Metrics,
    viewport: &Viewport,
    z_index: i32,
) -> Attribute {
    let attribute = grid::place_header(section, derived, metrics, viewport.size.width);
    let natural = attribute.frame.y0;
    let next = derived.offsets.offset_of(section + 1);
    let y = sticky_offset(natural, next, metrics.header_height, viewport.origin.y);

    let mut frame = attribute.frame;
    frame.y0 = y;
    frame.y1 = y + metrics.header_height;
    Attribute { frame, ..attribute }.with_z_index(z_index)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::{place_header, sticky_offset};
    use crate::{DerivedMetrics, HeaderMode, Metrics, SectionShape, Viewport};

    #[test]
    fn stuck_until_pushed_out() {
        // Offsets [0, 260, 520], header 60.
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 0.0), 0.0);
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 120.0), 120.0);
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 199.5), 199.5);
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 200.0), 200.0);
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 230.0), 200.0);
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 260.0), 200.0);
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, 900.0), 200.0);
    }

    #[test]
    fn headers_below_the_viewport_stay_put() {
        assert_eq!(sticky_offset(260.0, 520.0, 60.0, 100.0), 260.0);
        assert_eq!(sticky_offset(260.0, 520.0, 60.0, 260.0), 260.0);
        assert_eq!(sticky_offset(260.0, 520.0, 60.0, 300.0), 300.0);
    }

    #[test]
    fn negative_scroll_keeps_natural_position() {
        assert_eq!(sticky_offset(0.0, 260.0, 60.0, -40.0), 0.0);
    }

    #[test]
    fn placed_header_floats_over_its_section() {
        let metrics = Metrics::grid();
        // 10 items on 500 wide: 2 rows, section height 260.
        let shape = SectionShape::new([10, 10]);
        let derived =
            DerivedMetrics::compute(&metrics, &shape, 500.0, HeaderMode::PerSection).unwrap();
        let viewport = Viewport::new(Point::new(0.0, 150.0), Size::new(500.0, 400.0));

        let header = place_header(0, &derived, &metrics, &viewport, 11);
        assert_eq!(header.frame.y0, 150.0);
        assert_eq!(header.frame.height(), 60.0);
        assert_eq!(header.frame.width(), 500.0);
        assert_eq!(header.z_index, 11);

        let next = place_header(1, &derived, &metrics, &viewport, 11);
        assert_eq!(next.frame.y0, 260.0);
    }
}

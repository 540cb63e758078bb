// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based tests for layout invariants.
//!
//! Each property is checked across arbitrary shapes, metrics and scroll
//! positions:
//! - section offsets never decrease and add up to the content height,
//! - rect queries agree with a full scan and are idempotent,
//! - sticky headers stay within their section,
//! - selecting then deselecting a pass restores the resting stack,
//! - overscroll fans passes out monotonically,
//! - displacement vanishes without scrolling and grows with distance.

use kurbo::{Point, Rect, Size};
use proptest::prelude::*;
use understory_collection_layout::placement::{dynamics, stack, sticky};
use understory_collection_layout::{
    Attribute, CollectionLayout, DerivedMetrics, ElementId, HeaderMode, ItemIndex, Metrics,
    SectionShape, Strategy as Placement, Viewport,
};

// ===== Arbitrary Strategies =====

fn arb_counts() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(prop_oneof![Just(0usize), 1usize..40], 0..10)
}

fn arb_header_mode() -> impl Strategy<Value = HeaderMode> {
    prop_oneof![
        Just(HeaderMode::None),
        Just(HeaderMode::Global),
        Just(HeaderMode::PerSection),
    ]
}

fn arb_grid_metrics() -> impl Strategy<Value = Metrics> {
    (1usize..8, 0.0f64..120.0).prop_map(|(columns, header)| {
        Metrics::grid()
            .with_columns(columns)
            .with_header_height(header)
    })
}

fn sorted_ids(attributes: &[Attribute]) -> Vec<ElementId> {
    let mut ids: Vec<_> = attributes.iter().map(|a| a.id).collect();
    ids.sort();
    ids
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.intersect(b).area() > 0.0
}

// ===== Offsets =====

proptest! {
    #[test]
    fn offsets_are_monotonic_and_sum_to_the_content_height(
        counts in arb_counts(),
        metrics in arb_grid_metrics(),
        mode in arb_header_mode(),
        width in 50.0f64..1200.0,
    ) {
        let shape = SectionShape::new(counts);
        let derived = DerivedMetrics::compute(&metrics, &shape, width, mode).unwrap();
        let offsets = derived.offsets.as_slice();

        prop_assert_eq!(offsets.len(), shape.sections() + 1);
        let leading = if mode == HeaderMode::Global { metrics.header_height } else { 0.0 };
        prop_assert_eq!(offsets[0], leading);
        for pair in offsets.windows(2) {
            prop_assert!(pair[0] <= pair[1], "offsets decreased: {:?}", offsets);
        }

        let sum: f64 = (0..shape.sections()).map(|s| derived.offsets.extent_of(s)).sum();
        prop_assert!((leading + sum - derived.content_height()).abs() < 1e-6);

        for section in 0..shape.sections() {
            if shape.items(section) == 0 {
                prop_assert_eq!(offsets[section], offsets[section + 1]);
            }
        }
    }
}

// ===== Queries =====

proptest! {
    #[test]
    fn rect_queries_match_a_full_scan(
        counts in arb_counts(),
        sticky_headers in any::<bool>(),
        scroll in 0.0f64..3000.0,
        top in -100.0f64..3000.0,
        height in 1.0f64..900.0,
    ) {
        let placement = if sticky_headers {
            Placement::StickyGrid
        } else {
            Placement::Grid(HeaderMode::PerSection)
        };
        let viewport = Viewport::from_size(Size::new(500.0, 600.0));
        let mut layout = CollectionLayout::new(
            placement,
            Metrics::grid(),
            SectionShape::new(counts),
            viewport,
        )
        .unwrap();
        layout.on_bounds_changed(viewport.scrolled_to(scroll)).unwrap();

        let rect = Rect::new(0.0, top, 500.0, top + height);
        let found = layout.attributes_in_rect(rect);
        let scanned: Vec<Attribute> = layout
            .cache()
            .iter()
            .filter(|a| overlaps(a.frame, rect))
            .copied()
            .collect();
        prop_assert_eq!(sorted_ids(&found), sorted_ids(&scanned));

        let again = layout.attributes_in_rect(rect);
        prop_assert_eq!(sorted_ids(&found), sorted_ids(&again));
        for attribute in &found {
            prop_assert_eq!(layout.cache().get(attribute.id), Some(attribute));
        }
    }

    #[test]
    fn sticky_headers_stay_inside_their_section(
        natural in 0.0f64..2000.0,
        extent in 0.0f64..800.0,
        header in 0.0f64..120.0,
        scroll in -500.0f64..3000.0,
    ) {
        let next = natural + extent;
        let y = sticky::sticky_offset(natural, next, header, scroll);
        prop_assert!(y >= natural);
        prop_assert!(y <= (next - header).max(natural));
        if scroll <= natural {
            prop_assert_eq!(y, natural);
        }
        // Repeated evaluation never drifts.
        prop_assert_eq!(y, sticky::sticky_offset(natural, next, header, scroll));
    }
}

// ===== Stack =====

proptest! {
    #[test]
    fn deselecting_restores_the_resting_stack(
        count in 1usize..12,
        pick in any::<prop::sample::Index>(),
        scroll in -300.0f64..900.0,
    ) {
        let viewport = Viewport::new(Point::new(0.0, scroll), Size::new(320.0, 640.0));
        let mut layout = CollectionLayout::new(
            Placement::Stack,
            Metrics::passport(),
            SectionShape::new([count]),
            viewport,
        )
        .unwrap();

        let before = layout.attributes_in_rect(Rect::new(-1e6, -1e6, 1e6, 1e6));
        let selected = ItemIndex::new(0, pick.index(count));
        layout.on_selection_changed(Some(selected));
        let during = layout.attributes_for_item(selected).unwrap();
        prop_assert_eq!(during.frame.height(), Metrics::passport().pass_height);

        layout.on_selection_changed(None);
        for attribute in &before {
            let restored = match attribute.id {
                ElementId::Item(index) => layout.attributes_for_item(index),
                ElementId::Header(section) => layout.attributes_for_header(section),
            };
            prop_assert_eq!(restored, Some(*attribute));
        }
    }

    #[test]
    fn overscroll_fans_out_monotonically(
        pull in 0.0f64..2000.0,
        further in 0.5f64..500.0,
        elasticity in 0.01f64..10.0,
        count in 2usize..10,
    ) {
        let size = Size::new(320.0, 640.0);
        let near = Viewport::new(Point::new(0.0, -pull), size);
        let far = Viewport::new(Point::new(0.0, -pull - further), size);
        prop_assert!(
            stack::extra_separation(&far, elasticity) > stack::extra_separation(&near, elasticity)
        );

        let metrics = Metrics::passport().with_elasticity(elasticity);
        let first = stack::place_item(ItemIndex::new(0, 0), count, None, &metrics, &far);
        prop_assert!(first.frame.height() <= metrics.pass_height);
    }
}

// ===== Dynamics =====

proptest! {
    #[test]
    fn displacement_vanishes_without_scrolling(
        x in 0.0f64..500.0,
        y in 0.0f64..800.0,
    ) {
        let touch = Point::new(250.0, 400.0);
        let size = Size::new(500.0, 800.0);
        prop_assert_eq!(dynamics::displacement(Point::new(x, y), touch, 0.0, size), 0.0);
    }

    #[test]
    fn displacement_grows_with_distance(
        near in 0.0f64..400.0,
        gap in 1.0f64..400.0,
        delta in prop_oneof![-50.0f64..-1.5, 1.5f64..50.0],
    ) {
        let touch = Point::new(250.0, 0.0);
        let size = Size::new(500.0, 800.0);
        let close = dynamics::displacement(Point::new(250.0, near), touch, delta, size);
        let distant = dynamics::displacement(Point::new(250.0, near + gap), touch, delta, size);
        prop_assert!(distant.abs() > close.abs());
        // Always against the scroll.
        prop_assert!(distant * delta < 0.0);
    }
}

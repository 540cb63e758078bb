// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid strategies, step by step.
//!
//! This example walks through the grid placement strategies on the same data:
//! - plain columns, without headers,
//! - a single global header,
//! - per-section headers with cumulative offsets (including an empty section),
//! - sticky headers while scrolling past a section boundary,
//! - spring displacement while dragging.
//!
//! Run:
//! - `cargo run -p understory_collection_demos --example collection_steps`
//! - `RUST_LOG=understory_collection_layout=trace cargo run -p understory_collection_demos --example collection_steps`

use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use understory_collection_layout::{
    Attribute, CollectionLayout, ElementId, HeaderMode, Metrics, SectionShape, Spring,
    SpringSimulator, Strategy, Viewport,
};

/// Prints every spring event instead of simulating anything.
#[derive(Debug, Default)]
struct PrintingSprings {
    attached: usize,
}

impl SpringSimulator for PrintingSprings {
    fn attach(&mut self, _id: ElementId, _spring: Spring) {
        self.attached += 1;
    }

    fn detach(&mut self, id: ElementId) {
        println!("    detach {id:?}");
    }

    fn detach_all(&mut self) {
        println!("    detach all ({} attached so far)", self.attached);
    }

    fn update_item(&mut self, attribute: &Attribute) {
        if let ElementId::Header(_) = attribute.id {
            println!("    header target y0={:.2}", attribute.frame.y0);
        }
    }
}

fn print_visible(layout: &mut CollectionLayout) {
    let bounds = layout.viewport().bounds();
    let mut visible = layout.attributes_in_rect(bounds);
    visible.sort_by_key(|a| a.id);
    println!(
        "  viewport y={} content={:?}, {} visible",
        bounds.y0,
        layout.content_size(),
        visible.len()
    );
    for attribute in visible.iter().filter(|a| matches!(a.id, ElementId::Header(_))) {
        println!(
            "    {:?} frame={:?} z={}",
            attribute.id, attribute.frame, attribute.z_index
        );
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let viewport = Viewport::from_size(Size::new(500.0, 400.0));
    let shape = SectionShape::new([7, 0, 12, 3]);
    tracing::info!(sections = shape.sections(), items = shape.total_items(), "collection steps");

    for (label, strategy) in [
        ("columns", Strategy::Grid(HeaderMode::None)),
        ("global header", Strategy::Grid(HeaderMode::Global)),
        ("section headers", Strategy::Grid(HeaderMode::PerSection)),
    ] {
        println!("{label}");
        let mut layout =
            CollectionLayout::new(strategy, Metrics::grid(), shape.clone(), viewport).unwrap();
        print_visible(&mut layout);
        println!("  offsets {:?}", layout.derived().offsets.as_slice());
    }

    println!("sticky headers");
    let mut layout =
        CollectionLayout::new(Strategy::StickyGrid, Metrics::grid(), shape.clone(), viewport)
            .unwrap();
    for y in [0.0, 120.0, 200.0, 240.0, 300.0] {
        layout.on_bounds_changed(viewport.scrolled_to(y)).unwrap();
        print_visible(&mut layout);
    }

    println!("dynamics");
    let mut layout =
        CollectionLayout::new(Strategy::Dynamics, Metrics::grid(), shape, viewport).unwrap();
    layout.set_spring_simulator(Box::new(PrintingSprings::default()));
    layout.prepare();
    layout.set_touch_point(Some(Point::new(250.0, 200.0)));
    for y in [12.0, 30.0, 30.5] {
        layout.on_bounds_changed(viewport.scrolled_to(y)).unwrap();
    }
    layout.set_touch_point(None);
    layout
        .on_bounds_changed(Viewport::from_size(Size::new(320.0, 400.0)))
        .unwrap();
    print_visible(&mut layout);
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A wallet of passes: resting stack, elastic overscroll and selection.
//!
//! Run:
//! - `cargo run -p understory_collection_demos --example passport_wallet`

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use understory_collection_layout::{
    CollectionLayout, ItemIndex, Metrics, SectionShape, Strategy, Viewport,
};

fn print_stack(layout: &mut CollectionLayout, label: &str) {
    let y = layout.viewport().origin.y;
    let content_height = layout.content_size().height;
    println!("{label} (y={y}, content height {content_height})");
    if let Some(header) = layout.attributes_for_header(0) {
        println!("  header alpha={:.2}", header.alpha);
    }
    for item in 0..layout.shape().items(0) {
        if let Some(pass) = layout.attributes_for_item(ItemIndex::new(0, item)) {
            println!(
                "  pass {item}: y={:>7.1} height={:>6.1} z={}",
                pass.frame.y0,
                pass.frame.height(),
                pass.z_index
            );
        }
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let viewport = Viewport::from_size(Size::new(320.0, 640.0));
    let mut wallet = CollectionLayout::new(
        Strategy::Stack,
        Metrics::passport(),
        SectionShape::new([6]),
        viewport,
    )
    .unwrap();
    tracing::info!(passes = wallet.shape().items(0), "wallet ready");
    print_stack(&mut wallet, "resting");

    wallet.on_bounds_changed(viewport.scrolled_to(-120.0)).unwrap();
    print_stack(&mut wallet, "pulled down");

    wallet.on_bounds_changed(viewport.scrolled_to(150.0)).unwrap();
    print_stack(&mut wallet, "scrolled");

    wallet.on_bounds_changed(viewport).unwrap();
    wallet.on_selection_changed(Some(ItemIndex::new(0, 3)));
    print_stack(&mut wallet, "pass 3 selected");

    wallet.on_selection_changed(None);
    print_stack(&mut wallet, "deselected");
}

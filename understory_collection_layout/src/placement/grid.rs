// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid placement with cumulative section offsets.
//!
//! Items are laid out row-major: item `i` of a section sits in column
//! `i % columns` and row `i / columns`. Rows of a section start below that
//! section's header (if any) at the section's cumulative offset.

use kurbo::{Point, Rect};

use crate::{Attribute, DerivedMetrics, ElementId, HeaderMode, ItemIndex, Metrics, SectionShape};

/// Places a cell.
///
/// The caller is responsible for checking that `index` exists.
#[must_use]
pub fn place_item(index: ItemIndex, derived: &DerivedMetrics, metrics: &Metrics) -> Attribute {
    let side = derived.cell_side();
    let column = derived.column_of(index.item);
    let row = derived.row_of(index.item);
    let header = match derived.header_mode() {
        HeaderMode::PerSection => metrics.header_height,
        HeaderMode::None | HeaderMode::Global => 0.0,
    };

    let origin = Point::new(
        column as f64 * side,
        row as f64 * side + header + derived.offsets.offset_of(index.section),
    );
    Attribute::new(
        ElementId::Item(index),
        Rect::from_origin_size(origin, derived.cell_size),
    )
}

/// Places a header at its natural (non-sticky) position, spanning `width`.
///
/// The global header always sits at the top of the content.
#[must_use]
pub fn place_header(
    section: usize,
    derived: &DerivedMetrics,
    metrics: &Metrics,
    width: f64,
) -> Attribute {
    let y = match derived.header_mode() {
        HeaderMode::Global => 0.0,
        HeaderMode::None | HeaderMode::PerSection => derived.offsets.offset_of(section),
    };
    Attribute::new(
        ElementId::Header(section),
        Rect::new(0.0, y, width, y + metrics.header_height),
    )
}

/// Whether `section` has a header under `mode`.
///
/// Per-section headers exist only for sections with at least one item. The
/// global header exists as section 0 even when there is no data.
#[must_use]
pub fn has_header(mode: HeaderMode, shape: &SectionShape, section: usize) -> bool {
    match mode {
        HeaderMode::None => false,
        HeaderMode::Global => section == 0,
        HeaderMode::PerSection => shape.items(section) > 0,
    }
}

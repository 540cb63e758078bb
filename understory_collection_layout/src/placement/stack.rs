// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wallet-style stack of passes.
//!
//! With nothing selected, passes are spaced `separation` apart below the
//! header and each one sticks to the top of the viewport once scrolled past.
//! Pulling the content past its top edge fans the passes out elastically.
//!
//! With a selection, the selected pass is expanded and centered while every
//! other pass collapses into a band at the bottom of the viewport.

use kurbo::{Rect, Size};

use crate::{Attribute, ElementId, ItemIndex, Metrics, Viewport};

use super::z_index_after;

/// Separation multiplier while the content is pulled past its top edge.
///
/// Returns `1.0` when not overscrolled; otherwise
/// `1 + |origin.y| / height * elasticity`.
#[must_use]
pub fn extra_separation(viewport: &Viewport, elasticity: f64) -> f64 {
    let y = viewport.origin.y;
    let height = viewport.size.height;
    if y >= 0.0 || height <= 0.0 {
        return 1.0;
    }
    1.0 + (y.abs() / height) * elasticity
}

/// Places pass `index` of a stack holding `count` passes.
///
/// Only section 0 is stacked; the caller filters other sections out.
#[must_use]
pub fn place_item(
    index: ItemIndex,
    count: usize,
    selection: Option<ItemIndex>,
    metrics: &Metrics,
    viewport: &Viewport,
) -> Attribute {
    let (offset, height) = match selection {
        Some(selected) => collapsed_span(index, selected, count, metrics, viewport),
        None => resting_span(index, count, metrics, viewport),
    };

    let insets = metrics.insets;
    let frame = Rect::new(
        insets.x0,
        offset,
        viewport.size.width - insets.x1,
        offset + height,
    );
    Attribute::new(ElementId::Item(index), frame).with_z_index(z_index_after(index.item))
}

fn resting_span(index: ItemIndex, count: usize, metrics: &Metrics, viewport: &Viewport) -> (f64, f64) {
    let top = metrics.insets.y0;
    let scroll_y = viewport.origin.y;

    let mut offset = index.item as f64 * metrics.separation + metrics.header_height + top;
    let mut height = metrics.separation + metrics.overlap;

    // Stick to the top of the viewport.
    if offset - top < scroll_y {
        offset = scroll_y + top;
    }

    if scroll_y < 0.0 {
        let extra = extra_separation(viewport, metrics.elasticity);
        if index.item == 0 {
            // Pinned to the pulled edge, stretched to meet the second pass.
            offset += scroll_y;
            height += (metrics.separation + metrics.header_height + top) * extra - offset;
            height = height.min(metrics.pass_height);
        } else {
            offset *= extra;
            height *= extra;
        }
    }

    if index.item + 1 == count {
        height = metrics.pass_height;
    }
    (offset, height)
}

fn collapsed_span(
    index: ItemIndex,
    selected: ItemIndex,
    count: usize,
    metrics: &Metrics,
    viewport: &Viewport,
) -> (f64, f64) {
    let viewport_height = viewport.size.height;
    if index == selected {
        let offset = (viewport_height - metrics.pass_height - metrics.collapse_height) / 2.0;
        return (offset, metrics.pass_height);
    }

    let count = count.max(1) as f64;
    let multiplier = index.item as f64 / count;
    let offset = viewport_height - (1.0 - multiplier) * metrics.collapse_height;
    let height = metrics.collapse_height / count + metrics.overlap;
    (offset, height)
}

/// Opacity of the stack header.
///
/// Hidden while a selection is active. Otherwise fully opaque until the scroll
/// offset passes half the header height, then fading linearly to transparent
/// once the whole header has scrolled under.
#[must_use]
pub fn header_alpha(has_selection: bool, header_height: f64, scroll_y: f64) -> f64 {
    if has_selection {
        return 0.0;
    }
    let half = header_height / 2.0;
    if scroll_y <= half {
        return 1.0;
    }
    if half <= 0.0 {
        return 0.0;
    }
    (1.0 - (scroll_y - half) / half).clamp(0.0, 1.0)
}

/// Places the stack header, pinned at the viewport origin across its width.
#[must_use]
pub fn place_header(has_selection: bool, metrics: &Metrics, viewport: &Viewport) -> Attribute {
    let y = viewport.origin.y;
    let frame = Rect::new(0.0, y, viewport.size.width, y + metrics.header_height);
    Attribute::new(ElementId::Header(0), frame)
        .with_alpha(header_alpha(has_selection, metrics.header_height, y))
}

/// Scrollable content size of a stack of `count` passes.
///
/// While a selection is active nothing scrolls, so the content is exactly
/// the viewport.
#[must_use]
pub fn content_size(count: usize, has_selection: bool, metrics: &Metrics, viewport: &Viewport) -> Size {
    if has_selection {
        return viewport.size;
    }
    let height = metrics.separation * count as f64
        + metrics.header_height
        + metrics.insets.y0
        + metrics.insets.y1;
    Size::new(viewport.size.width, height)
}

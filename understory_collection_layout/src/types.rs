// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: element identities, placement results, and the viewport.

use core::fmt;

use kurbo::{Point, Rect, Size};

/// Identifies an item by section and position within that section.
///
/// Ordering is sections ascending, then items ascending.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex {
    /// Section containing the item.
    pub section: usize,
    /// Position of the item within its section.
    pub item: usize,
}

impl ItemIndex {
    /// Creates an index for `item` in `section`.
    #[inline]
    #[must_use]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// Identity of a laid-out element: a cell or a section header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    /// A cell.
    Item(ItemIndex),
    /// The header of the given section.
    Header(usize),
}

impl ElementId {
    /// Returns the section this element belongs to.
    #[must_use]
    pub const fn section(self) -> usize {
        match self {
            Self::Item(index) => index.section,
            Self::Header(section) => section,
        }
    }
}

impl From<ItemIndex> for ElementId {
    fn from(index: ItemIndex) -> Self {
        Self::Item(index)
    }
}

/// Computed placement of one element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attribute {
    /// Which element this placement belongs to.
    pub id: ElementId,
    /// Frame in content coordinates.
    pub frame: Rect,
    /// Stacking order. Higher is drawn on top.
    pub z_index: i32,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Attribute {
    /// Creates a fully opaque attribute at z-index 0.
    #[must_use]
    pub const fn new(id: ElementId, frame: Rect) -> Self {
        Self {
            id,
            frame,
            z_index: 0,
            alpha: 1.0,
        }
    }

    /// Returns a copy with the given z-index.
    #[must_use]
    pub const fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns a copy with the given alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Center of the frame.
    #[must_use]
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Returns a copy whose frame is moved so its center is `center`.
    #[must_use]
    pub fn with_center(mut self, center: Point) -> Self {
        let size = self.frame.size();
        let origin = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        self.frame = Rect::from_origin_size(origin, size);
        self
    }
}

/// The host's visible region in content coordinates.
///
/// A negative `origin.y` means the content has been pulled past its top edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Scroll position: the content coordinate shown at the top-left corner.
    pub origin: Point,
    /// Visible size.
    pub size: Size,
}

impl Viewport {
    /// Creates a viewport from its origin and size.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a viewport scrolled to the top.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ORIGIN,
            size,
        }
    }

    /// Returns a copy scrolled vertically to `y`.
    #[must_use]
    pub const fn scrolled_to(mut self, y: f64) -> Self {
        self.origin.y = y;
        self
    }

    /// The visible region as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement algorithms.
//!
//! Every function here is pure: given metrics, derived metrics and the
//! viewport it returns a fresh [`Attribute`](crate::Attribute). The
//! [`CollectionLayout`](crate::CollectionLayout) decides which of them to call
//! based on its [`Strategy`] and caches the results.

pub mod dynamics;
pub mod grid;
pub mod stack;
pub mod sticky;

use crate::HeaderMode;

/// Placement strategy, selected when a layout is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Square cells in columns, with the given header arrangement.
    Grid(HeaderMode),
    /// A sectioned grid whose headers stick to the top of the viewport until
    /// the next section's header pushes them out.
    StickyGrid,
    /// A sectioned grid whose elements are displaced against the scroll
    /// direction and handed to a spring simulation.
    Dynamics,
    /// A wallet-style stack of passes in section 0, with elastic overscroll
    /// and selection-driven expansion.
    Stack,
}

impl Strategy {
    /// How headers are arranged under this strategy.
    #[must_use]
    pub const fn header_mode(self) -> HeaderMode {
        match self {
            Self::Grid(mode) => mode,
            Self::StickyGrid | Self::Dynamics => HeaderMode::PerSection,
            Self::Stack => HeaderMode::Global,
        }
    }

    /// Whether placement reads the current selection.
    #[must_use]
    pub const fn uses_selection(self) -> bool {
        matches!(self, Self::Stack)
    }

    /// Z-index of a header whose section holds `item_count` items.
    ///
    /// Sticky and dynamic headers float over their own cells, so they sit one
    /// above the highest item.
    #[must_use]
    pub fn header_z_index(self, item_count: usize) -> i32 {
        match self {
            Self::StickyGrid | Self::Dynamics => z_index_after(item_count),
            Self::Grid(_) | Self::Stack => 0,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Grid(HeaderMode::PerSection)
    }
}

/// `position + 1` as a z-index, saturating at `i32::MAX`.
pub(crate) fn z_index_after(position: usize) -> i32 {
    i32::try_from(position.saturating_add(1)).unwrap_or(i32::MAX)
}

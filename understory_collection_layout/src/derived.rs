// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precomputed cell size and cumulative section offsets.

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use kurbo::Size;

use crate::{ConfigurationError, Metrics, SectionShape};

/// Where headers sit relative to the sections of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// No headers at all.
    None,
    /// A single header above every section, identified as section 0.
    Global,
    /// One header at the top of each non-empty section.
    #[default]
    PerSection,
}

/// Cumulative vertical offsets of each section, backed by a prefix sum.
///
/// `starts` holds `sections + 1` values: `starts[s]` is the top of section `s`
/// and the last value is the total content height. Values never decrease.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionOffsets {
    extents: Vec<f64>,
    starts: Vec<f64>,
}

impl SectionOffsets {
    /// Builds offsets from a leading extent and per-section extents.
    ///
    /// Negative or non-finite extents are treated as zero.
    #[must_use]
    pub fn from_extents(leading: f64, extents: impl IntoIterator<Item = f64>) -> Self {
        let extents: Vec<f64> = extents
            .into_iter()
            .map(|extent| {
                debug_assert!(
                    extent.is_finite(),
                    "section extents must be finite; got {extent:?}"
                );
                if extent.is_finite() && extent > 0.0 {
                    extent
                } else {
                    0.0
                }
            })
            .collect();

        let mut starts = Vec::with_capacity(extents.len() + 1);
        let mut pos = leading.max(0.0);
        starts.push(pos);
        for extent in &extents {
            pos += extent;
            starts.push(pos);
        }

        Self { extents, starts }
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Returns `true` if there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Top of `section`. Indices past the end resolve to the total height.
    #[must_use]
    pub fn offset_of(&self, section: usize) -> f64 {
        let i = section.min(self.extents.len());
        self.starts.get(i).copied().unwrap_or(0.0)
    }

    /// Height of `section`, or `0.0` if it does not exist.
    #[must_use]
    pub fn extent_of(&self, section: usize) -> f64 {
        self.extents.get(section).copied().unwrap_or(0.0)
    }

    /// Total content height.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.starts.last().copied().unwrap_or(0.0)
    }

    /// All offsets, `sections + 1` long.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.starts
    }

    /// Returns the section whose span contains `offset`.
    ///
    /// Offsets before the first section resolve to `0`, offsets past the end
    /// resolve to the last section. Zero-height sections are skipped in favour
    /// of the last section starting at or before `offset`.
    #[must_use]
    pub fn section_at_offset(&self, offset: f64) -> usize {
        let len = self.extents.len();
        if len == 0 {
            return 0;
        }
        let slice = &self.starts[..len];
        match slice.binary_search_by(|pos| {
            pos.partial_cmp(&offset)
                .unwrap_or(core::cmp::Ordering::Equal)
        }) {
            // Several sections may share a start when some are empty.
            Ok(mut i) => {
                while i + 1 < len && slice[i + 1] <= offset {
                    i += 1;
                }
                i
            }
            Err(i) => i.saturating_sub(1),
        }
    }
}

/// Geometry derived from [`Metrics`], a [`SectionShape`] and the viewport width.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedMetrics {
    /// Uniform (square) cell size.
    pub cell_size: Size,
    /// Cumulative section offsets.
    pub offsets: SectionOffsets,
    columns: NonZeroUsize,
    header_mode: HeaderMode,
}

impl DerivedMetrics {
    /// Computes cell size and cumulative offsets.
    ///
    /// - The cell side is `floor(viewport_width / columns)`.
    /// - A section with `n > 0` items spans `ceil(n / columns)` rows, plus the
    ///   header height under [`HeaderMode::PerSection`].
    /// - Empty sections contribute nothing, not even a header.
    /// - Under [`HeaderMode::Global`] the first section starts below the header.
    pub fn compute(
        metrics: &Metrics,
        shape: &SectionShape,
        viewport_width: f64,
        header_mode: HeaderMode,
    ) -> Result<Self, ConfigurationError> {
        metrics.validate()?;
        let columns = NonZeroUsize::new(metrics.columns).ok_or(ConfigurationError::ZeroColumns)?;
        if !(viewport_width.is_finite() && viewport_width > 0.0) {
            return Err(ConfigurationError::NonPositiveViewportWidth {
                width: viewport_width,
            });
        }

        let side = (viewport_width / columns.get() as f64).floor();
        let header = metrics.header_height;
        let section_header = match header_mode {
            HeaderMode::PerSection => header,
            HeaderMode::None | HeaderMode::Global => 0.0,
        };
        let leading = match header_mode {
            HeaderMode::Global => header,
            HeaderMode::None | HeaderMode::PerSection => 0.0,
        };

        let extents = shape.counts().iter().map(|&count| {
            if count == 0 {
                0.0
            } else {
                let rows = count.div_ceil(columns.get());
                rows as f64 * side + section_header
            }
        });

        Ok(Self {
            cell_size: Size::new(side, side),
            offsets: SectionOffsets::from_extents(leading, extents),
            columns,
            header_mode,
        })
    }

    /// Number of columns the cell size was derived from.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Header placement these offsets account for.
    #[must_use]
    pub const fn header_mode(&self) -> HeaderMode {
        self.header_mode
    }

    /// Side length of a cell.
    #[must_use]
    pub fn cell_side(&self) -> f64 {
        self.cell_size.width
    }

    /// Row containing `item` within its section.
    #[must_use]
    pub const fn row_of(&self, item: usize) -> usize {
        item / self.columns.get()
    }

    /// Column containing `item` within its row.
    #[must_use]
    pub const fn column_of(&self, item: usize) -> usize {
        item % self.columns.get()
    }

    /// Total content height.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.offsets.total()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable layout metrics.

use kurbo::Insets;

use crate::ConfigurationError;

/// Configuration shared by every placement strategy.
///
/// Metrics are immutable for the duration of a layout pass. Installing a new
/// value through [`CollectionLayout::on_metrics_changed`] drops all cached
/// attributes and recomputes the [`DerivedMetrics`].
///
/// Grid strategies read `columns` and `header_height`; the stack strategy reads
/// everything except `columns`.
///
/// [`CollectionLayout::on_metrics_changed`]: crate::CollectionLayout::on_metrics_changed
/// [`DerivedMetrics`]: crate::DerivedMetrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Number of grid columns. Must be non-zero.
    pub columns: usize,
    /// Height of a section (or global) header.
    pub header_height: f64,
    /// Insets applied to the drawing area of stacked passes.
    pub insets: Insets,
    /// Vertical distance between consecutive passes at rest.
    pub separation: f64,
    /// Extra height rendered below each pass so rounded corners overlap.
    pub overlap: f64,
    /// Full height of an expanded pass.
    pub pass_height: f64,
    /// Strength of the overscroll fan-out. `0.0` is inelastic, `1.0` is
    /// elastic, larger values exaggerate.
    pub elasticity: f64,
    /// Height of the band that collapsed passes share while one is selected.
    pub collapse_height: f64,
}

impl Metrics {
    /// Metrics for the sectioned grid: five columns and 60pt headers.
    #[must_use]
    pub const fn grid() -> Self {
        Self {
            columns: 5,
            header_height: 60.0,
            insets: Insets::ZERO,
            separation: 0.0,
            overlap: 0.0,
            pass_height: 0.0,
            elasticity: 0.0,
            collapse_height: 0.0,
        }
    }

    /// Metrics for the passport wallet stack.
    #[must_use]
    pub const fn passport() -> Self {
        Self {
            columns: 1,
            header_height: 72.0,
            insets: Insets::uniform(8.0),
            separation: 72.0,
            overlap: 8.0,
            pass_height: 480.0,
            elasticity: 1.0,
            collapse_height: 96.0,
        }
    }

    /// Returns a copy with `columns` replaced.
    #[must_use]
    pub const fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Returns a copy with `header_height` replaced.
    #[must_use]
    pub const fn with_header_height(mut self, header_height: f64) -> Self {
        self.header_height = header_height;
        self
    }

    /// Returns a copy with `insets` replaced.
    #[must_use]
    pub const fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Returns a copy with `separation` replaced.
    #[must_use]
    pub const fn with_separation(mut self, separation: f64) -> Self {
        self.separation = separation;
        self
    }

    /// Returns a copy with `overlap` replaced.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Returns a copy with `pass_height` replaced.
    #[must_use]
    pub const fn with_pass_height(mut self, pass_height: f64) -> Self {
        self.pass_height = pass_height;
        self
    }

    /// Returns a copy with `elasticity` replaced.
    #[must_use]
    pub const fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Returns a copy with `collapse_height` replaced.
    #[must_use]
    pub const fn with_collapse_height(mut self, collapse_height: f64) -> Self {
        self.collapse_height = collapse_height;
        self
    }

    /// Checks that these metrics can produce finite geometry.
    ///
    /// `columns` must be non-zero; heights, elasticity and the collapse band
    /// must be finite and non-negative. Separation, overlap and insets only
    /// need to be finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.columns == 0 {
            return Err(ConfigurationError::ZeroColumns);
        }
        let non_negative = [
            ("header_height", self.header_height),
            ("pass_height", self.pass_height),
            ("elasticity", self.elasticity),
            ("collapse_height", self.collapse_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteMetric { name });
            }
            if value < 0.0 {
                return Err(ConfigurationError::NegativeMetric { name, value });
            }
        }
        let finite = [
            ("separation", self.separation),
            ("overlap", self.overlap),
            ("insets.x0", self.insets.x0),
            ("insets.y0", self.insets.y0),
            ("insets.x1", self.insets.x1),
            ("insets.y1", self.insets.y1),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteMetric { name });
            }
        }
        Ok(())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::grid()
    }
}

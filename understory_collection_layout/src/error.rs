// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use thiserror::Error;

/// A layout configuration that cannot produce finite geometry.
///
/// These are raised when metrics or a viewport are installed, never during a
/// query: once a [`CollectionLayout`](crate::CollectionLayout) exists, every
/// query returns either an attribute or `None`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    /// The grid was configured with zero columns.
    #[error("column count must be greater than zero")]
    ZeroColumns,
    /// The viewport width is zero, negative or not finite.
    #[error("viewport width must be positive, got {width}")]
    NonPositiveViewportWidth {
        /// Width that was supplied.
        width: f64,
    },
    /// The viewport height is zero, negative or not finite, and the strategy
    /// divides by it.
    #[error("viewport height must be positive, got {height}")]
    NonPositiveViewportHeight {
        /// Height that was supplied.
        height: f64,
    },
    /// A metric that must be non-negative was negative.
    #[error("metric `{name}` must be non-negative, got {value}")]
    NegativeMetric {
        /// Name of the offending field.
        name: &'static str,
        /// Value that was supplied.
        value: f64,
    },
    /// A metric was NaN or infinite.
    #[error("metric `{name}` must be finite")]
    NonFiniteMetric {
        /// Name of the offending field.
        name: &'static str,
    },
}

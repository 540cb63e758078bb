// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven displacement targets for spring-attached elements.
//!
//! While the user drags, each element is pushed against the scroll direction
//! by an amount that grows quadratically with its distance from the touch
//! point, so elements under the finger follow it and far ones lag behind. The displaced attribute is handed to a [`SpringSimulator`], which
//! animates it back towards its anchor. The simulation itself lives outside
//! this crate.

use core::fmt::Debug;

use kurbo::{Point, Size};

use crate::{Attribute, ElementId};

/// Scale applied to the squared normalized distance.
pub const DISPLACEMENT_SCALE: f64 = 0.18;

/// Scroll deltas at or below this magnitude are ignored.
pub const MIN_SCROLL_DELTA: f64 = 1.0;

/// Damping of the springs attached to cells.
pub const CELL_SPRING_DAMPING: f64 = 0.40;

/// Damping of the springs attached to headers. Headers use weaker springs.
pub const HEADER_SPRING_DAMPING: f64 = 0.20;

/// Parameters of the spring attaching an element to its resting center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spring {
    /// Resting center of the element.
    pub anchor: Point,
    /// Damping ratio.
    pub damping: f64,
    /// Rest length.
    pub length: f64,
    /// Oscillation frequency in Hz.
    pub frequency: f64,
}

impl Spring {
    /// The spring used for a freshly placed attribute.
    #[must_use]
    pub fn for_attribute(attribute: &Attribute) -> Self {
        let damping = match attribute.id {
            ElementId::Item(_) => CELL_SPRING_DAMPING,
            ElementId::Header(_) => HEADER_SPRING_DAMPING,
        };
        Self {
            anchor: attribute.center(),
            damping,
            length: 0.0,
            frequency: 1.0,
        }
    }
}

/// An external spring simulation driven by the layout.
///
/// The layout attaches a spring whenever it places an element, detaches it
/// when the element's cached attribute is evicted, and pushes displaced
/// attributes while the user scrolls. The simulator reports animated
/// positions back through
/// [`CollectionLayout::apply_simulated_center`](crate::CollectionLayout::apply_simulated_center).
pub trait SpringSimulator: Debug {
    /// Attaches `spring` to element `id`.
    fn attach(&mut self, id: ElementId, spring: Spring);

    /// Detaches the spring of element `id`, if any.
    fn detach(&mut self, id: ElementId);

    /// Detaches every spring.
    fn detach_all(&mut self);

    /// Moves the simulated element to the state described by `attribute`.
    fn update_item(&mut self, attribute: &Attribute);
}

/// Whether a scroll delta is large enough to displace anything.
#[must_use]
pub fn is_significant(scroll_delta: f64) -> bool {
    scroll_delta.abs() > MIN_SCROLL_DELTA
}

/// Distance from `touch` to `center`, normalized by the viewport's shorter side.
#[must_use]
pub fn normalized_distance(center: Point, touch: Point, viewport: Size) -> f64 {
    let shortest = viewport.width.min(viewport.height);
    if shortest <= 0.0 {
        return 0.0;
    }
    (touch - center).hypot() / shortest
}

/// Vertical displacement of an element centered at `center`.
///
/// Equals `scroll_delta * -(distance² * DISPLACEMENT_SCALE)`: zero when not
/// scrolling and growing in magnitude the farther the element is from the
/// touch point.
#[must_use]
pub fn displacement(center: Point, touch: Point, scroll_delta: f64, viewport: Size) -> f64 {
    let distance = normalized_distance(center, touch, viewport);
    let multiplier = -(distance * distance) * DISPLACEMENT_SCALE;
    scroll_delta * multiplier
}

/// Returns `attribute` with its center moved vertically by [`displacement`].
#[must_use]
pub fn displace(attribute: &Attribute, touch: Point, scroll_delta: f64, viewport: Size) -> Attribute {
    let mut center = attribute.center();
    center.y += displacement(center, touch, scroll_delta, viewport);
    attribute.with_center(center)
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing layout controller.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::invalidation::{self, InvalidationContext, InvalidationFlags};
use crate::placement::dynamics::{self, Spring, SpringSimulator};
use crate::placement::{Strategy, grid, stack, sticky};
use crate::util::{overlapping_rows, rects_intersect};
use crate::{
    Attribute, AttributeCache, ConfigurationError, DataSource, DerivedMetrics, ElementId,
    HeaderMode, ItemIndex, Metrics, SectionShape, Viewport,
};

/// Number of attributes placed by a [`CollectionLayout::prepare`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Cells placed.
    pub items: usize,
    /// Headers placed.
    pub headers: usize,
}

impl PrepareReport {
    /// Returns `true` if nothing needed placing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items == 0 && self.headers == 0
    }
}

/// Layout controller for a sectioned collection.
///
/// This type:
/// - owns the [`Metrics`], a snapshot of the [`SectionShape`], the viewport
///   and the selection,
/// - keeps [`DerivedMetrics`] in sync with them,
/// - caches one [`Attribute`] per element and evicts entries through explicit
///   [`InvalidationContext`]s,
/// - places every missing element synchronously before answering a query, so
///   queries never observe an evicted entry.
///
/// It does *not* render, recycle views or run animations; the host feeds it
/// changes through the `on_*` triggers and reads placements back.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use understory_collection_layout::{
///     CollectionLayout, HeaderMode, ItemIndex, Metrics, SectionShape, Strategy, Viewport,
/// };
///
/// let mut layout = CollectionLayout::new(
///     Strategy::Grid(HeaderMode::None),
///     Metrics::grid(),
///     SectionShape::new([100]),
///     Viewport::from_size(Size::new(500.0, 800.0)),
/// )
/// .unwrap();
///
/// let cell = layout.attributes_for_item(ItemIndex::new(0, 23)).unwrap();
/// assert_eq!(cell.frame, Rect::new(300.0, 400.0, 400.0, 500.0));
/// assert_eq!(layout.content_size(), Size::new(500.0, 2000.0));
/// ```
#[derive(Debug)]
pub struct CollectionLayout {
    strategy: Strategy,
    metrics: Metrics,
    shape: SectionShape,
    viewport: Viewport,
    selection: Option<ItemIndex>,
    touch: Option<Point>,

    derived: DerivedMetrics,
    cache: AttributeCache,
    content_size: Option<Size>,
    needs_prepare: bool,

    springs: Option<Box<dyn SpringSimulator>>,
}

impl CollectionLayout {
    /// Creates a layout.
    ///
    /// Fails if the metrics are invalid, the viewport width is not positive,
    /// or the viewport height is not positive for a strategy that divides by
    /// it ([`Strategy::Stack`], [`Strategy::Dynamics`]).
    pub fn new(
        strategy: Strategy,
        metrics: Metrics,
        shape: SectionShape,
        viewport: Viewport,
    ) -> Result<Self, ConfigurationError> {
        validate_viewport(strategy, &viewport)?;
        let derived = DerivedMetrics::compute(
            &metrics,
            &shape,
            viewport.size.width,
            strategy.header_mode(),
        )?;
        tracing::debug!(
            ?strategy,
            sections = shape.sections(),
            content_height = derived.content_height(),
            "created collection layout"
        );
        Ok(Self {
            strategy,
            metrics,
            shape,
            viewport,
            selection: None,
            touch: None,
            derived,
            cache: AttributeCache::new(),
            content_size: None,
            needs_prepare: true,
            springs: None,
        })
    }

    /// Creates a layout from the counts currently reported by `source`.
    pub fn from_source(
        strategy: Strategy,
        metrics: Metrics,
        source: &(impl DataSource + ?Sized),
        viewport: Viewport,
    ) -> Result<Self, ConfigurationError> {
        Self::new(strategy, metrics, SectionShape::from_source(source), viewport)
    }

    /// Placement strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Current metrics.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Current derived metrics.
    #[must_use]
    pub const fn derived(&self) -> &DerivedMetrics {
        &self.derived
    }

    /// Current section shape snapshot.
    #[must_use]
    pub const fn shape(&self) -> &SectionShape {
        &self.shape
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> Option<ItemIndex> {
        self.selection
    }

    /// Read-only view of the attribute cache.
    ///
    /// The cache may be missing entries until the next query or
    /// [`prepare`](Self::prepare).
    #[must_use]
    pub const fn cache(&self) -> &AttributeCache {
        &self.cache
    }

    // --- Queries -------------------------------------------------------------

    /// Placement of a cell, or `None` if `index` is outside the current shape
    /// (or outside section 0 for [`Strategy::Stack`]).
    pub fn attributes_for_item(&mut self, index: ItemIndex) -> Option<Attribute> {
        self.ensure_prepared();
        self.cache.item(index).copied()
    }

    /// Placement of a section header, or `None` if that section has no header.
    pub fn attributes_for_header(&mut self, section: usize) -> Option<Attribute> {
        self.ensure_prepared();
        self.cache.header(section).copied()
    }

    /// Every cell and header whose frame intersects `rect`, in no particular order.
    pub fn attributes_in_rect(&mut self, rect: Rect) -> Vec<Attribute> {
        self.ensure_prepared();
        match self.strategy {
            Strategy::Grid(_) | Strategy::StickyGrid => self.grid_attributes_in_rect(rect),
            Strategy::Dynamics | Strategy::Stack => self
                .cache
                .iter()
                .filter(|attribute| rects_intersect(attribute.frame, rect))
                .copied()
                .collect(),
        }
    }

    /// Scrollable content size.
    pub fn content_size(&mut self) -> Size {
        if let Some(size) = self.content_size {
            return size;
        }
        let size = match self.strategy {
            Strategy::Stack => stack::content_size(
                self.shape.items(0),
                self.selection.is_some(),
                &self.metrics,
                &self.viewport,
            ),
            Strategy::Grid(_) | Strategy::StickyGrid | Strategy::Dynamics => {
                Size::new(self.viewport.size.width, self.derived.content_height())
            }
        };
        self.content_size = Some(size);
        size
    }

    /// Places every element that has no cached attribute.
    ///
    /// Queries call this implicitly; hosts may call it ahead of time to warm
    /// the cache.
    pub fn prepare(&mut self) -> PrepareReport {
        let mut report = PrepareReport::default();
        let sections = match self.strategy {
            Strategy::Stack => self.shape.sections().min(1),
            _ => self.shape.sections(),
        };

        for section in 0..sections {
            for item in 0..self.shape.items(section) {
                let id = ElementId::Item(ItemIndex::new(section, item));
                if !self.cache.contains(id) && self.place_and_store(id) {
                    report.items += 1;
                }
            }
        }
        let header_sections = match self.strategy.header_mode() {
            HeaderMode::None => 0,
            HeaderMode::Global => 1,
            HeaderMode::PerSection => sections,
        };
        for section in 0..header_sections {
            let id = ElementId::Header(section);
            if !self.cache.contains(id) && self.place_and_store(id) {
                report.headers += 1;
            }
        }

        self.needs_prepare = false;
        if !report.is_empty() {
            tracing::trace!(
                items = report.items,
                headers = report.headers,
                "placed missing attributes"
            );
        }
        report
    }

    // --- Triggers ------------------------------------------------------------

    /// Installs new metrics and drops every cached attribute.
    ///
    /// Invalid metrics are rejected and leave the layout unchanged.
    pub fn on_metrics_changed(
        &mut self,
        metrics: Metrics,
    ) -> Result<InvalidationContext, ConfigurationError> {
        let derived = DerivedMetrics::compute(
            &metrics,
            &self.shape,
            self.viewport.size.width,
            self.strategy.header_mode(),
        )?;
        tracing::debug!(?metrics, "metrics changed");
        self.metrics = metrics;
        self.derived = derived;

        let context = invalidation::for_metrics_change();
        self.evict(&context);
        Ok(context)
    }

    /// Whether a change of bounds to `new` requires invalidation.
    ///
    /// Every strategy here depends on the scroll position or width, so this
    /// is always `true`.
    #[must_use]
    pub fn should_invalidate_for_bounds_change(&self, _new: &Viewport) -> bool {
        true
    }

    /// Moves or resizes the viewport.
    ///
    /// Under [`Strategy::Dynamics`], if a touch is active, a spring simulator
    /// is installed and the vertical scroll delta exceeds
    /// [`MIN_SCROLL_DELTA`](dynamics::MIN_SCROLL_DELTA), every cached element
    /// is displaced against the scroll and handed to the simulator.
    pub fn on_bounds_changed(
        &mut self,
        new: Viewport,
    ) -> Result<InvalidationContext, ConfigurationError> {
        validate_viewport(self.strategy, &new)?;
        let old = self.viewport;
        let context = invalidation::for_bounds_change(self.strategy, &self.cache, &old, &new);

        if context.flags().contains(InvalidationFlags::DERIVED) {
            self.derived = DerivedMetrics::compute(
                &self.metrics,
                &self.shape,
                new.size.width,
                self.strategy.header_mode(),
            )?;
        }
        if self.strategy == Strategy::Dynamics && !context.invalidates_everything() {
            self.displace_cached(old.origin.y - new.origin.y, new.size);
        }

        self.viewport = new;
        self.evict(&context);
        Ok(context)
    }

    /// Sets or clears the selection.
    ///
    /// For [`Strategy::Stack`] this drops every cached attribute and the
    /// content size. Other strategies ignore the selection for placement and
    /// return an empty context.
    pub fn on_selection_changed(&mut self, selection: Option<ItemIndex>) -> InvalidationContext {
        self.selection = selection;
        if !self.strategy.uses_selection() {
            return InvalidationContext::new();
        }
        tracing::debug!(?selection, "selection changed");
        let context = invalidation::for_selection_change();
        self.evict(&context);
        context
    }

    /// Replaces the section shape after a structural data change.
    ///
    /// A selection that no longer addresses an item is cleared.
    pub fn on_data_changed(
        &mut self,
        shape: SectionShape,
    ) -> Result<InvalidationContext, ConfigurationError> {
        let derived = DerivedMetrics::compute(
            &self.metrics,
            &shape,
            self.viewport.size.width,
            self.strategy.header_mode(),
        )?;
        tracing::debug!(
            sections = shape.sections(),
            items = shape.total_items(),
            "section shape changed"
        );
        self.shape = shape;
        self.derived = derived;
        if let Some(selected) = self.selection
            && !self.shape.contains(selected)
        {
            tracing::debug!(%selected, "dropping selection outside the new shape");
            self.selection = None;
        }

        let context = InvalidationContext::everything();
        self.evict(&context);
        Ok(context)
    }

    /// Evicts the given cells so they are placed again on the next query.
    pub fn reload_items(
        &mut self,
        items: impl IntoIterator<Item = ItemIndex>,
    ) -> InvalidationContext {
        let context = invalidation::for_items(items);
        self.evict(&context);
        context
    }

    /// Applies an arbitrary invalidation context.
    ///
    /// [`InvalidationFlags::DERIVED`] recomputes derived metrics from the
    /// current state before anything is evicted.
    pub fn invalidate(&mut self, context: &InvalidationContext) -> Result<(), ConfigurationError> {
        if context.flags().contains(InvalidationFlags::DERIVED) {
            self.derived = DerivedMetrics::compute(
                &self.metrics,
                &self.shape,
                self.viewport.size.width,
                self.strategy.header_mode(),
            )?;
        }
        self.evict(context);
        Ok(())
    }

    // --- Dynamics --------------------------------------------------------------

    /// Sets the current touch location in content coordinates, or `None` when
    /// no pointer is down.
    pub fn set_touch_point(&mut self, touch: Option<Point>) {
        self.touch = touch;
    }

    /// Installs a spring simulator, attaching springs to every cached element.
    ///
    /// Springs are only managed under [`Strategy::Dynamics`].
    pub fn set_spring_simulator(&mut self, mut simulator: Box<dyn SpringSimulator>) {
        if self.strategy == Strategy::Dynamics {
            for attribute in self.cache.iter() {
                simulator.attach(attribute.id, Spring::for_attribute(attribute));
            }
        }
        self.springs = Some(simulator);
    }

    /// Removes and returns the spring simulator.
    pub fn take_spring_simulator(&mut self) -> Option<Box<dyn SpringSimulator>> {
        self.springs.take()
    }

    /// Writes an animated center reported by the simulator into the cache.
    ///
    /// Returns `false` if `id` has no cached attribute.
    pub fn apply_simulated_center(&mut self, id: ElementId, center: Point) -> bool {
        match self.cache.get_mut(id) {
            Some(attribute) => {
                *attribute = attribute.with_center(center);
                true
            }
            None => false,
        }
    }

    // --- Internals -------------------------------------------------------------

    fn ensure_prepared(&mut self) {
        if self.needs_prepare {
            self.prepare();
        }
    }

    fn place(&self, id: ElementId) -> Option<Attribute> {
        match id {
            ElementId::Item(index) => {
                if !self.shape.contains(index) {
                    return None;
                }
                match self.strategy {
                    Strategy::Stack => (index.section == 0).then(|| {
                        stack::place_item(
                            index,
                            self.shape.items(0),
                            self.selection,
                            &self.metrics,
                            &self.viewport,
                        )
                    }),
                    Strategy::Grid(_) | Strategy::StickyGrid | Strategy::Dynamics => {
                        Some(grid::place_item(index, &self.derived, &self.metrics))
                    }
                }
            }
            ElementId::Header(section) => {
                if !grid::has_header(self.strategy.header_mode(), &self.shape, section) {
                    return None;
                }
                let z_index = self.strategy.header_z_index(self.shape.items(section));
                let attribute = match self.strategy {
                    Strategy::Stack => {
                        stack::place_header(self.selection.is_some(), &self.metrics, &self.viewport)
                    }
                    Strategy::StickyGrid => sticky::place_header(
                        section,
                        &self.derived,
                        &self.metrics,
                        &self.viewport,
                        z_index,
                    ),
                    Strategy::Grid(_) | Strategy::Dynamics => grid::place_header(
                        section,
                        &self.derived,
                        &self.metrics,
                        self.viewport.size.width,
                    )
                    .with_z_index(z_index),
                };
                Some(attribute)
            }
        }
    }

    fn place_and_store(&mut self, id: ElementId) -> bool {
        let Some(attribute) = self.place(id) else {
            return false;
        };
        if self.strategy == Strategy::Dynamics
            && let Some(springs) = self.springs.as_mut()
        {
            springs.attach(id, Spring::for_attribute(&attribute));
        }
        self.cache.insert(attribute);
        true
    }

    fn evict(&mut self, context: &InvalidationContext) {
        let evicted = context.apply(&mut self.cache);
        if context.invalidates_everything() {
            tracing::debug!(evicted = evicted.len(), "invalidated every attribute");
        } else if !evicted.is_empty() {
            tracing::trace!(evicted = evicted.len(), "invalidated attributes");
        }

        if self.strategy == Strategy::Dynamics
            && let Some(springs) = self.springs.as_mut()
        {
            if context.invalidates_everything() {
                springs.detach_all();
            } else {
                for &id in &evicted {
                    springs.detach(id);
                }
            }
        }
        if context.flags().contains(InvalidationFlags::CONTENT_SIZE) {
            self.content_size = None;
        }
        if context.invalidates_everything() || !evicted.is_empty() {
            self.needs_prepare = true;
        }
    }

    fn displace_cached(&mut self, scroll_delta: f64, viewport_size: Size) {
        let Some(touch) = self.touch else {
            return;
        };
        if !dynamics::is_significant(scroll_delta) {
            return;
        }
        let Some(springs) = self.springs.as_mut() else {
            return;
        };

        let displaced: Vec<Attribute> = self
            .cache
            .iter()
            .map(|attribute| dynamics::displace(attribute, touch, scroll_delta, viewport_size))
            .collect();
        tracing::trace!(
            count = displaced.len(),
            scroll_delta,
            "displacing attributes"
        );
        for attribute in displaced {
            springs.update_item(&attribute);
            self.cache.insert(attribute);
        }
    }

    fn grid_attributes_in_rect(&self, rect: Rect) -> Vec<Attribute> {
        let mut out = Vec::new();
        let offsets = &self.derived.offsets;
        let columns = self.derived.columns();
        let side = self.derived.cell_side();
        let section_header = match self.derived.header_mode() {
            HeaderMode::PerSection => self.metrics.header_height,
            HeaderMode::None | HeaderMode::Global => 0.0,
        };

        let mut section = offsets.section_at_offset(rect.y0);
        while section < offsets.len() && offsets.offset_of(section) < rect.y1 {
            let count = self.shape.items(section);
            let rows = count.div_ceil(columns);
            let origin = offsets.offset_of(section) + section_header;
            for row in overlapping_rows(rect.y0, rect.y1, origin, side, rows) {
                for column in 0..columns {
                    let item = row * columns + column;
                    if item >= count {
                        break;
                    }
                    if let Some(attribute) = self.cache.item(ItemIndex::new(section, item))
                        && rects_intersect(attribute.frame, rect)
                    {
                        out.push(*attribute);
                    }
                }
            }
            section += 1;
        }

        // Sticky headers can sit anywhere, and there are few of them.
        out.extend(
            self.cache
                .headers()
                .filter(|attribute| rects_intersect(attribute.frame, rect))
                .copied(),
        );
        out
    }
}

fn validate_viewport(strategy: Strategy, viewport: &Viewport) -> Result<(), ConfigurationError> {
    let Size { width, height } = viewport.size;
    if !(width.is_finite() && width > 0.0) {
        return Err(ConfigurationError::NonPositiveViewportWidth { width });
    }
    let divides_by_height = matches!(strategy, Strategy::Stack | Strategy::Dynamics);
    if divides_by_height && !(height.is_finite() && height > 0.0) {
        return Err(ConfigurationError::NonPositiveViewportHeight { height });
    }
    Ok(())
}

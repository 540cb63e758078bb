// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit invalidation contexts and the rules that produce them.
//!
//! Every change the host reports is turned into an [`InvalidationContext`]
//! before anything is evicted. The context lists exactly which cached entries
//! go away and whether derived metrics or the content size must be recomputed,
//! so the recompute trigger is visible wherever a context is built or applied.

use smallvec::SmallVec;

use crate::{AttributeCache, ElementId, ItemIndex, Strategy, Viewport};

bitflags::bitflags! {
    /// Coarse invalidation flags carried by an [`InvalidationContext`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InvalidationFlags: u8 {
        /// Drop every cached attribute.
        const EVERYTHING   = 0b0000_0001;
        /// Recompute cell size and section offsets before the next pass.
        const DERIVED      = 0b0000_0010;
        /// The content size may have changed.
        const CONTENT_SIZE = 0b0000_0100;
        /// The context was produced by a scroll or resize.
        const BOUNDS       = 0b0000_1000;
    }
}

/// Describes which cached attributes are stale.
///
/// Contexts are plain values: build one, inspect it, then hand it to
/// [`CollectionLayout::invalidate`](crate::CollectionLayout::invalidate).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvalidationContext {
    flags: InvalidationFlags,
    items: SmallVec<[ItemIndex; 8]>,
    headers: SmallVec<[usize; 4]>,
}

impl InvalidationContext {
    /// A context that invalidates nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that drops every cached attribute and recomputes derived
    /// metrics and the content size.
    #[must_use]
    pub fn everything() -> Self {
        Self {
            flags: InvalidationFlags::EVERYTHING
                | InvalidationFlags::DERIVED
                | InvalidationFlags::CONTENT_SIZE,
            ..Self::default()
        }
    }

    /// Adds flags to this context.
    #[must_use]
    pub fn with_flags(mut self, flags: InvalidationFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Marks the given cells stale.
    pub fn invalidate_items(&mut self, items: impl IntoIterator<Item = ItemIndex>) {
        self.items.extend(items);
    }

    /// Marks the headers of the given sections stale.
    pub fn invalidate_headers(&mut self, sections: impl IntoIterator<Item = usize>) {
        self.headers.extend(sections);
    }

    /// Flags carried by this context.
    #[must_use]
    pub const fn flags(&self) -> InvalidationFlags {
        self.flags
    }

    /// Whether this context drops every cached attribute.
    #[must_use]
    pub const fn invalidates_everything(&self) -> bool {
        self.flags.contains(InvalidationFlags::EVERYTHING)
    }

    /// Cells explicitly marked stale.
    #[must_use]
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }

    /// Sections whose header is explicitly marked stale.
    #[must_use]
    pub fn headers(&self) -> &[usize] {
        &self.headers
    }

    /// Returns `true` if applying this context would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.flags.intersects(
            InvalidationFlags::EVERYTHING
                | InvalidationFlags::DERIVED
                | InvalidationFlags::CONTENT_SIZE,
        ) && self.items.is_empty()
            && self.headers.is_empty()
    }

    /// Evicts the stale entries from `cache`.
    ///
    /// Returns the identities that were actually present and removed. A full
    /// invalidation clears the cache and reports every entry it held.
    pub fn apply(&self, cache: &mut AttributeCache) -> SmallVec<[ElementId; 8]> {
        let mut evicted = SmallVec::new();
        if self.invalidates_everything() {
            evicted.extend(cache.item_indices().map(ElementId::Item));
            evicted.extend(cache.header_sections().map(ElementId::Header));
            cache.clear();
            return evicted;
        }
        for &index in &self.items {
            if cache.remove(ElementId::Item(index)).is_some() {
                evicted.push(ElementId::Item(index));
            }
        }
        for &section in &self.headers {
            if cache.remove(ElementId::Header(section)).is_some() {
                evicted.push(ElementId::Header(section));
            }
        }
        evicted
    }
}

/// Builds the context for a change of viewport bounds.
///
/// - A width change alters the cell side, so everything is recomputed.
/// - [`Strategy::Stack`] also resets on a height change, because collapsed
///   and selected passes are positioned against the viewport height.
/// - On a pure scroll, [`Strategy::StickyGrid`] marks every cached header
///   stale and [`Strategy::Stack`] marks every cached pass and its header
///   stale. The remaining strategies keep the cache.
pub fn for_bounds_change(
    strategy: Strategy,
    cache: &AttributeCache,
    old: &Viewport,
    new: &Viewport,
) -> InvalidationContext {
    let resized_width = old.size.width != new.size.width;
    let resized_height = old.size.height != new.size.height;
    if resized_width || (resized_height && strategy == Strategy::Stack) {
        return InvalidationContext::everything().with_flags(InvalidationFlags::BOUNDS);
    }

    let mut context = InvalidationContext::new().with_flags(InvalidationFlags::BOUNDS);
    match strategy {
        Strategy::StickyGrid => {
            context.invalidate_headers(cache.header_sections());
        }
        Strategy::Stack => {
            context.invalidate_items(cache.item_indices());
            context.invalidate_headers(cache.header_sections());
        }
        Strategy::Grid(_) | Strategy::Dynamics => {}
    }
    context
}

/// Builds the context for new metrics: a full reset.
#[must_use]
pub fn for_metrics_change() -> InvalidationContext {
    InvalidationContext::everything()
}

/// Builds the context for a selection change: a full reset including the
/// content size.
#[must_use]
pub fn for_selection_change() -> InvalidationContext {
    InvalidationContext::everything()
}

/// Builds the context for reloading specific items.
///
/// Only the listed cells are evicted; headers and every other cell stay valid.
pub fn for_items(items: impl IntoIterator<Item = ItemIndex>) -> InvalidationContext {
    let mut context = InvalidationContext::new();
    context.invalidate_items(items);
    context
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{InvalidationContext, InvalidationFlags, for_bounds_change, for_items};
    use crate::{Attribute, AttributeCache, ElementId, HeaderMode, ItemIndex, Strategy, Viewport};

    fn filled_cache() -> AttributeCache {
        let mut cache = AttributeCache::new();
        for item in 0..3 {
            cache.insert(Attribute::new(
                ElementId::Item(ItemIndex::new(0, item)),
                Rect::new(0.0, 0.0, 10.0, 10.0),
            ));
        }
        cache.insert(Attribute::new(
            ElementId::Header(0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ));
        cache
    }

    fn viewport(y: f64) -> Viewport {
        Viewport::new(Point::new(0.0, y), Size::new(500.0, 800.0))
    }

    #[test]
    fn scrolling_a_plain_grid_keeps_the_cache() {
        let cache = filled_cache();
        let context = for_bounds_change(
            Strategy::Grid(HeaderMode::PerSection),
            &cache,
            &viewport(0.0),
            &viewport(50.0),
        );
        assert!(context.is_empty());
        assert!(context.flags().contains(InvalidationFlags::BOUNDS));
    }

    #[test]
    fn scrolling_a_sticky_grid_marks_headers_only() {
        let mut cache = filled_cache();
        let context = for_bounds_change(
            Strategy::StickyGrid,
            &cache,
            &viewport(0.0),
            &viewport(50.0),
        );
        assert_eq!(context.headers(), &[0]);
        assert!(context.items().is_empty());

        let evicted = context.apply(&mut cache);
        assert_eq!(evicted.as_slice(), &[ElementId::Header(0)]);
        assert_eq!(cache.item_count(), 3);
        assert_eq!(cache.header_count(), 0);
    }

    #[test]
    fn scrolling_a_stack_marks_everything_cached() {
        let mut cache = filled_cache();
        let context = for_bounds_change(Strategy::Stack, &cache, &viewport(0.0), &viewport(-20.0));
        assert!(!context.invalidates_everything());
        context.apply(&mut cache);
        assert!(cache.is_empty());
    }

    #[test]
    fn width_change_resets_everything() {
        let cache = filled_cache();
        let wider = Viewport::new(Point::ORIGIN, Size::new(600.0, 800.0));
        let context = for_bounds_change(
            Strategy::Grid(HeaderMode::None),
            &cache,
            &viewport(0.0),
            &wider,
        );
        assert!(context.invalidates_everything());
        assert!(context.flags().contains(InvalidationFlags::DERIVED));
    }

    #[test]
    fn targeted_reload_evicts_only_present_entries() {
        let mut cache = filled_cache();
        let context = for_items([ItemIndex::new(0, 1), ItemIndex::new(4, 4)]);
        let evicted = context.apply(&mut cache);
        assert_eq!(
            evicted.as_slice(),
            &[ElementId::Item(ItemIndex::new(0, 1))]
        );
        assert_eq!(cache.item_count(), 2);
        assert!(cache.contains(ElementId::Header(0)));
    }

    #[test]
    fn full_invalidation_reports_all_evictions() {
        let mut cache = filled_cache();
        let evicted = InvalidationContext::everything().apply(&mut cache);
        assert_eq!(evicted.len(), 4);
        assert!(cache.is_empty());
    }
}

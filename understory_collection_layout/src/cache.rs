// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storage for computed attributes.

use hashbrown::HashMap;

use crate::{Attribute, ElementId, ItemIndex};

/// Last computed placement of every cell and header, keyed by identity.
///
/// An entry that is present is valid for the current metrics, shape and
/// scroll state. Absence means the element must be placed again before it is
/// observed; the owning [`CollectionLayout`](crate::CollectionLayout) does this
/// synchronously at the start of every query.
#[derive(Clone, Debug, Default)]
pub struct AttributeCache {
    cells: HashMap<ItemIndex, Attribute>,
    headers: HashMap<usize, Attribute>,
}

impl AttributeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached attribute for a cell.
    #[must_use]
    pub fn item(&self, index: ItemIndex) -> Option<&Attribute> {
        self.cells.get(&index)
    }

    /// Cached attribute for a section header.
    #[must_use]
    pub fn header(&self, section: usize) -> Option<&Attribute> {
        self.headers.get(&section)
    }

    /// Cached attribute for any element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Attribute> {
        match id {
            ElementId::Item(index) => self.item(index),
            ElementId::Header(section) => self.header(section),
        }
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Attribute> {
        match id {
            ElementId::Item(index) => self.cells.get_mut(&index),
            ElementId::Header(section) => self.headers.get_mut(&section),
        }
    }

    /// Whether an entry exists for `id`.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Stores `attribute` under its own identity, returning the entry it replaced.
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        match attribute.id {
            ElementId::Item(index) => self.cells.insert(index, attribute),
            ElementId::Header(section) => self.headers.insert(section, attribute),
        }
    }

    /// Removes the entry for `id`.
    pub fn remove(&mut self, id: ElementId) -> Option<Attribute> {
        match id {
            ElementId::Item(index) => self.cells.remove(&index),
            ElementId::Header(section) => self.headers.remove(&section),
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.headers.clear();
    }

    /// Number of cached cells.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cached headers.
    #[must_use]
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.headers.is_empty()
    }

    /// Sections whose header is currently cached.
    pub fn header_sections(&self) -> impl Iterator<Item = usize> + '_ {
        self.headers.keys().copied()
    }

    /// Indices of every cached cell.
    pub fn item_indices(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.cells.keys().copied()
    }

    /// Every cached attribute, cells first. The order within each kind is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.cells.values().chain(self.headers.values())
    }

    /// Every cached header attribute.
    pub fn headers(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.headers.values()
    }
}

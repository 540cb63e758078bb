// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section/item counts supplied by the host.

use alloc::vec::Vec;

use crate::ItemIndex;

/// Host-side data source consulted when a [`SectionShape`] is snapshotted.
pub trait DataSource {
    /// Number of sections.
    fn number_of_sections(&self) -> usize;

    /// Number of items in `section`.
    fn number_of_items(&self, section: usize) -> usize;
}

/// Per-section item counts, read-only for the duration of a layout pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionShape {
    counts: Vec<usize>,
}

impl SectionShape {
    /// Creates a shape from per-section item counts.
    #[must_use]
    pub fn new(counts: impl Into<Vec<usize>>) -> Self {
        Self {
            counts: counts.into(),
        }
    }

    /// Creates a shape with `sections` sections of `items` items each.
    #[must_use]
    pub fn uniform(sections: usize, items: usize) -> Self {
        Self {
            counts: alloc::vec![items; sections],
        }
    }

    /// Snapshots the counts reported by a [`DataSource`].
    #[must_use]
    pub fn from_source(source: &(impl DataSource + ?Sized)) -> Self {
        let counts = (0..source.number_of_sections())
            .map(|section| source.number_of_items(section))
            .collect();
        Self { counts }
    }

    /// Number of sections.
    #[must_use]
    pub fn sections(&self) -> usize {
        self.counts.len()
    }

    /// Number of items in `section`, or `0` if the section does not exist.
    #[must_use]
    pub fn items(&self, section: usize) -> usize {
        self.counts.get(section).copied().unwrap_or(0)
    }

    /// Total number of items across all sections.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Whether `index` addresses an existing item.
    #[must_use]
    pub fn contains(&self, index: ItemIndex) -> bool {
        index.item < self.items(index.section)
    }

    /// Per-section item counts.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Every item index, in section-then-item order.
    pub fn indices(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(section, &count)| (0..count).map(move |item| ItemIndex::new(section, item)))
    }
}

impl DataSource for SectionShape {
    fn number_of_sections(&self) -> usize {
        self.sections()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.items(section)
    }
}

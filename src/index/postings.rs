//! Read-only posting structures.
//!
//! Both indexes map a key to the set of record ordinals carrying it. The
//! maps are assembled by [`PostingMapBuilder`] and frozen into a
//! [`PostingMap`], which exposes lookups only.

use crate::index::types::{FieldValue, IndexedField, RecordId};
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// Frozen mapping from a key to its posting set
#[derive(Debug, Clone)]
pub struct PostingMap<K> {
    entries: FxHashMap<K, RoaringBitmap>,
}

impl<K: Eq + Hash> PostingMap<K> {
    /// Posting set for a key, if any record carries it
    pub fn get<Q>(&self, key: &Q) -> Option<&RoaringBitmap>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all posting set sizes
    pub fn total_postings(&self) -> u64 {
        self.entries.values().map(RoaringBitmap::len).sum()
    }

    /// Iterate over keys with their posting sets (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = (&K, &RoaringBitmap)> {
        self.entries.iter()
    }

    /// Largest ordinal referenced by any posting set
    pub fn max_record_id(&self) -> Option<RecordId> {
        self.entries.values().filter_map(RoaringBitmap::max).max()
    }
}

/// Mutable accumulator used only while an index is being built
#[derive(Debug)]
pub struct PostingMapBuilder<K> {
    entries: FxHashMap<K, RoaringBitmap>,
}

impl<K: Eq + Hash> Default for PostingMapBuilder<K> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash> PostingMapBuilder<K> {
    pub fn insert(&mut self, key: K, record: RecordId) {
        self.entries.entry(key).or_default().insert(record);
    }

    pub fn finish(mut self) -> PostingMap<K> {
        self.entries.shrink_to_fit();
        PostingMap {
            entries: self.entries,
        }
    }
}

/// Term to record ordinals
pub type InvertedIndex = PostingMap<String>;

/// Exact-match index over the whitelisted fields
#[derive(Debug, Clone)]
pub struct FieldIndex {
    by_field: [PostingMap<FieldValue>; IndexedField::COUNT],
}

impl FieldIndex {
    /// Posting set for an already-normalized value
    pub fn get(&self, field: IndexedField, normalized: &FieldValue) -> Option<&RoaringBitmap> {
        self.by_field[field.slot()].get(normalized)
    }

    pub fn field(&self, field: IndexedField) -> &PostingMap<FieldValue> {
        &self.by_field[field.slot()]
    }
}

/// Accumulator for [`FieldIndex`]
#[derive(Debug, Default)]
pub struct FieldIndexBuilder {
    by_field: [PostingMapBuilder<FieldValue>; IndexedField::COUNT],
}

impl FieldIndexBuilder {
    pub fn insert(&mut self, field: IndexedField, normalized: FieldValue, record: RecordId) {
        self.by_field[field.slot()].insert(normalized, record);
    }

    pub fn finish(self) -> FieldIndex {
        FieldIndex {
            by_field: self.by_field.map(PostingMapBuilder::finish),
        }
    }
}

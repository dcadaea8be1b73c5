pub mod build;
pub mod loader;
pub mod postings;
pub mod stats;
pub mod types;

pub use build::build_index;
pub use postings::{FieldIndex, InvertedIndex, PostingMap};
pub use stats::IndexStats;
pub use types::*;

use crate::error::BuildError;
use roaring::RoaringBitmap;

/// An immutable record collection together with its derived indexes.
///
/// Constructed once by [`build_index`]; no method mutates it afterwards.
#[derive(Debug, Clone)]
pub struct PlantIndex {
    records: Box<[PlantRecord]>,
    terms: InvertedIndex,
    fields: FieldIndex,
}

impl PlantIndex {
    /// Index a record collection (see [`build_index`])
    pub fn build(records: Vec<PlantRecord>) -> Result<Self, BuildError> {
        build_index(records)
    }

    pub(crate) fn from_parts(
        records: Vec<PlantRecord>,
        terms: InvertedIndex,
        fields: FieldIndex,
    ) -> Self {
        Self {
            records: records.into_boxed_slice(),
            terms,
            fields,
        }
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in load order
    pub fn records(&self) -> &[PlantRecord] {
        &self.records
    }

    pub(crate) fn record(&self, id: RecordId) -> Option<&PlantRecord> {
        self.records.get(id as usize)
    }

    pub fn terms(&self) -> &InvertedIndex {
        &self.terms
    }

    pub fn fields(&self) -> &FieldIndex {
        &self.fields
    }

    /// Every ordinal of this index
    pub(crate) fn all_ids(&self) -> RoaringBitmap {
        let mut ids = RoaringBitmap::new();
        // len() <= RecordId::MAX is enforced at build time
        ids.insert_range(0..self.records.len() as RecordId);
        ids
    }
}

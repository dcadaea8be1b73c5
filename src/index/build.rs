use crate::error::BuildError;
use crate::index::PlantIndex;
use crate::index::postings::{FieldIndexBuilder, PostingMapBuilder};
use crate::index::types::{FieldValue, IndexedField, PlantRecord, RecordId, SEARCHABLE_FIELDS};
use crate::utils::{normalize_value, tokenize};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::borrow::Cow;
use std::time::Instant;

/// Largest collection whose ordinals fit in a [`RecordId`]
pub const MAX_RECORDS: usize = RecordId::MAX as usize;

/// Index keys extracted from a single record (computed in parallel)
pub struct ProcessedRecord {
    /// Unique terms across all searchable fields
    pub terms: Vec<String>,
    /// Normalized values of the whitelisted fields that are present
    pub field_keys: Vec<(IndexedField, FieldValue)>,
}

/// Extract the index keys of one record (pure, can run in parallel)
pub fn process_record(record: &PlantRecord) -> ProcessedRecord {
    let mut terms = Vec::new();
    for field in SEARCHABLE_FIELDS {
        let Some(value) = record.get(field) else {
            continue;
        };
        let text = match value {
            FieldValue::Text(text) => Cow::Borrowed(text.as_str()),
            other => Cow::Owned(other.to_string()),
        };
        terms.extend(tokenize(Some(&*text)));
    }

    // Presence is binary per record
    terms.sort_unstable();
    terms.dedup();

    let field_keys = IndexedField::ALL
        .into_iter()
        .filter_map(|field| {
            let value = record.get(field.as_str())?;
            if value.is_empty() {
                return None;
            }
            Some((field, normalize_value(value)))
        })
        .collect();

    ProcessedRecord { terms, field_keys }
}

#[cfg(feature = "parallel")]
fn process_records(records: &[PlantRecord]) -> Vec<ProcessedRecord> {
    records.par_iter().map(process_record).collect()
}

#[cfg(not(feature = "parallel"))]
fn process_records(records: &[PlantRecord]) -> Vec<ProcessedRecord> {
    records.iter().map(process_record).collect()
}

/// Build the inverted and field indexes over a record collection.
///
/// Record ordinals follow the order of `records`. Key extraction may run in
/// parallel, but postings are merged sequentially so the result does not
/// depend on scheduling. The index is returned complete or not at all.
pub fn build_index(records: Vec<PlantRecord>) -> Result<PlantIndex, BuildError> {
    if records.len() > MAX_RECORDS {
        return Err(BuildError::TooManyRecords {
            count: records.len(),
            max: MAX_RECORDS as u64,
        });
    }

    let start = Instant::now();
    let processed = process_records(&records);

    let mut terms = PostingMapBuilder::default();
    let mut fields = FieldIndexBuilder::default();

    for (ordinal, record) in processed.into_iter().enumerate() {
        // Bounded by MAX_RECORDS above
        let id = ordinal as RecordId;
        for term in record.terms {
            terms.insert(term, id);
        }
        for (field, key) in record.field_keys {
            fields.insert(field, key, id);
        }
    }

    let index = PlantIndex::from_parts(records, terms.finish(), fields.finish());

    tracing::debug!(
        records = index.len(),
        terms = index.terms().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "built plant index"
    );

    Ok(index)
}

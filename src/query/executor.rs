use crate::index::PlantIndex;
use crate::index::types::{FieldValue, IndexedField, PlantRecord};
use crate::query::parser::{Page, Query};
use crate::utils::{normalize_value, tokenize};
use roaring::RoaringBitmap;
use serde::Serialize;

/// One page of results plus the size of the full match set
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    /// Number of records matching the query before pagination
    pub total: u64,
    pub records: Vec<&'a PlantRecord>,
}

/// Query executor
pub struct QueryExecutor<'a> {
    index: &'a PlantIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a PlantIndex) -> Self {
        Self { index }
    }

    /// Execute a query and return the requested page
    pub fn execute(&self, query: &Query) -> SearchResults<'a> {
        let candidates = self.candidates(query.phrase.as_deref(), &query.filters);
        SearchResults {
            total: candidates.len(),
            records: self.paginate(&candidates, query.page),
        }
    }

    /// Ordinals of every record matching the phrase and all filters
    fn candidates(&self, phrase: Option<&str>, filters: &[(String, FieldValue)]) -> RoaringBitmap {
        let mut candidates = self.index.all_ids();

        if let Some(matches) = self.match_phrase(phrase) {
            candidates &= matches;
        }

        for (field, value) in filters {
            if candidates.is_empty() {
                break;
            }
            self.apply_filter(&mut candidates, field, value);
        }

        candidates
    }

    /// Union of the postings of every phrase term.
    ///
    /// `None` when the phrase yields no terms, in which case the full-text
    /// stage does not restrict anything.
    fn match_phrase(&self, phrase: Option<&str>) -> Option<RoaringBitmap> {
        let terms = tokenize(phrase);
        if terms.is_empty() {
            return None;
        }

        let mut union = RoaringBitmap::new();
        for term in &terms {
            if let Some(postings) = self.index.terms().get(term.as_str()) {
                union |= postings;
            }
        }
        Some(union)
    }

    fn apply_filter(&self, candidates: &mut RoaringBitmap, field: &str, value: &FieldValue) {
        match IndexedField::from_name(field) {
            Some(indexed) => match self.index.fields().get(indexed, &normalize_value(value)) {
                Some(postings) => *candidates &= postings,
                None => candidates.clear(),
            },
            None => {
                // Unindexed field: exact comparison against the raw value
                let matching: RoaringBitmap = candidates
                    .iter()
                    .filter(|&id| {
                        self.index
                            .record(id)
                            .and_then(|record| record.get(field))
                            == Some(value)
                    })
                    .collect();
                *candidates = matching;
            }
        }
    }

    /// Records at `[offset, offset + limit)` in ascending ordinal order
    fn paginate(&self, candidates: &RoaringBitmap, page: Page) -> Vec<&'a PlantRecord> {
        if page.limit == 0 || page.offset as u64 >= candidates.len() {
            return Vec::new();
        }

        candidates
            .iter()
            .skip(page.offset)
            .take(page.limit)
            .filter_map(|id| self.index.record(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PlantIndex {
        PlantIndex::build(vec![
            PlantRecord::new()
                .with("plant_id", "1")
                .with("scientific_name", "Rosa canina")
                .with("common_name", "Dog rose")
                .with("family", "Rosaceae")
                .with("plant_type", "Shrub")
                .with("flower_color", "Pink"),
            PlantRecord::new()
                .with("plant_id", "2")
                .with("scientific_name", "Abies concolor")
                .with("common_name", "White fir")
                .with("family", "Pinaceae")
                .with("plant_type", "Tree")
                .with("flower_color", "None"),
            PlantRecord::new()
                .with("plant_id", "3")
                .with("scientific_name", "Malus domestica")
                .with("common_name", "Apple")
                .with("family", "Rosaceae")
                .with("plant_type", "Tree")
                .with("flower_color", "White"),
        ])
        .unwrap()
    }

    fn ids(results: &SearchResults<'_>) -> Vec<String> {
        results
            .records
            .iter()
            .map(|r| r.text("plant_id").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_phrase_is_or_of_terms() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&Query::new(Page::new(0, 10)).phrase("rose fir"));
        assert_eq!(ids(&results), vec!["1", "2"]);
        assert_eq!(results.total, 2);
    }

    #[test]
    fn test_phrase_without_terms_is_noop() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&Query::new(Page::new(0, 10)).phrase("?! a"));
        assert_eq!(results.total, 3);
    }

    #[test]
    fn test_unknown_term_matches_nothing() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&Query::new(Page::new(0, 10)).phrase("cactus"));
        assert!(results.records.is_empty());
        assert_eq!(results.total, 0);
    }

    #[test]
    fn test_indexed_filter_is_case_insensitive() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        for family in ["Rosaceae", "rosaceae", "ROSACEAE"] {
            let results =
                executor.execute(&Query::new(Page::new(0, 10)).filter("family", family));
            assert_eq!(ids(&results), vec!["1", "3"]);
        }
    }

    #[test]
    fn test_filters_compose_with_and() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(
            &Query::new(Page::new(0, 10))
                .filter("family", "Rosaceae")
                .filter("plant_type", "tree"),
        );
        assert_eq!(ids(&results), vec!["3"]);
    }

    #[test]
    fn test_unindexed_filter_is_exact() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);

        let exact = executor.execute(&Query::new(Page::new(0, 10)).filter("flower_color", "White"));
        assert_eq!(ids(&exact), vec!["3"]);

        let lowered = executor.execute(&Query::new(Page::new(0, 10)).filter("flower_color", "white"));
        assert!(lowered.records.is_empty());
    }

    #[test]
    fn test_missing_filter_value_empties_result() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(
            &Query::new(Page::new(0, 10))
                .phrase("tree")
                .filter("family", "Cactaceae"),
        );
        assert_eq!(results.total, 0);
    }

    #[test]
    fn test_empty_filter_value_matches_nothing() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&Query::new(Page::new(0, 10)).filter("family", ""));
        assert_eq!(results.total, 0);
    }

    #[test]
    fn test_pagination_window() {
        let index = catalog();
        let executor = QueryExecutor::new(&index);

        let page = executor.execute(&Query::new(Page::new(1, 1)));
        assert_eq!(ids(&page), vec!["2"]);
        assert_eq!(page.total, 3);

        let tail = executor.execute(&Query::new(Page::new(2, 10)));
        assert_eq!(ids(&tail), vec!["3"]);

        let past_end = executor.execute(&Query::new(Page::new(3, 10)));
        assert!(past_end.records.is_empty());
        assert_eq!(past_end.total, 3);

        let zero = executor.execute(&Query::new(Page::new(0, 0)));
        assert!(zero.records.is_empty());
    }
}

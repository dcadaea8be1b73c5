#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use plotify_search::{FieldValue, PlantRecord, SearchEngine};

#[derive(Debug, Arbitrary)]
struct Input {
    records: Vec<Vec<(String, String)>>,
    phrase: Option<String>,
    filters: Vec<(String, String)>,
    limit: u8,
    offset: u8,
}

fuzz_target!(|input: Input| {
    let records = input
        .records
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .map(|(field, value)| (field, FieldValue::from(value)))
                .collect::<PlantRecord>()
        })
        .collect();
    let Ok(engine) = SearchEngine::build(records) else {
        return;
    };

    let filters: Vec<(String, FieldValue)> = input
        .filters
        .into_iter()
        .map(|(field, value)| (field, FieldValue::from(value)))
        .collect();

    let limit = input.limit as usize;
    let results = engine.query(input.phrase.as_deref(), &filters, limit, input.offset as usize);
    assert!(results.len() <= limit);
});

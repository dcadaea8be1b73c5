use crate::index::PlantIndex;
use crate::index::types::IndexedField;
use serde::Serialize;

/// Summary of a built index
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub terms: usize,
    pub postings: u64,
    /// Distinct normalized values per whitelisted field
    pub field_keys: Vec<(String, usize)>,
    /// Most frequent terms by document frequency, ties broken alphabetically
    pub top_terms: Vec<(String, u64)>,
}

impl IndexStats {
    pub fn collect(index: &PlantIndex, top: usize) -> Self {
        let field_keys = IndexedField::ALL
            .into_iter()
            .map(|field| (field.as_str().to_string(), index.fields().field(field).len()))
            .collect();

        let mut by_freq: Vec<(&String, u64)> = index
            .terms()
            .iter()
            .map(|(term, postings)| (term, postings.len()))
            .collect();
        by_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let top_terms = by_freq
            .into_iter()
            .take(top)
            .map(|(term, freq)| (term.clone(), freq))
            .collect();

        Self {
            records: index.len(),
            terms: index.terms().len(),
            postings: index.terms().total_postings(),
            field_keys,
            top_terms,
        }
    }

    /// Print a human-readable report
    pub fn print(&self) {
        println!("Index Statistics");
        println!("================");
        println!();
        println!("Records:          {}", self.records);
        println!("Distinct terms:   {}", self.terms);
        println!("Term postings:    {}", self.postings);
        if self.records > 0 {
            println!(
                "Terms per record: {:.1}",
                self.postings as f64 / self.records as f64
            );
        }

        println!();
        println!("Filter keys:");
        for (field, count) in &self.field_keys {
            println!("  {:16} {}", field, count);
        }

        if !self.top_terms.is_empty() {
            println!();
            println!("Top terms:");
            for (term, freq) in &self.top_terms {
                println!("  {:16} {}", term, freq);
            }
        }
    }
}

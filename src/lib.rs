//! # plotify-search - In-memory plant record search
//!
//! Loads a collection of plant records once, builds immutable indexes over
//! it, and answers lookups that combine free text with exact field filters.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Record model, loading, and index construction
//! - [`query`] - Query representation and execution
//! - [`engine`] - The shared search engine and its swappable handle
//! - [`output`] - Result formatting (colored text or JSON)
//! - [`utils`] - Tokenizer, configuration, and logging setup
//! - [`error`] - Error types for loading, building, and querying
//!
//! ## Quick Start
//!
//! ```
//! use plotify_search::{PlantRecord, SearchEngine};
//!
//! let engine = SearchEngine::build(vec![
//!     PlantRecord::new().with("scientific_name", "Abelia"),
//!     PlantRecord::new()
//!         .with("scientific_name", "Abies")
//!         .with("common_name", "fir"),
//! ])
//! .unwrap();
//!
//! let results = engine.query(Some("fir"), &[], 20, 0);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].text("scientific_name"), Some("Abies"));
//! ```
//!
//! ## Matching
//!
//! 1. **Free text** - a record matches if it contains *any* phrase term
//! 2. **Filters** - a record must satisfy *every* `(field, value)` pair;
//!    `plant_id`, `family`, `plant_type` and `scientific_name` are looked up
//!    case-insensitively in an index, other fields are compared exactly

pub mod engine;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use engine::{EngineHandle, SearchEngine};
pub use error::{BuildError, LoadError, QueryError};
pub use index::{FieldValue, IndexedField, PlantIndex, PlantRecord};
pub use query::{Page, Query, SearchResults};

//! Utility functions shared by the index and the CLI.
//!
//! - [`tokenizer`] - Term extraction and field-value normalization
//! - [`app_data`] - Configuration stored in the application data directory
//! - [`logging`] - `tracing` subscriber setup
//!
//! ```
//! use plotify_search::utils::tokenize;
//!
//! let terms = tokenize(Some("Abies concolor (White Fir)"));
//! assert_eq!(terms, vec!["abies", "concolor", "white", "fir"]);
//! ```

pub mod app_data;
pub mod logging;
pub mod tokenizer;

pub use app_data::*;
pub use tokenizer::*;

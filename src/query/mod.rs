pub mod executor;
pub mod parser;

pub use executor::{QueryExecutor, SearchResults};
pub use parser::{Page, Query, parse_filter};

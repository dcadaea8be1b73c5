//! The search engine front door and its swappable handle.

use crate::error::BuildError;
use crate::index::{PlantIndex, PlantRecord};
use crate::index::types::FieldValue;
use crate::query::{Page, Query, QueryExecutor, SearchResults};
use std::sync::{Arc, PoisonError, RwLock};

/// Immutable, thread-safe search engine over one record collection.
///
/// Build it once at startup and share it (by reference or `Arc`) with
/// everything that serves queries. A changed collection means a new engine;
/// see [`EngineHandle`] for swapping.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: PlantIndex,
}

impl SearchEngine {
    /// Index `records`, failing without producing a partial engine
    pub fn build(records: Vec<PlantRecord>) -> Result<Self, BuildError> {
        Ok(Self {
            index: PlantIndex::build(records)?,
        })
    }

    pub fn from_index(index: PlantIndex) -> Self {
        Self { index }
    }

    /// Free-text OR match, AND-ed exact filters, then the `[offset, offset + limit)`
    /// slice in load order.
    pub fn query(
        &self,
        phrase: Option<&str>,
        filters: &[(String, FieldValue)],
        limit: usize,
        offset: usize,
    ) -> Vec<&PlantRecord> {
        let query = Query {
            phrase: phrase.map(str::to_string),
            filters: filters.to_vec(),
            page: Page::new(offset, limit),
        };
        self.search(&query).records
    }

    /// Run a structured query, also reporting the unpaginated match count
    pub fn search(&self, query: &Query) -> SearchResults<'_> {
        QueryExecutor::new(&self.index).execute(query)
    }

    pub fn index(&self) -> &PlantIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Shared reference to the current engine that can be replaced atomically.
///
/// Readers take a snapshot with [`current`](Self::current) and keep using it
/// for as long as they like; [`replace`](Self::replace) only affects later
/// snapshots. Engines themselves are never modified.
#[derive(Debug)]
pub struct EngineHandle {
    current: RwLock<Arc<SearchEngine>>,
}

impl EngineHandle {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// Snapshot of the engine visible to new queries
    pub fn current(&self) -> Arc<SearchEngine> {
        // The lock only guards an Arc swap, so a poisoned guard still holds a valid engine
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish `engine` to subsequent callers and return the previous one
    pub fn replace(&self, engine: SearchEngine) -> Arc<SearchEngine> {
        let next = Arc::new(engine);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

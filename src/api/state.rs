//! Shared, immutable application state handed to every handler behind an
//! `Arc` (§5: "record store, dictionaries, and all indexes are immutable";
//! the response cache is the one mutable structure, and it guards its own
//! lock internally).

use crate::cache::ResponseCache;
use crate::dictionary::Dictionaries;
use crate::index::IndexSet;
use crate::observability::MetricsRegistry;
use crate::storage::RecordStore;

pub struct AppState {
    pub store: RecordStore,
    pub dicts: Dictionaries,
    pub index: IndexSet,
    pub cache: ResponseCache,
    pub metrics: MetricsRegistry,
    pub now: i64,
}

//! The per-`query_id` response cache (§4.5).
//!
//! Process-wide, append-only, and guarded by a single coarse lock — the
//! only mutable shared structure in the engine (§5: "record store,
//! dictionaries, and all indexes are immutable"). Reads check-then-copy
//! under the same lock; there is no LRU or eviction, matching the
//! contest's fixed, repeating `query_id` stream (§9).

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    Success(Vec<u8>),
    Bad,
    NotFound,
}

#[derive(Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<i64, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query_id: i64) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(&query_id).cloned()
    }

    pub fn put(&self, query_id: i64, entry: CacheEntry) {
        self.entries.lock().unwrap().insert(query_id, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

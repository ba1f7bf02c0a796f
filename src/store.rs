//! Concurrent result store.
//!
//! Many writers while lookups complete, one reader at serialization time.
//! Instances are passed explicitly; there is no process-wide map.

use crate::model::Identifier;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared username → identifier mapping. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    entries: Arc<DashMap<String, Identifier>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolution. The last write for a username wins.
    pub fn insert(&self, username: impl Into<String>, id: Identifier) -> Option<Identifier> {
        self.entries.insert(username.into(), id)
    }

    pub fn get(&self, username: &str) -> Option<Identifier> {
        self.entries.get(username).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy out every entry, sorted by username.
    pub fn snapshot(&self) -> Vec<(String, Identifier)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

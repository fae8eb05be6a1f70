//! DOM Query Cache
//!
//! Selector-result memoization validated against the tree generation.

use std::collections::HashMap;

use crate::{Generation, NodeId};

/// Selector result cache with tree generation validation
#[derive(Debug)]
pub struct QueryCache {
    cache: HashMap<QueryKey, CachedResult>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

/// Cache key for selector queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    root: NodeId,
    selector: String,
}

#[derive(Debug, Clone)]
struct CachedResult {
    generation: Generation,
    results: Vec<NodeId>,
}

impl QueryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: HashMap::new(),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Get cached result if it was computed at `generation`
    pub fn get(&mut self, root: NodeId, selector: &str, generation: Generation) -> Option<&[NodeId]> {
        let key = QueryKey {
            root,
            selector: selector.to_string(),
        };
        match self.cache.get(&key) {
            Some(cached) if cached.generation == generation => {
                self.hits += 1;
                Some(&cached.results)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store result in cache
    pub fn set(&mut self, root: NodeId, selector: &str, generation: Generation, results: Vec<NodeId>) {
        if self.cache.len() >= self.max_entries {
            self.evict_stale(generation);
        }
        if self.cache.len() >= self.max_entries {
            self.cache.clear();
        }

        self.cache.insert(
            QueryKey {
                root,
                selector: selector.to_string(),
            },
            CachedResult { generation, results },
        );
    }

    /// Clear all cached results
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    fn evict_stale(&mut self, current: Generation) {
        self.cache.retain(|_, v| v.generation == current);
    }

    /// Stats
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

//! Compiled-template cache.
//!
//! Keys are the raw template string, byte-for-byte: two templates
//! differing only in whitespace are distinct entries and compile
//! independently. Entries hold `Arc<Program>` so a cache hit hands back
//! the same procedure instance that was stored. Entries carry no
//! timestamps, only recency-of-access order for eviction.

use std::collections::HashMap;
use std::sync::Arc;

use weft_codegen::Program;

/// Default capacity of the bounded cache.
pub const DEFAULT_LRU_CAPACITY: usize = 100;

/// Eviction policy, chosen at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Plain memoization, no eviction.
    Unbounded,
    /// Fixed capacity with least-recently-used eviction.
    Lru(usize),
}

impl CachePolicy {
    /// Build a cache implementing this policy.
    pub fn build(self) -> Box<dyn TemplateCache> {
        match self {
            CachePolicy::Unbounded => Box::new(UnboundedCache::new()),
            CachePolicy::Lru(capacity) => Box::new(LruCache::new(capacity)),
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::Unbounded
    }
}

/// Storage contract shared by both policies.
pub trait TemplateCache {
    /// Look up a compiled program. On the bounded cache a hit promotes
    /// the entry to most-recently-used.
    fn get(&mut self, key: &str) -> Option<Arc<Program>>;
    /// Store a compiled program, evicting first if the policy requires.
    fn insert(&mut self, key: String, program: Arc<Program>);
    /// Membership test; does not touch recency.
    fn contains(&self, key: &str) -> bool;
    /// Remove one entry. Returns `true` if it was present.
    fn remove(&mut self, key: &str) -> bool;
    /// Drop every entry.
    fn clear(&mut self);
    /// Number of cached programs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Unbounded
// ─────────────────────────────────────────────────────────────────────

/// Plain memoization with no eviction.
#[derive(Debug, Default)]
pub struct UnboundedCache {
    entries: HashMap<String, Arc<Program>>,
}

impl UnboundedCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateCache for UnboundedCache {
    fn get(&mut self, key: &str) -> Option<Arc<Program>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, program: Arc<Program>) {
        self.entries.insert(key, program);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Bounded (LRU)
// ─────────────────────────────────────────────────────────────────────

/// Fixed-capacity cache with least-recently-used eviction.
///
/// Recency lives in `order`: index 0 is the eviction candidate, the back
/// is most recently used. Capacities are small (default 100), so the
/// linear promotion scan is not worth a linked structure.
#[derive(Debug)]
pub struct LruCache {
    entries: HashMap<String, Arc<Program>>,
    order: Vec<String>,
    capacity: usize,
}

impl LruCache {
    /// Create a cache holding at most `capacity` programs. The capacity
    /// is immutable after construction; zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn promote(&mut self, key: &str) {
        if let Some(at) = self.order.iter().position(|k| k == key) {
            let key = self.order.remove(at);
            self.order.push(key);
        }
    }
}

impl Default for LruCache {
    fn default() -> Self {
        Self::new(DEFAULT_LRU_CAPACITY)
    }
}

impl TemplateCache for LruCache {
    fn get(&mut self, key: &str) -> Option<Arc<Program>> {
        let hit = self.entries.get(key).cloned()?;
        self.promote(key);
        Some(hit)
    }

    fn insert(&mut self, key: String, program: Arc<Program>) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), program);
            self.promote(&key);
            return;
        }
        if self.entries.len() >= self.capacity && !self.order.is_empty() {
            let evicted = self.order.remove(0);
            self.entries.remove(&evicted);
        }
        self.order.push(key.clone());
        self.entries.insert(key, program);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Arc<Program> {
        let tokens = weft_parser::Parser::default().parse("cached");
        let compiled = weft_codegen::Compiler::default()
            .compile(&tokens)
            .expect("literal template compiles");
        Arc::new(compiled)
    }

    #[test]
    fn test_unbounded_never_evicts() {
        let mut cache = UnboundedCache::new();
        for i in 0..1000 {
            cache.insert(format!("t{i}"), program());
        }
        assert_eq!(cache.len(), 1000);
        assert!(cache.contains("t0"));
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert("a".into(), program());
        cache.insert("b".into(), program());
        cache.insert("c".into(), program());
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_lru_get_promotes() {
        let mut cache = LruCache::new(2);
        cache.insert("a".into(), program());
        cache.insert("b".into(), program());
        // Touch `a`, making `b` the eviction candidate.
        assert!(cache.get("a").is_some());
        cache.insert("c".into(), program());
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_lru_reinsert_existing_key_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.insert("a".into(), program());
        cache.insert("b".into(), program());
        cache.insert("a".into(), program());
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cache = LruCache::new(4);
        cache.insert("a".into(), program());
        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        cache.insert("b".into(), program());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cache = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }
}

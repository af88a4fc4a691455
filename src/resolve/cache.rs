//! Memo cache for resolution results
//!
//! Resolution is a pure function of `(theme, value, visited set, mode)` for a given
//! collection snapshot, so results can be reused across calls. The whole cache is
//! dropped as soon as it is used with a different [`CollectionStamp`].
//!
//! The cache is owned by one engine and is not meant to be shared between threads;
//! a multi-threaded host gives each thread its own engine or wraps it in a mutex.

use std::collections::{BTreeSet, HashMap};

use crate::resolve::chain::Chain;
use crate::theme::CollectionStamp;

/// How references to multi-valued variables are followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveMode {
    /// Split multi-valued targets and flatten the sibling chains with separators
    Expand,
    /// Treat a multi-valued target as one literal
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    theme: String,
    value: String,
    visited: Vec<String>,
    mode: ResolveMode,
}

impl CacheKey {
    fn new(theme: &str, value: &str, visited: &BTreeSet<String>, mode: ResolveMode) -> Self {
        Self {
            theme: theme.to_string(),
            value: value.to_string(),
            // BTreeSet iterates in sorted order
            visited: visited.iter().cloned().collect(),
            mode,
        }
    }
}

/// Counters exposed for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct ResolutionCache {
    stamp: Option<CollectionStamp>,
    entries: HashMap<CacheKey, Chain>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the cache valid for `stamp`, clearing it if it was built for another snapshot
    pub fn sync(&mut self, stamp: CollectionStamp) {
        if self.stamp != Some(stamp) {
            if !self.entries.is_empty() {
                log::debug!(
                    "Theme collection changed, dropping {} cached chains",
                    self.entries.len()
                );
            }
            self.entries.clear();
            self.stamp = Some(stamp);
        }
    }

    /// Drop everything, including the remembered stamp
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.stamp = None;
    }

    pub fn get(
        &mut self,
        theme: &str,
        value: &str,
        visited: &BTreeSet<String>,
        mode: ResolveMode,
    ) -> Option<Chain> {
        let found = self
            .entries
            .get(&CacheKey::new(theme, value, visited, mode))
            .cloned();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub fn insert(
        &mut self,
        theme: &str,
        value: &str,
        visited: &BTreeSet<String>,
        mode: ResolveMode,
        chain: Chain,
    ) {
        self.entries.insert(CacheKey::new(theme, value, visited, mode), chain);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeCollection;

    #[test]
    fn test_key_includes_visited_set() {
        let themes = ThemeCollection::sample();
        let mut cache = ResolutionCache::new();
        cache.sync(themes.stamp());

        let empty = BTreeSet::new();
        let visited: BTreeSet<String> = ["--a".to_string()].into_iter().collect();
        cache.insert("Light", "var(--a)", &empty, ResolveMode::Expand, Chain::start("var(--a)"));

        assert!(cache.get("Light", "var(--a)", &empty, ResolveMode::Expand).is_some());
        assert!(cache.get("Light", "var(--a)", &visited, ResolveMode::Expand).is_none());
        assert!(cache.get("Light", "var(--a)", &empty, ResolveMode::Single).is_none());
        assert!(cache.get("Dark", "var(--a)", &empty, ResolveMode::Expand).is_none());
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn test_sync_clears_on_new_stamp() {
        let mut themes = ThemeCollection::sample();
        let mut cache = ResolutionCache::new();
        cache.sync(themes.stamp());
        cache.insert("Light", "x", &BTreeSet::new(), ResolveMode::Expand, Chain::start("x"));

        cache.sync(themes.stamp());
        assert_eq!(cache.stats().entries, 1);

        themes.remove("Dark").unwrap();
        cache.sync(themes.stamp());
        assert_eq!(cache.stats().entries, 0);
    }
}

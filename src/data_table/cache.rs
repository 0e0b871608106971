//! Stage memoization
//!
//! Filter and sort results are cached as row-index lists keyed by exactly the
//! state each stage depends on, so paging or column changes never rerun them.
//! The cache must be cleared whenever the row source changes.

use std::sync::Arc;

use hashlink::LruCache;
use tracing::debug;

use super::filter::FilterCriteria;
use super::sort::SortSpec;

/// Key of the sort stage: its input (filter result) plus the sort itself
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortCacheKey {
    pub criteria: FilterCriteria,
    pub sort: Option<SortSpec>,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// LRU caches for the filter and sort stages
pub struct StageCache {
    filtered: LruCache<FilterCriteria, Arc<[usize]>>,
    sorted: LruCache<SortCacheKey, Arc<[usize]>>,
    stats: CacheStats,
}

impl StageCache {
    /// Create caches holding `capacity` results per stage
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            filtered: LruCache::new(capacity),
            sorted: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Filter result for `criteria`, computing it on a miss
    pub fn filtered(
        &mut self,
        criteria: &FilterCriteria,
        compute: impl FnOnce() -> Vec<usize>,
    ) -> Arc<[usize]> {
        if let Some(hit) = self.filtered.get(criteria) {
            self.stats.hits += 1;
            return hit.clone();
        }
        self.stats.misses += 1;
        let value: Arc<[usize]> = compute().into();
        debug!(rows = value.len(), "Filter stage recomputed");
        self.filtered.insert(criteria.clone(), value.clone());
        value
    }

    /// Sort result for `key`, computing it on a miss
    pub fn sorted(
        &mut self,
        key: SortCacheKey,
        compute: impl FnOnce() -> Vec<usize>,
    ) -> Arc<[usize]> {
        if let Some(hit) = self.sorted.get(&key) {
            self.stats.hits += 1;
            return hit.clone();
        }
        self.stats.misses += 1;
        let value: Arc<[usize]> = compute().into();
        debug!(rows = value.len(), sort = ?key.sort, "Sort stage recomputed");
        self.sorted.insert(key, value.clone());
        value
    }

    /// Forget every memoized result
    pub fn clear(&mut self) {
        self.filtered.clear();
        self.sorted.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::filter::ColumnFilters;

    #[test]
    fn test_filter_hit_skips_compute() {
        let mut cache = StageCache::new(4);
        let criteria = FilterCriteria::new("a", &ColumnFilters::new());

        let first = cache.filtered(&criteria, || vec![0, 2]);
        let second = cache.filtered(&criteria, || panic!("should be cached"));
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_sort_key_includes_direction() {
        let mut cache = StageCache::new(4);
        let criteria = FilterCriteria::default();
        let asc = SortCacheKey {
            criteria: criteria.clone(),
            sort: Some(SortSpec::asc("a")),
        };
        let desc = SortCacheKey {
            criteria,
            sort: Some(SortSpec::desc("a")),
        };

        cache.sorted(asc.clone(), || vec![0, 1]);
        let other = cache.sorted(desc, || vec![1, 0]);
        let again = cache.sorted(asc, || panic!("should be cached"));
        assert_eq!(&*other, &[1, 0]);
        assert_eq!(&*again, &[0, 1]);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let mut cache = StageCache::new(2);
        let criteria = FilterCriteria::default();
        cache.filtered(&criteria, || vec![0]);
        cache.clear();
        let value = cache.filtered(&criteria, || vec![0, 1]);
        assert_eq!(&*value, &[0, 1]);
    }
}

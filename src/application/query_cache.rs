// Session cache of derived time series, keyed by selected location
use crate::domain::cases_by_time::CasesByTimeFeature;
use crate::domain::selection::Selector;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type CachedSeries = Arc<Vec<CasesByTimeFeature>>;

/// How selectors map onto cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyPolicy {
    /// `county:06037`, `state:California`
    #[default]
    Namespaced,
    /// Bare identifier. A state named like a FIPS code shares its entry.
    Shared,
}

impl CacheKeyPolicy {
    pub fn key_for(&self, selector: &Selector) -> String {
        match self {
            CacheKeyPolicy::Namespaced => selector.to_string(),
            CacheKeyPolicy::Shared => selector.identifier().to_string(),
        }
    }
}

/// Entries are never evicted; the cache lives as long as the session that
/// owns it.
#[derive(Debug, Default)]
pub struct QueryCache {
    policy: CacheKeyPolicy,
    entries: RwLock<HashMap<String, CachedSeries>>,
}

impl QueryCache {
    pub fn new(policy: CacheKeyPolicy) -> Self {
        Self {
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> CacheKeyPolicy {
        self.policy
    }

    pub async fn get(&self, selector: &Selector) -> Option<CachedSeries> {
        let key = self.policy.key_for(selector);
        self.entries.read().await.get(&key).cloned()
    }

    pub async fn insert(&self, selector: &Selector, series: Vec<CasesByTimeFeature>) -> CachedSeries {
        let key = self.policy.key_for(selector);
        let series = Arc::new(series);
        self.entries.write().await.insert(key, series.clone());
        series
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county(fips: &str) -> Selector {
        Selector::County {
            fips: fips.to_string(),
        }
    }

    fn state(name: &str) -> Selector {
        Selector::State {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_key_policies() {
        assert_eq!(CacheKeyPolicy::Namespaced.key_for(&county("06037")), "county:06037");
        assert_eq!(CacheKeyPolicy::Namespaced.key_for(&state("Ohio")), "state:Ohio");
        assert_eq!(CacheKeyPolicy::Shared.key_for(&county("06037")), "06037");
        assert_eq!(CacheKeyPolicy::Shared.key_for(&state("Ohio")), "Ohio");
    }

    #[tokio::test]
    async fn test_insert_returns_shared_instance() {
        let cache = QueryCache::new(CacheKeyPolicy::Namespaced);
        let stored = cache
            .insert(&county("06037"), vec![CasesByTimeFeature::new(0, 1, 0, 1, 10)])
            .await;

        let cached = cache.get(&county("06037")).await.unwrap();
        assert!(Arc::ptr_eq(&stored, &cached));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_namespaced_keys_do_not_collide() {
        let cache = QueryCache::new(CacheKeyPolicy::Namespaced);
        cache.insert(&county("06037"), Vec::new()).await;

        assert!(cache.get(&state("06037")).await.is_none());
    }

    #[tokio::test]
    async fn test_shared_keys_collide() {
        let cache = QueryCache::new(CacheKeyPolicy::Shared);
        let stored = cache.insert(&county("06037"), Vec::new()).await;

        let cached = cache.get(&state("06037")).await.unwrap();
        assert!(Arc::ptr_eq(&stored, &cached));
    }
}

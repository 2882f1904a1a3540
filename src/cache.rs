//! TTL cache over synthesized responses
//!
//! Keyed by normalized query text. Expired entries are evicted on lookup.

use crate::models::SynthesizedResponse;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

struct CacheEntry {
    stored_at: Instant,
    response: SynthesizedResponse,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached response for the query, if present and fresh
    pub async fn get(&self, query: &str) -> Option<SynthesizedResponse> {
        let key = cache_key(query);
        let mut entries = self.entries.write().await;

        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                debug!(key = %key, "Response cache hit");
                Some(entry.response.clone())
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub async fn put(&self, query: &str, response: SynthesizedResponse) {
        let mut entries = self.entries.write().await;
        entries.insert(
            cache_key(query),
            CacheEntry {
                stored_at: Instant::now(),
                response,
            },
        );
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }
}

fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_response(query: &str) -> SynthesizedResponse {
        SynthesizedResponse {
            query_id: Uuid::new_v4(),
            query: query.to_string(),
            agents_consulted: vec![],
            insights: vec![],
            recommendations: vec![],
            failures: vec![],
            confidence: 0.0,
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn hit_within_ttl_and_key_normalization() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("What is DeFi?", sample_response("What is DeFi?")).await;

        assert!(cache.get("  what is defi?  ").await.is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.put("q", sample_response("q")).await;

        assert!(cache.get("q").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("a", sample_response("a")).await;
        cache.put("b", sample_response("b")).await;
        cache.clear().await;

        assert_eq!(cache.len().await, 0);
    }
}

use crate::core::usage::{UsageError, UsageStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// Counter store used in tests and when no database is wanted.
pub struct InMemoryUsageStore {
    counters: DashMap<String, i64>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
        }
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn add(&self, key: &str, amount: i64) -> Result<i64, UsageError> {
        let mut entry = self.counters.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
        Ok(*entry)
    }

    async fn get(&self, key: &str) -> Result<i64, UsageError> {
        Ok(self.counters.get(key).map(|entry| *entry).unwrap_or(0))
    }
}

impl Default for InMemoryUsageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counters_are_independent() {
        let store = InMemoryUsageStore::new();
        store.add("a", 2).await.unwrap();
        store.add("b", 5).await.unwrap();
        assert_eq!(store.add("a", 1).await.unwrap(), 3);
        assert_eq!(store.get("b").await.unwrap(), 5);
        assert_eq!(store.get("missing").await.unwrap(), 0);
    }
}

// Usage counting - how many commands the bot has run in total.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Key under which the total number of executed commands is stored.
pub const TOTAL_COMMANDS_KEY: &str = "total_commands_used";

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// A persistent named-counter store.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Adds `amount` to the counter at `key` (starting from 0) and returns the
    /// new value.
    async fn add(&self, key: &str, amount: i64) -> Result<i64, UsageError>;

    /// Current value of the counter, 0 if it was never written.
    async fn get(&self, key: &str) -> Result<i64, UsageError>;
}

pub struct UsageService {
    store: Arc<dyn UsageStore>,
}

impl UsageService {
    pub fn new(store: impl UsageStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Counts one successful command execution.
    pub async fn record_command(&self) -> Result<i64, UsageError> {
        self.store.add(TOTAL_COMMANDS_KEY, 1).await
    }

    pub async fn total_commands(&self) -> Result<i64, UsageError> {
        self.store.get(TOTAL_COMMANDS_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::usage::InMemoryUsageStore;

    #[tokio::test]
    async fn records_accumulate() {
        let service = UsageService::new(InMemoryUsageStore::new());

        assert_eq!(service.total_commands().await.unwrap(), 0);
        assert_eq!(service.record_command().await.unwrap(), 1);
        assert_eq!(service.record_command().await.unwrap(), 2);
        assert_eq!(service.total_commands().await.unwrap(), 2);
    }

    #[test]
    fn storage_errors_are_descriptive() {
        let err = UsageError::StorageError("database is locked".into());
        assert_eq!(err.to_string(), "Storage error: database is locked");
    }
}

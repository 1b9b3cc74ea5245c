// In-memory cooldown storage. Cooldowns are short-lived, so nothing here is
// persisted; a restart forgets every window.

use crate::core::cooldowns::CooldownStore;
use dashmap::DashMap;
use std::time::Instant;

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct UserCommandKey {
    user_id: u64,
    command: String,
}

/// Maps (user, command) to the instant the cooldown expires.
pub struct InMemoryCooldownStore {
    entries: DashMap<UserCommandKey, Instant>,
}

impl InMemoryCooldownStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl CooldownStore for InMemoryCooldownStore {
    fn expiry(&self, user_id: u64, command: &str) -> Option<Instant> {
        let key = UserCommandKey {
            user_id,
            command: command.to_string(),
        };
        self.entries.get(&key).map(|entry| *entry)
    }

    fn set_expiry(&self, user_id: u64, command: &str, expires_at: Instant) {
        let key = UserCommandKey {
            user_id,
            command: command.to_string(),
        };
        self.entries.insert(key, expires_at);
    }
}

impl Default for InMemoryCooldownStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cooldowns::{CooldownService, CooldownStatus};
    use std::time::Duration;

    #[test]
    fn stores_and_overwrites_expiry() {
        let store = InMemoryCooldownStore::new();
        let now = Instant::now();
        assert_eq!(store.expiry(1, "ping"), None);

        store.set_expiry(1, "ping", now);
        store.set_expiry(1, "ping", now + Duration::from_secs(3));
        assert_eq!(store.expiry(1, "ping"), Some(now + Duration::from_secs(3)));
        assert_eq!(store.entries.len(), 1);
    }

    #[test]
    fn works_behind_the_service() {
        let service = CooldownService::new(InMemoryCooldownStore::new());
        let cooldown = Duration::from_secs(60);

        assert_eq!(service.check(5, "stats", cooldown), CooldownStatus::Ready);
        assert!(matches!(
            service.check(5, "stats", cooldown),
            CooldownStatus::OnCooldown(remaining) if remaining <= cooldown
        ));
    }
}

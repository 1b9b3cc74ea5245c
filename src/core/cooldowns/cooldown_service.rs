// Per-user, per-command cooldowns.
//
// Same shape as the other core services: a storage port plus a service that
// owns the rules. Entries only live in memory; a restart clears them.

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Storage for cooldown expiry times, keyed by (user, command).
pub trait CooldownStore: Send + Sync {
    fn expiry(&self, user_id: u64, command: &str) -> Option<Instant>;

    fn set_expiry(&self, user_id: u64, command: &str, expires_at: Instant);
}

/// Result of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// The invocation may proceed; a new window has been started if the
    /// command has a cooldown.
    Ready,
    /// Still throttled for the given duration.
    OnCooldown(Duration),
}

pub struct CooldownService {
    store: Arc<dyn CooldownStore>,
}

impl CooldownService {
    pub fn new(store: impl CooldownStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Checks (and on success starts) a cooldown window using the current time.
    pub fn check(&self, user_id: u64, command: &str, cooldown: Duration) -> CooldownStatus {
        self.check_at(user_id, command, cooldown, Instant::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    ///
    /// A zero cooldown always passes and never writes an entry. An expired
    /// entry is simply overwritten by the new window.
    pub fn check_at(
        &self,
        user_id: u64,
        command: &str,
        cooldown: Duration,
        now: Instant,
    ) -> CooldownStatus {
        if cooldown.is_zero() {
            return CooldownStatus::Ready;
        }

        if let Some(expires_at) = self.store.expiry(user_id, command) {
            if now < expires_at {
                return CooldownStatus::OnCooldown(expires_at - now);
            }
        }

        self.store.set_expiry(user_id, command, now + cooldown);
        CooldownStatus::Ready
    }
}

/// Formats a remaining duration as whole seconds, rounding up so users never
/// see "0s".
pub fn remaining_seconds(remaining: Duration) -> u64 {
    let secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}

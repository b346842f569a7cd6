//! State lock record
//!
//! A lock marks the state as in use by one `fmg` run. It carries enough to
//! tell an operator who holds it, and expires so that a crashed run does not
//! block the next one forever.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds a lock stays valid without being released
pub const DEFAULT_LOCK_TTL_SECS: i64 = 900;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    pub id: String,
    /// Command holding the lock ("apply", "destroy", "import")
    pub operation: String,
    /// user@host of the holder
    pub owner: String,
    pub acquired: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(operation: impl Into<String>) -> Self {
        Self::with_ttl(operation, Duration::seconds(DEFAULT_LOCK_TTL_SECS))
    }

    pub fn with_ttl(operation: impl Into<String>, ttl: Duration) -> Self {
        let acquired = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            operation: operation.into(),
            owner: lock_owner(),
            acquired,
            expires: acquired + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} since {} (lock ID: {})",
            self.operation,
            self.owner,
            self.acquired.format("%Y-%m-%d %H:%M:%S UTC"),
            self.id
        )
    }
}

fn lock_owner() -> String {
    let user = ["USER", "USERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .unwrap_or_else(|| "unknown".to_string());
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}@{}", user, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lock_is_live() {
        let lock = LockInfo::new("apply");
        assert_eq!(lock.operation, "apply");
        assert!(lock.owner.contains('@'));
        assert_eq!((lock.expires - lock.acquired).num_seconds(), DEFAULT_LOCK_TTL_SECS);
        assert!(!lock.is_expired());
    }

    #[test]
    fn lock_expires_after_ttl() {
        let lock = LockInfo::with_ttl("import", Duration::seconds(30));
        assert!(!lock.is_expired_at(lock.acquired + Duration::seconds(29)));
        assert!(lock.is_expired_at(lock.acquired + Duration::seconds(30)));
    }

    #[test]
    fn display_names_holder() {
        let mut lock = LockInfo::new("destroy");
        lock.owner = "ops@jump1".to_string();
        lock.id = "abc".to_string();
        let text = lock.to_string();
        assert!(text.starts_with("destroy by ops@jump1 since "), "{}", text);
        assert!(text.ends_with("(lock ID: abc)"), "{}", text);
    }

    #[test]
    fn lock_file_round_trip() {
        let lock = LockInfo::new("apply");
        let json = serde_json::to_string(&lock).unwrap();
        assert_eq!(serde_json::from_str::<LockInfo>(&json).unwrap(), lock);
    }
}

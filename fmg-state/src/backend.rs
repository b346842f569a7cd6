//! Storage seam for the state file

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use fmg_core::resource::Value;
use thiserror::Error;

use crate::lock::LockInfo;
use crate::state::StateFile;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Another run holds a live lock
    #[error("State is locked: {0}")]
    Locked(Box<LockInfo>),

    #[error("No state lock is held (lock ID: {0})")]
    LockNotFound(String),

    #[error("State lock is held under ID {actual}, not {expected}")]
    LockMismatch { expected: String, actual: String },

    #[error("Unsupported backend type: {0}")]
    UnsupportedBackend(String),

    #[error("Backend configuration error: {0}")]
    Configuration(String),

    /// The file exists but does not hold a state or lock record
    #[error("{} is not a valid fmg file: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    /// The stored state belongs to a different lineage
    #[error("State lineage mismatch: expected {expected}, got {actual}")]
    LineageMismatch { expected: String, actual: String },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

impl BackendError {
    pub fn locked(lock: &LockInfo) -> Self {
        Self::Locked(Box::new(lock.clone()))
    }

    pub fn unsupported_backend(backend_type: impl Into<String>) -> Self {
        Self::UnsupportedBackend(backend_type.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Where the state file and its lock live.
///
/// Callers hold the lock across read, modify and write.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// `None` before the first write
    async fn read_state(&self) -> BackendResult<Option<StateFile>>;

    /// Replace the stored state. Fails on a lineage change.
    async fn write_state(&self, state: &StateFile) -> BackendResult<()>;

    /// Take the lock for `operation`; an expired lock is taken over
    async fn acquire_lock(&self, operation: &str) -> BackendResult<LockInfo>;

    /// Release a lock taken by this run
    async fn release_lock(&self, lock: &LockInfo) -> BackendResult<()>;

    /// Remove a lock left behind by another run
    async fn force_unlock(&self, lock_id: &str) -> BackendResult<()>;

    /// Prepare the storage location
    async fn init(&self) -> BackendResult<()>;
}

/// The `[backend]` table of a manifest
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub backend_type: String,
    pub attributes: HashMap<String, Value>,
}

impl BackendConfig {
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Reject attributes the backend does not know
    pub fn check_keys(&self, known: &[&str]) -> BackendResult<()> {
        let mut unknown: Vec<&str> = self
            .attributes
            .keys()
            .map(String::as_str)
            .filter(|k| !known.contains(k))
            .collect();
        unknown.sort_unstable();
        match unknown.first() {
            None => Ok(()),
            Some(key) => Err(BackendError::configuration(format!(
                "unknown {} backend setting '{}'",
                self.backend_type, key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, Value)]) -> BackendConfig {
        BackendConfig {
            backend_type: "local".to_string(),
            attributes: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn locked_error_names_holder() {
        let mut lock = LockInfo::new("apply");
        lock.owner = "ops@jump1".to_string();
        let error = BackendError::locked(&lock);
        assert!(
            error.to_string().starts_with("State is locked: apply by ops@jump1"),
            "{}",
            error
        );
    }

    #[test]
    fn io_error_names_path() {
        let error = BackendError::io(
            "read",
            "/var/lib/fmg/fmg.state.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            error.to_string(),
            "Failed to read /var/lib/fmg/fmg.state.json: denied"
        );
    }

    #[test]
    fn get_string_ignores_other_types() {
        let config = config(&[("path", Value::from("a.json")), ("retries", Value::Int(2))]);
        assert_eq!(config.get_string("path"), Some("a.json"));
        assert_eq!(config.get_string("retries"), None);
    }

    #[test]
    fn check_keys_rejects_unknown_setting() {
        let config = config(&[("path", Value::from("a.json")), ("bucket", Value::from("x"))]);
        assert!(config.check_keys(&["path", "bucket"]).is_ok());
        assert_eq!(
            config.check_keys(&["path"]).unwrap_err().to_string(),
            "Backend configuration error: unknown local backend setting 'bucket'"
        );
    }
}

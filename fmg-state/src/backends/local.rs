//! State in a JSON file on local disk
//!
//! `fmg.state.json` holds the state, `fmg.state.lock` the lock. Writes go
//! through a temporary file and a rename, and the previous state is kept as
//! `fmg.state.json.backup`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::backend::{BackendConfig, BackendError, BackendResult, StateBackend};
use crate::lock::LockInfo;
use crate::state::StateFile;

pub struct LocalBackend {
    state_path: PathBuf,
    lock_path: PathBuf,
}

impl LocalBackend {
    pub const DEFAULT_STATE_FILE: &'static str = "fmg.state.json";

    const SETTINGS: &'static [&'static str] = &["path"];

    pub fn new() -> Self {
        Self::with_path(PathBuf::from(Self::DEFAULT_STATE_FILE))
    }

    pub fn with_path(state_path: PathBuf) -> Self {
        let lock_path = state_path.with_extension("lock");
        Self {
            state_path,
            lock_path,
        }
    }

    /// Settings: `path` (default `fmg.state.json`)
    pub fn from_config(config: &BackendConfig) -> BackendResult<Self> {
        config.check_keys(Self::SETTINGS)?;
        let path = config
            .get_string("path")
            .unwrap_or(Self::DEFAULT_STATE_FILE);
        if path.is_empty() {
            return Err(BackendError::configuration("local backend path is empty"));
        }
        Ok(Self::with_path(PathBuf::from(path)))
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.state_path.as_os_str().to_owned();
        name.push(".backup");
        PathBuf::from(name)
    }

    async fn read_lock(&self) -> BackendResult<Option<LockInfo>> {
        let Some(content) = read_optional(&self.lock_path).await? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| BackendError::Corrupt {
                path: self.lock_path.clone(),
                message: e.to_string(),
            })
    }

    /// Create the lock file; `false` when it already exists
    async fn create_lock_file(&self, lock: &LockInfo) -> BackendResult<bool> {
        let content = serde_json::to_vec_pretty(lock)?;
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.lock_path)
            .await;
        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(BackendError::io("create", &self.lock_path, e)),
        };
        file.write_all(&content)
            .await
            .map_err(|e| BackendError::io("write", &self.lock_path, e))?;
        file.flush()
            .await
            .map_err(|e| BackendError::io("write", &self.lock_path, e))?;
        Ok(true)
    }

    async fn remove_lock_file(&self) -> BackendResult<()> {
        fs::remove_file(&self.lock_path)
            .await
            .map_err(|e| BackendError::io("remove", &self.lock_path, e))
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_optional(path: &Path) -> BackendResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(BackendError::io("read", path, e)),
    }
}

#[async_trait]
impl StateBackend for LocalBackend {
    async fn read_state(&self) -> BackendResult<Option<StateFile>> {
        let Some(content) = read_optional(&self.state_path).await? else {
            return Ok(None);
        };
        let state: StateFile =
            serde_json::from_str(&content).map_err(|e| BackendError::Corrupt {
                path: self.state_path.clone(),
                message: e.to_string(),
            })?;
        if state.version > StateFile::CURRENT_VERSION {
            return Err(BackendError::Corrupt {
                path: self.state_path.clone(),
                message: format!(
                    "state version {} is newer than supported version {}",
                    state.version,
                    StateFile::CURRENT_VERSION
                ),
            });
        }
        Ok(Some(state))
    }

    async fn write_state(&self, state: &StateFile) -> BackendResult<()> {
        if let Some(existing) = self.read_state().await? {
            if existing.lineage != state.lineage {
                return Err(BackendError::LineageMismatch {
                    expected: existing.lineage,
                    actual: state.lineage.clone(),
                });
            }
            let backup = self.backup_path();
            fs::copy(&self.state_path, &backup)
                .await
                .map_err(|e| BackendError::io("back up", &backup, e))?;
        }

        let content = serde_json::to_string_pretty(state)?;
        let tmp = self.state_path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| BackendError::io("write", &tmp, e))?;
        fs::rename(&tmp, &self.state_path)
            .await
            .map_err(|e| BackendError::io("replace", &self.state_path, e))?;

        debug!(
            "wrote state serial {} to {}",
            state.serial,
            self.state_path.display()
        );
        Ok(())
    }

    async fn acquire_lock(&self, operation: &str) -> BackendResult<LockInfo> {
        let lock = LockInfo::new(operation);
        if self.create_lock_file(&lock).await? {
            debug!("acquired state lock {} for {}", lock.id, operation);
            return Ok(lock);
        }

        match self.read_lock().await {
            Ok(Some(existing)) if !existing.is_expired() => {
                return Err(BackendError::locked(&existing));
            }
            Ok(Some(existing)) => warn!("taking over expired state lock: {}", existing),
            Ok(None) => {}
            Err(BackendError::Corrupt { .. }) => warn!(
                "replacing unreadable lock file {}",
                self.lock_path.display()
            ),
            Err(e) => return Err(e),
        }

        match fs::remove_file(&self.lock_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(BackendError::io("remove", &self.lock_path, e)),
        }
        if self.create_lock_file(&lock).await? {
            debug!("acquired state lock {} for {}", lock.id, operation);
            return Ok(lock);
        }
        // Lost the race to another run
        match self.read_lock().await? {
            Some(existing) => Err(BackendError::locked(&existing)),
            None => Err(BackendError::LockNotFound(lock.id)),
        }
    }

    async fn release_lock(&self, lock: &LockInfo) -> BackendResult<()> {
        let existing = self
            .read_lock()
            .await?
            .ok_or_else(|| BackendError::LockNotFound(lock.id.clone()))?;
        if existing.id != lock.id {
            return Err(BackendError::LockMismatch {
                expected: lock.id.clone(),
                actual: existing.id,
            });
        }
        self.remove_lock_file().await?;
        debug!("released state lock {}", lock.id);
        Ok(())
    }

    async fn force_unlock(&self, lock_id: &str) -> BackendResult<()> {
        match self.read_lock().await {
            Ok(None) => return Err(BackendError::LockNotFound(lock_id.to_string())),
            Ok(Some(existing)) if existing.id != lock_id => {
                return Err(BackendError::LockMismatch {
                    expected: lock_id.to_string(),
                    actual: existing.id,
                });
            }
            // An unreadable lock can always be removed
            Ok(Some(_)) | Err(BackendError::Corrupt { .. }) => {}
            Err(e) => return Err(e),
        }
        self.remove_lock_file().await
    }

    async fn init(&self) -> BackendResult<()> {
        match self.state_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| BackendError::io("create", dir, e)),
            _ => Ok(()),
        }
    }
}

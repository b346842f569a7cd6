//! Persistent record of the objects `fmg` manages on FortiManager.
//!
//! For each manifest resource the state keeps the remote identifier (the
//! singleton name or the object key) and the attributes last read back. A
//! run takes the lock, reads the state, applies changes and writes the
//! state back with a bumped serial:
//!
//! ```no_run
//! # async fn run() -> Result<(), fmg_state::BackendError> {
//! use std::collections::HashMap;
//! use fmg_state::{BackendConfig, create_backend};
//!
//! let config = BackendConfig {
//!     backend_type: "local".to_string(),
//!     attributes: HashMap::new(),
//! };
//! let backend = create_backend(&config).await?;
//! let lock = backend.acquire_lock("apply").await?;
//! let mut state = backend.read_state().await?.unwrap_or_default();
//! state.increment_serial();
//! backend.write_state(&state).await?;
//! backend.release_lock(&lock).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod lock;
pub mod state;

pub use backend::{BackendConfig, BackendError, BackendResult, StateBackend};
pub use backends::{LocalBackend, create_backend};
pub use lock::LockInfo;
pub use state::{ResourceState, StateFile};

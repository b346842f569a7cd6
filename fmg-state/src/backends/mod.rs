//! Concrete state backends

mod local;

pub use local::LocalBackend;

use crate::backend::{BackendConfig, BackendError, BackendResult, StateBackend};

/// Open the backend named by `config.backend_type` and prepare its storage.
///
/// Only `local` exists today.
pub async fn create_backend(config: &BackendConfig) -> BackendResult<Box<dyn StateBackend>> {
    let backend: Box<dyn StateBackend> = match config.backend_type.as_str() {
        "local" => Box::new(LocalBackend::from_config(config)?),
        other => return Err(BackendError::unsupported_backend(other)),
    };
    backend.init().await?;
    Ok(backend)
}

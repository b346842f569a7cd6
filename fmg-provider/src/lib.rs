//! FMG FortiManager Provider
//!
//! Manages FortiGate device settings and ADOM objects through the
//! FortiManager JSON-RPC API.
//!
//! ## Module Structure
//!
//! - `client` - JSON-RPC transport, sessions and workspace locks
//! - `config` - Provider settings from the manifest and environment
//! - `provider` - FmgProvider implementation
//! - `schemas` - Generated resource schemas
//! - `utils` - URL template helpers

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod schemas;
pub mod utils;

// Re-export main types
pub use client::FortiClient;
pub use config::{ProviderConfig, ProviderSettings};
pub use error::Error;
pub use provider::FmgProvider;

use std::collections::HashMap;

use fmg_core::provider::{BoxFuture, Provider, ProviderResult};
use fmg_core::resource::{Resource, ResourceId, State, Value};

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for FmgProvider {
    fn name(&self) -> &'static str {
        "fortimanager"
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
        attributes: &HashMap<String, Value>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        let attributes = attributes.clone();
        Box::pin(async move {
            self.read_resource(&id, identifier.as_deref(), &attributes)
                .await
        })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        _from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let to = to.clone();
        Box::pin(async move { self.update_resource(id, &identifier, to).await })
    }

    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        attributes: &HashMap<String, Value>,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let attributes = attributes.clone();
        Box::pin(async move { self.delete_resource(&id, &identifier, &attributes).await })
    }
}

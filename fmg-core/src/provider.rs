//! The seam between the lifecycle engine and a management API
//!
//! The interpreter only knows this trait; `fmg-provider` implements it on top
//! of FortiManager JSON-RPC.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::resource::{Resource, ResourceId, State, Value};

/// A failed provider call, optionally tagged with the resource it concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub message: String,
    pub resource_id: Option<ResourceId>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource_id {
            Some(id) => write!(f, "[{}] {}", id, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resource_id: None,
        }
    }

    /// Tag with `id` unless already tagged
    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id.get_or_insert(id);
        self
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// CRUD against one management endpoint.
///
/// Each call is a single attempt; retries are left to the caller.
pub trait Provider: Send + Sync {
    /// Recorded in the state file next to each resource
    fn name(&self) -> &'static str;

    /// Fetch the live object.
    ///
    /// `identifier` is the one recorded by an earlier create or read. Without
    /// it, singletons are read under their fixed name and keyed objects under
    /// the key found in `attributes`. `attributes` also carry scope such as
    /// `device_name`. A missing object yields [`State::not_found`].
    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
        attributes: &HashMap<String, Value>,
    ) -> BoxFuture<'_, ProviderResult<State>>;

    /// Create the object and return it as read back, identifier set
    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>>;

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>>;

    /// `attributes` are the last recorded ones, for scope
    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        attributes: &HashMap<String, Value>,
    ) -> BoxFuture<'_, ProviderResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names_resource() {
        let err = ProviderError::new("Error reading System DNS resource: timeout")
            .for_resource(ResourceId::new("system_dns", "dns"));
        assert_eq!(
            err.to_string(),
            "[system_dns.dns] Error reading System DNS resource: timeout"
        );
    }

    #[test]
    fn untagged_error_is_bare_message() {
        assert_eq!(ProviderError::new("no session").to_string(), "no session");
    }

    #[test]
    fn first_tag_wins() {
        let err = ProviderError::new("boom")
            .for_resource(ResourceId::new("router_static", "inner"))
            .for_resource(ResourceId::new("router_static", "outer"));
        assert_eq!(err.resource_id.unwrap().name, "inner");
    }
}

//! What `fmg` has recorded about the objects it manages

use std::collections::HashMap;

use fmg_core::resource::{ResourceId, State, Value};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// The persisted record.
///
/// `resources` keeps creation order; destroy walks it backwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    /// Bumped on every write
    pub serial: u64,
    /// Fixed when the file is first created
    pub lineage: String,
    /// Tool version of the last writer
    pub fmg_version: String,
    pub resources: Vec<ResourceState>,
}

impl StateFile {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            serial: 0,
            lineage: uuid::Uuid::new_v4().to_string(),
            fmg_version: env!("CARGO_PKG_VERSION").to_string(),
            resources: Vec::new(),
        }
    }

    /// Stamp the file for the next write
    pub fn increment_serial(&mut self) {
        self.serial += 1;
        env!("CARGO_PKG_VERSION").clone_into(&mut self.fmg_version);
    }

    fn position(&self, resource_type: &str, name: &str) -> Option<usize> {
        self.resources
            .iter()
            .position(|r| r.resource_type == resource_type && r.name == name)
    }

    pub fn find_resource(&self, resource_type: &str, name: &str) -> Option<&ResourceState> {
        self.position(resource_type, name)
            .map(|index| &self.resources[index])
    }

    /// Replace the entry in place, or append it
    pub fn upsert_resource(&mut self, resource: ResourceState) {
        match self.position(&resource.resource_type, &resource.name) {
            Some(index) => self.resources[index] = resource,
            None => self.resources.push(resource),
        }
    }

    pub fn remove_resource(&mut self, resource_type: &str, name: &str) -> Option<ResourceState> {
        self.position(resource_type, name)
            .map(|index| self.resources.remove(index))
    }

    /// Every entry as a provider state, for planning
    pub fn states(&self) -> HashMap<ResourceId, State> {
        self.resources
            .iter()
            .map(|r| (r.id(), r.to_state()))
            .collect()
    }

    /// Record a state returned by the provider; a missing object drops the entry
    pub fn apply_state(&mut self, state: &State, provider: &str) {
        if state.exists {
            self.upsert_resource(ResourceState::from_state(state, provider));
        } else {
            self.remove_resource(&state.id.resource_type, &state.id.name);
        }
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}

/// One managed object.
///
/// Attributes are stored as plain JSON so the file stays readable and
/// independent of the in-memory value type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceState {
    pub resource_type: String,
    /// Name given in the manifest
    pub name: String,
    pub provider: String,
    /// `SystemGlobal`-style name for singletons, the key value otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub attributes: HashMap<String, Json>,
}

impl ResourceState {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            provider: provider.into(),
            identifier: None,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Json) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn id(&self) -> ResourceId {
        ResourceId::new(&self.resource_type, &self.name)
    }

    pub fn from_state(state: &State, provider: &str) -> Self {
        let attributes = state
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Self {
            resource_type: state.id.resource_type.clone(),
            name: state.id.name.clone(),
            provider: provider.to_string(),
            identifier: state.identifier.clone(),
            attributes,
        }
    }

    /// JSON nulls are dropped
    pub fn to_state(&self) -> State {
        let attributes = self
            .attributes
            .iter()
            .filter_map(|(key, value)| Value::from_json(value).map(|v| (key.clone(), v)))
            .collect();
        let mut state = State::existing(self.id(), attributes);
        state.identifier = self.identifier.clone();
        state
    }
}

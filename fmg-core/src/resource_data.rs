//! ResourceData - The per-call handle on a resource's attributes and ID
//!
//! Providers read configuration from it, and refresh it field by field from
//! an API response. Setting an attribute checks the value against the schema
//! so the caller can retry with a patched value.

use std::collections::HashMap;

use crate::resource::{Resource, ResourceId, State, Value};
use crate::schema::{ResourceSchema, TypeError};

/// Error returned by [`ResourceData::set`]
#[derive(Debug, Clone, thiserror::Error)]
pub enum SetError {
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("invalid value for '{name}': {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: TypeError,
    },
}

/// Attributes of one resource plus its remote identifier
#[derive(Debug, Clone)]
pub struct ResourceData<'a> {
    schema: &'a ResourceSchema,
    id: Option<String>,
    attributes: HashMap<String, Value>,
}

impl<'a> ResourceData<'a> {
    pub fn new(schema: &'a ResourceSchema) -> Self {
        Self {
            schema,
            id: None,
            attributes: HashMap::new(),
        }
    }

    /// Seed from desired configuration
    pub fn from_resource(schema: &'a ResourceSchema, resource: &Resource) -> Self {
        Self {
            schema,
            id: None,
            attributes: resource.attributes.clone(),
        }
    }

    /// Seed from a previously read state
    pub fn from_state(schema: &'a ResourceSchema, state: &State) -> Self {
        Self {
            schema,
            id: state.identifier.clone(),
            attributes: state.attributes.clone(),
        }
    }

    pub fn schema(&self) -> &'a ResourceSchema {
        self.schema
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the remote identifier. An empty string clears it.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
    }

    /// Clear the identifier: the resource no longer exists remotely
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Value if present and non-empty
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_empty())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_ok(key).and_then(Value::as_str)
    }

    /// Set an attribute after checking it against the schema
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), SetError> {
        let schema = self
            .schema
            .get(key)
            .ok_or_else(|| SetError::UnknownAttribute(key.to_string()))?;
        schema
            .attr_type
            .validate(&value)
            .map_err(|source| SetError::InvalidValue {
                name: key.to_string(),
                source,
            })?;
        self.attributes.insert(key.to_string(), value);
        Ok(())
    }

    /// Drop an attribute (the device no longer reports it)
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Convert into a State; a cleared ID yields a not-found state
    pub fn into_state(self, id: ResourceId) -> State {
        match self.id {
            Some(identifier) => State::existing(id, self.attributes).with_identifier(identifier),
            None => State::not_found(id),
        }
    }
}

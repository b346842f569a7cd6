//! Effect - A side effect described as a value
//!
//! Nothing happens until an Effect is handed to the Interpreter.

use std::collections::HashMap;

use crate::resource::{Resource, ResourceId, State, Value};

/// A single operation against the provider
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Refresh a resource's state
    Read(ResourceId),
    /// Create a resource
    Create(Resource),
    /// Update a resource in place
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
        /// Attributes whose desired value differs from the current one
        changed_attributes: Vec<String>,
    },
    /// Delete a resource by its remote identifier
    Delete {
        id: ResourceId,
        identifier: String,
        /// Last known attributes, carrying scope such as the device name
        attributes: HashMap<String, Value>,
    },
}

impl Effect {
    /// Whether executing this effect changes the device
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Effect::Read(_))
    }

    pub fn resource_id(&self) -> &ResourceId {
        match self {
            Effect::Read(id) => id,
            Effect::Create(r) => &r.id,
            Effect::Update { id, .. } => id,
            Effect::Delete { id, .. } => id,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Read(id) => write!(f, "Read {}", id),
            Effect::Create(r) => write!(f, "Create {}", r.id),
            Effect::Update { id, .. } => write!(f, "Update {}", id),
            Effect::Delete { id, .. } => write!(f, "Delete {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_is_not_mutating() {
        assert!(!Effect::Read(ResourceId::new("system_dns", "dns")).is_mutating());
        assert!(Effect::Create(Resource::new("system_dns", "dns")).is_mutating());
    }

    #[test]
    fn display_names_resource() {
        let effect = Effect::Delete {
            id: ResourceId::new("firewall_dnstranslation", "web"),
            identifier: "3".to_string(),
            attributes: HashMap::new(),
        };
        assert_eq!(effect.to_string(), "Delete firewall_dnstranslation.web");
    }
}

//! FortiManager resource schema definitions

pub mod generated;

use fmg_core::schema::ResourceSchema;

pub use generated::{FmgSchemaConfig, Identity, Scope};

/// Returns all FortiManager schemas
/// Auto-generated from FortiManager object definitions
pub fn all_schemas() -> Vec<ResourceSchema> {
    generated::schemas()
}

/// Find the schema config for a resource type (e.g., "system_global")
pub fn find_config(resource_type: &str) -> Option<FmgSchemaConfig> {
    generated::configs()
        .into_iter()
        .find(|c| c.schema.resource_type == resource_type)
}

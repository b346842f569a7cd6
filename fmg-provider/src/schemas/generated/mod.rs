//! Generated FortiManager resource schemas
//!
//! The per-resource modules are generated from `fmg-codegen/definitions`
//! by `./scripts/generate-schemas.sh`; this module holds what they share.

use fmg_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// FortiManager schema configuration
///
/// Combines the generated ResourceSchema with the JSON-RPC location of the
/// object and how it is identified.
pub struct FmgSchemaConfig {
    /// URL template (e.g., "/pm/config/device/{device}/global/system/global").
    /// Keyed objects append "/{key}" for read, update and delete.
    pub api_path: &'static str,
    /// Name used in error messages (e.g., "SystemGlobal")
    pub display_name: &'static str,
    pub identity: Identity,
    pub scope: Scope,
    /// The resource schema with attribute definitions
    pub schema: ResourceSchema,
}

/// How the remote object is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// One object per device; the ID is fixed
    Singleton(&'static str),
    /// One of many table entries, keyed by an attribute
    Key { attribute: &'static str },
}

/// Which path parameters the URL template takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `{device}`
    Device,
    /// `{device}` and `{vdom}`
    DeviceVdom,
    /// `{adom}`, either `adom/<name>` or `global`
    Adom,
}

/// Attributes that steer the request instead of being sent as fields
pub const META_ATTRIBUTES: &[&str] = &[
    "device_name",
    "device_vdom",
    "adom",
    "scopetype",
    "dynamic_sort_subtable",
];

pub fn is_meta_attribute(name: &str) -> bool {
    META_ATTRIBUTES.contains(&name)
}

/// FortiOS on/off switch
pub fn enable_disable() -> AttributeType {
    AttributeType::enumeration(&["enable", "disable"])
}

/// Add the scope and sorting attributes every resource accepts
pub fn with_meta_attributes(schema: ResourceSchema, scope: Scope) -> ResourceSchema {
    let schema = schema.attribute(
        AttributeSchema::new(
            "dynamic_sort_subtable",
            AttributeType::enumeration(&["false", "true", "natural"]),
        )
        .with_default("false".into())
        .with_description("Sort table rows on read: false, true (lexical) or natural."),
    );

    match scope {
        Scope::Device => schema.attribute(device_name()),
        Scope::DeviceVdom => schema.attribute(device_name()).attribute(
            AttributeSchema::new("device_vdom", AttributeType::String)
                .force_new()
                .with_description("Virtual domain; defaults to the provider vdom."),
        ),
        Scope::Adom => schema
            .attribute(
                AttributeSchema::new("adom", AttributeType::String)
                    .force_new()
                    .with_description("ADOM name; defaults to the provider adom."),
            )
            .attribute(
                AttributeSchema::new(
                    "scopetype",
                    AttributeType::enumeration(&["inherit", "adom", "global"]),
                )
                .force_new()
                .with_default("inherit".into())
                .with_description("Where the object lives: inherit, adom or global."),
            ),
    }
}

fn device_name() -> AttributeSchema {
    AttributeSchema::new("device_name", AttributeType::String)
        .force_new()
        .with_description("Managed device; defaults to the provider device_name.")
}

pub mod firewall_dnstranslation;
pub mod object_firewall_address;
pub mod object_firewall_addrgrp;
pub mod router_ospf;
pub mod router_static;
pub mod system_dns;
pub mod system_global;
pub mod system_ntp;

/// Returns all generated schema configs
pub fn configs() -> Vec<FmgSchemaConfig> {
    vec![
        system_global::system_global_config(),
        system_dns::system_dns_config(),
        system_ntp::system_ntp_config(),
        router_ospf::router_ospf_config(),
        router_static::router_static_config(),
        firewall_dnstranslation::firewall_dnstranslation_config(),
        object_firewall_address::object_firewall_address_config(),
        object_firewall_addrgrp::object_firewall_addrgrp_config(),
    ]
}

/// Returns all generated schemas
pub fn schemas() -> Vec<ResourceSchema> {
    configs().into_iter().map(|c| c.schema).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_config_has_unique_type() {
        let configs = configs();
        let mut names: Vec<&str> = configs
            .iter()
            .map(|c| c.schema.resource_type.as_str())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), configs.len());
    }

    #[test]
    fn key_attributes_exist_in_schema() {
        for config in configs() {
            if let Identity::Key { attribute } = config.identity {
                assert!(
                    config.schema.get(attribute).is_some(),
                    "{} lacks key {}",
                    config.schema.resource_type,
                    attribute
                );
            }
        }
    }

    #[test]
    fn path_parameters_match_scope() {
        for config in configs() {
            let path = config.api_path;
            match config.scope {
                Scope::Device => {
                    assert!(path.contains("{device}") && !path.contains("{vdom}"), "{}", path)
                }
                Scope::DeviceVdom => {
                    assert!(path.contains("{device}") && path.contains("{vdom}"), "{}", path)
                }
                Scope::Adom => assert!(path.contains("{adom}"), "{}", path),
            }
        }
    }

    #[test]
    fn meta_attributes_follow_scope() {
        let adom = with_meta_attributes(ResourceSchema::new("x"), Scope::Adom);
        assert!(adom.get("scopetype").is_some());
        assert!(adom.get("device_name").is_none());

        let vdom = with_meta_attributes(ResourceSchema::new("y"), Scope::DeviceVdom);
        assert!(vdom.get("device_vdom").is_some());
        assert!(vdom.get("dynamic_sort_subtable").is_some());
    }
}

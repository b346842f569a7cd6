//! object_firewall_addrgrp schema definition for FortiManager
//!
//! Auto-generated from object definition: obj/firewall/addrgrp
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema};

/// Returns the schema config for object_firewall_addrgrp (ObjectFirewallAddrgrp)
pub fn object_firewall_addrgrp_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/{adom}/obj/firewall/addrgrp",
        display_name: "ObjectFirewallAddrgrp",
        identity: Identity::Key { attribute: "name" },
        scope: Scope::Adom,
        schema: with_meta_attributes(
            ResourceSchema::new("object_firewall_addrgrp")
            .with_description("Configure IPv4 address groups.")
            .attribute(
                AttributeSchema::new("allow_routing", enable_disable())
                    .computed()
                    .with_description("Enable/disable use of this group in the static route configuration."),
            )
            .attribute(
                AttributeSchema::new("category", AttributeType::enumeration(&["default", "ztna-ems-tag", "ztna-geo-tag"]))
                    .computed()
                    .with_description("Address group category."),
            )
            .attribute(
                AttributeSchema::new("color", AttributeType::Int)
                    .computed()
                    .with_description("Color of icon on the GUI."),
            )
            .attribute(
                AttributeSchema::new("comment", AttributeType::String)
                    .computed()
                    .with_description("Comment."),
            )
            .attribute(
                AttributeSchema::new("exclude", enable_disable())
                    .computed()
                    .with_description("Enable/disable address exclusion."),
            )
            .attribute(
                AttributeSchema::new("exclude_member", AttributeType::string_set())
                    .computed()
                    .with_description("Address exclusion member."),
            )
            .attribute(
                AttributeSchema::new("fabric_object", enable_disable())
                    .computed()
                    .with_description("Security Fabric global object setting."),
            )
            .attribute(
                AttributeSchema::new("member", AttributeType::string_set())
                    .computed()
                    .with_description("Address objects contained within the group."),
            )
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .force_new()
                    .with_description("Address group name."),
            )
            .attribute(
                AttributeSchema::new("tagging", BlockSchema::new()
                    .with_mkey("name")
                    .attribute(
                        AttributeSchema::new("category", AttributeType::String)
                            .computed()
                            .with_description("Tag category."),
                    )
                    .attribute(
                        AttributeSchema::new("name", AttributeType::String)
                            .computed()
                            .with_description("Tagging entry name."),
                    )
                    .attribute(
                        AttributeSchema::new("tags", AttributeType::string_set())
                            .computed()
                            .with_description("Tags."),
                    )
                    .into_type())
                    .with_description("Config object tagging."),
            )
            .attribute(
                AttributeSchema::new("type", AttributeType::enumeration(&["default", "folder"]))
                    .computed()
                    .with_description("Address group type."),
            )
            .attribute(
                AttributeSchema::new("uuid", AttributeType::String)
                    .read_only()
                    .with_description("Universally Unique Identifier."),
            ),
            Scope::Adom,
        ),
    }
}

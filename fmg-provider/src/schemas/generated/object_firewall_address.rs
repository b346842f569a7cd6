//! object_firewall_address schema definition for FortiManager
//!
//! Auto-generated from object definition: obj/firewall/address
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema, types};

/// Returns the schema config for object_firewall_address (ObjectFirewallAddress)
pub fn object_firewall_address_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/{adom}/obj/firewall/address",
        display_name: "ObjectFirewallAddress",
        identity: Identity::Key { attribute: "name" },
        scope: Scope::Adom,
        schema: with_meta_attributes(
            ResourceSchema::new("object_firewall_address")
            .with_description("Configure IPv4 addresses.")
            .attribute(
                AttributeSchema::new("allow_routing", enable_disable())
                    .computed()
                    .with_description("Enable/disable use of this address in the static route configuration."),
            )
            .attribute(
                AttributeSchema::new("associated_interface", AttributeType::string_set())
                    .computed()
                    .with_description("Network interface associated with address."),
            )
            .attribute(
                AttributeSchema::new("cache_ttl", AttributeType::Int)
                    .computed()
                    .with_description("Defines the minimal TTL of individual IP addresses in FQDN cache measured in seconds."),
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
                AttributeSchema::new("country", AttributeType::String)
                    .computed()
                    .with_description("IP addresses associated to a specific country."),
            )
            .attribute(
                AttributeSchema::new("end_ip", types::ipv4())
                    .computed()
                    .with_description("Final IP address (inclusive) in the range for the address."),
            )
            .attribute(
                AttributeSchema::new("fabric_object", enable_disable())
                    .computed()
                    .with_description("Security Fabric global object setting."),
            )
            .attribute(
                AttributeSchema::new("fqdn", AttributeType::String)
                    .computed()
                    .with_description("Fully Qualified Domain Name address."),
            )
            .attribute(
                AttributeSchema::new("interface", AttributeType::String)
                    .computed()
                    .with_description("Name of interface whose IP address is to be used."),
            )
            .attribute(
                AttributeSchema::new("macaddr", AttributeType::string_set())
                    .computed()
                    .with_description("Multiple MAC address ranges."),
            )
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .force_new()
                    .with_description("Address name."),
            )
            .attribute(
                AttributeSchema::new("sdn", AttributeType::String)
                    .computed()
                    .with_description("SDN."),
            )
            .attribute(
                AttributeSchema::new("start_ip", types::ipv4())
                    .computed()
                    .with_description("First IP address (inclusive) in the range for the address."),
            )
            .attribute(
                AttributeSchema::new("subnet", types::ipv4_mask())
                    .computed()
                    .with_description("IP address and subnet mask of address."),
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
                AttributeSchema::new("type", AttributeType::enumeration(&["ipmask", "iprange", "fqdn", "wildcard", "geography", "wildcard-fqdn", "dynamic", "interface-subnet", "mac"]))
                    .computed()
                    .with_description("Type of address."),
            )
            .attribute(
                AttributeSchema::new("uuid", AttributeType::String)
                    .read_only()
                    .with_description("Universally Unique Identifier."),
            )
            .attribute(
                AttributeSchema::new("wildcard", types::ipv4_mask())
                    .computed()
                    .with_description("IP address and wildcard netmask."),
            ),
            Scope::Adom,
        ),
    }
}

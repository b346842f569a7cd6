//! router_static schema definition for FortiManager
//!
//! Auto-generated from object definition: router/static
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema config for router_static (RouterStatic)
pub fn router_static_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/device/{device}/vdom/{vdom}/router/static",
        display_name: "RouterStatic",
        identity: Identity::Key { attribute: "seq_num" },
        scope: Scope::DeviceVdom,
        schema: with_meta_attributes(
            ResourceSchema::new("router_static")
            .with_description("Configure IPv4 static routing tables.")
            .attribute(
                AttributeSchema::new("bfd", enable_disable())
                    .computed()
                    .with_description("Enable/disable Bidirectional Forwarding Detection (BFD)."),
            )
            .attribute(
                AttributeSchema::new("blackhole", enable_disable())
                    .computed()
                    .with_description("Enable/disable black hole."),
            )
            .attribute(
                AttributeSchema::new("comment", AttributeType::String)
                    .computed()
                    .with_description("Optional comments."),
            )
            .attribute(
                AttributeSchema::new("device", AttributeType::string_set())
                    .computed()
                    .with_description("Gateway out interface or tunnel."),
            )
            .attribute(
                AttributeSchema::new("distance", AttributeType::Int)
                    .computed()
                    .with_description("Administrative distance (1 - 255)."),
            )
            .attribute(
                AttributeSchema::new("dst", types::ipv4_mask())
                    .computed()
                    .with_description("Destination IP and mask for this route."),
            )
            .attribute(
                AttributeSchema::new("dynamic_gateway", enable_disable())
                    .computed()
                    .with_description("Enable use of dynamic gateway retrieved from a DHCP or PPP server."),
            )
            .attribute(
                AttributeSchema::new("gateway", types::ipv4())
                    .computed()
                    .with_description("Gateway IP for this route."),
            )
            .attribute(
                AttributeSchema::new("link_monitor_exempt", enable_disable())
                    .computed()
                    .with_description("Enable/disable withdrawal of this static route when link monitor or health check is down."),
            )
            .attribute(
                AttributeSchema::new("priority", AttributeType::Int)
                    .computed()
                    .with_description("Administrative priority (1 - 65535)."),
            )
            .attribute(
                AttributeSchema::new("sdwan_zone", AttributeType::string_set())
                    .computed()
                    .with_description("Choose SD-WAN Zone."),
            )
            .attribute(
                AttributeSchema::new("seq_num", AttributeType::Int)
                    .required()
                    .force_new()
                    .with_description("Sequence number."),
            )
            .attribute(
                AttributeSchema::new("src", types::ipv4_mask())
                    .computed()
                    .with_description("Source prefix for this route."),
            )
            .attribute(
                AttributeSchema::new("status", enable_disable())
                    .computed()
                    .with_description("Enable/disable this static route."),
            )
            .attribute(
                AttributeSchema::new("vrf", AttributeType::Int)
                    .computed()
                    .with_description("Virtual Routing Forwarding ID."),
            )
            .attribute(
                AttributeSchema::new("weight", AttributeType::Int)
                    .computed()
                    .with_description("Administrative weight (0 - 255)."),
            ),
            Scope::DeviceVdom,
        ),
    }
}

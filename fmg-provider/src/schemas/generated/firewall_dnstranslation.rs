//! firewall_dnstranslation schema definition for FortiManager
//!
//! Auto-generated from object definition: firewall/dnstranslation
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema config for firewall_dnstranslation (FirewallDnstranslation)
pub fn firewall_dnstranslation_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/device/{device}/vdom/{vdom}/firewall/dnstranslation",
        display_name: "FirewallDnstranslation",
        identity: Identity::Key { attribute: "fosid" },
        scope: Scope::DeviceVdom,
        schema: with_meta_attributes(
            ResourceSchema::new("firewall_dnstranslation")
            .with_description("Configure DNS translation.")
            .attribute(
                AttributeSchema::new("dst", types::ipv4())
                    .computed()
                    .with_description("IPv4 address or subnet on the external network to substitute for the resolved address in DNS query replies."),
            )
            .attribute(
                AttributeSchema::new("fosid", AttributeType::Int)
                    .required()
                    .force_new()
                    .with_description("ID.")
                    .with_provider_name("id"),
            )
            .attribute(
                AttributeSchema::new("netmask", types::ipv4())
                    .computed()
                    .with_description("If src and dst are subnets rather than single IP addresses, enter the netmask for both src and dst."),
            )
            .attribute(
                AttributeSchema::new("src", types::ipv4())
                    .computed()
                    .with_description("IPv4 address or subnet on the internal network to compare with the resolved address in DNS query replies."),
            ),
            Scope::DeviceVdom,
        ),
    }
}

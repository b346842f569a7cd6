//! system_dns schema definition for FortiManager
//!
//! Auto-generated from object definition: system/dns
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema config for system_dns (SystemDns)
pub fn system_dns_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/device/{device}/global/system/dns",
        display_name: "SystemDns",
        identity: Identity::Singleton("SystemDns"),
        scope: Scope::Device,
        schema: with_meta_attributes(
            ResourceSchema::new("system_dns")
            .with_description("Configure DNS.")
            .attribute(
                AttributeSchema::new("cache_notfound_responses", enable_disable())
                    .computed()
                    .with_description("Enable/disable response from the DNS server when a record is not in cache."),
            )
            .attribute(
                AttributeSchema::new("dns_cache_limit", AttributeType::Int)
                    .computed()
                    .with_description("Maximum number of records in the DNS cache."),
            )
            .attribute(
                AttributeSchema::new("dns_cache_ttl", AttributeType::Int)
                    .computed()
                    .with_description("Duration in seconds that the DNS cache retains information."),
            )
            .attribute(
                AttributeSchema::new("domain", AttributeType::string_set())
                    .computed()
                    .with_description("Search suffix list for hostname lookup."),
            )
            .attribute(
                AttributeSchema::new("fqdn_cache_ttl", AttributeType::Int)
                    .computed()
                    .with_description("FQDN cache time to live in seconds."),
            )
            .attribute(
                AttributeSchema::new("interface", AttributeType::String)
                    .computed()
                    .with_description("Specify outgoing interface to reach server."),
            )
            .attribute(
                AttributeSchema::new("interface_select_method", AttributeType::enumeration(&["auto", "sdwan", "specify"]))
                    .computed()
                    .with_description("Specify how to select outgoing interface to reach server."),
            )
            .attribute(
                AttributeSchema::new("ip6_primary", AttributeType::String)
                    .computed()
                    .with_description("Primary DNS server IPv6 address."),
            )
            .attribute(
                AttributeSchema::new("ip6_secondary", AttributeType::String)
                    .computed()
                    .with_description("Secondary DNS server IPv6 address."),
            )
            .attribute(
                AttributeSchema::new("primary", types::ipv4())
                    .computed()
                    .with_description("Primary DNS server IP address."),
            )
            .attribute(
                AttributeSchema::new("protocol", AttributeType::Set(Box::new(AttributeType::enumeration(&["cleartext", "dot", "doh"]))))
                    .computed()
                    .with_description("DNS transport protocols."),
            )
            .attribute(
                AttributeSchema::new("retry", AttributeType::Int)
                    .computed()
                    .with_description("Number of times to retry."),
            )
            .attribute(
                AttributeSchema::new("secondary", types::ipv4())
                    .computed()
                    .with_description("Secondary DNS server IP address."),
            )
            .attribute(
                AttributeSchema::new("server_hostname", AttributeType::string_set())
                    .computed()
                    .with_description("DNS server host name list."),
            )
            .attribute(
                AttributeSchema::new("source_ip", types::ipv4())
                    .computed()
                    .with_description("IP address used by the DNS server as its source IP."),
            )
            .attribute(
                AttributeSchema::new("ssl_certificate", AttributeType::String)
                    .computed()
                    .with_description("Name of local certificate for SSL connections."),
            )
            .attribute(
                AttributeSchema::new("timeout", AttributeType::Int)
                    .computed()
                    .with_description("DNS query timeout interval in seconds."),
            ),
            Scope::Device,
        ),
    }
}

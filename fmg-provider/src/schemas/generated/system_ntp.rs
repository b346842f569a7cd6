//! system_ntp schema definition for FortiManager
//!
//! Auto-generated from object definition: system/ntp
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema, types};

/// Returns the schema config for system_ntp (SystemNtp)
pub fn system_ntp_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/device/{device}/global/system/ntp",
        display_name: "SystemNtp",
        identity: Identity::Singleton("SystemNtp"),
        scope: Scope::Device,
        schema: with_meta_attributes(
            ResourceSchema::new("system_ntp")
            .with_description("Configure system NTP information.")
            .attribute(
                AttributeSchema::new("interface", AttributeType::string_set())
                    .computed()
                    .with_description("FortiGate interface(s) with NTP server mode enabled."),
            )
            .attribute(
                AttributeSchema::new("ntpserver", BlockSchema::new()
                    .with_mkey("id")
                    .attribute(
                        AttributeSchema::new("authentication", enable_disable())
                            .computed()
                            .with_description("Enable/disable MD5/SHA1 authentication."),
                    )
                    .attribute(
                        AttributeSchema::new("id", AttributeType::Int)
                            .computed()
                            .with_description("NTP server ID."),
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
                        AttributeSchema::new("key", AttributeType::String)
                            .sensitive()
                            .with_description("Key for MD5/SHA1 authentication."),
                    )
                    .attribute(
                        AttributeSchema::new("key_id", AttributeType::Int)
                            .computed()
                            .with_description("Key ID for authentication."),
                    )
                    .attribute(
                        AttributeSchema::new("ntpv3", enable_disable())
                            .computed()
                            .with_description("Enable to use NTPv3 instead of NTPv4."),
                    )
                    .attribute(
                        AttributeSchema::new("server", AttributeType::String)
                            .computed()
                            .with_description("IP address or hostname of the NTP Server."),
                    )
                    .into_type())
                    .with_description("Configure the FortiGate to connect to any available third-party NTP server."),
            )
            .attribute(
                AttributeSchema::new("ntpsync", enable_disable())
                    .computed()
                    .with_description("Enable/disable setting the FortiGate system time by synchronizing with an NTP Server."),
            )
            .attribute(
                AttributeSchema::new("server_mode", enable_disable())
                    .computed()
                    .with_description("Enable/disable FortiGate NTP Server Mode."),
            )
            .attribute(
                AttributeSchema::new("source_ip", types::ipv4())
                    .computed()
                    .with_description("Source IP address for communication to the NTP server."),
            )
            .attribute(
                AttributeSchema::new("syncinterval", types::positive_int())
                    .computed()
                    .with_description("NTP synchronization interval in minutes."),
            )
            .attribute(
                AttributeSchema::new("type", AttributeType::enumeration(&["fortiguard", "custom"]))
                    .computed()
                    .with_description("Use the FortiGuard NTP server or any other available NTP Server."),
            ),
            Scope::Device,
        ),
    }
}

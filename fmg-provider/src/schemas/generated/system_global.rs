//! system_global schema definition for FortiManager
//!
//! Auto-generated from object definition: system/global
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema config for system_global (SystemGlobal)
pub fn system_global_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/device/{device}/global/system/global",
        display_name: "SystemGlobal",
        identity: Identity::Singleton("SystemGlobal"),
        scope: Scope::Device,
        schema: with_meta_attributes(
            ResourceSchema::new("system_global")
            .with_description("Configure global attributes.")
            .attribute(
                AttributeSchema::new("admin_concurrent", enable_disable())
                    .computed()
                    .with_description("Enable/disable concurrent administrator logins."),
            )
            .attribute(
                AttributeSchema::new("admin_https_redirect", enable_disable())
                    .computed()
                    .with_description("Enable/disable redirection of HTTP administration access to HTTPS."),
            )
            .attribute(
                AttributeSchema::new("admin_lockout_duration", AttributeType::Int)
                    .computed()
                    .with_description("Amount of time in seconds that an administrator account is locked out after reaching the lockout threshold."),
            )
            .attribute(
                AttributeSchema::new("admin_lockout_threshold", AttributeType::Int)
                    .computed()
                    .with_description("Number of failed login attempts before an administrator account is locked out."),
            )
            .attribute(
                AttributeSchema::new("admin_port", types::positive_int())
                    .computed()
                    .with_description("Administrative access port for HTTP."),
            )
            .attribute(
                AttributeSchema::new("admin_scp", enable_disable())
                    .computed()
                    .with_description("Enable/disable using SCP to download the system configuration."),
            )
            .attribute(
                AttributeSchema::new("admin_server_cert", AttributeType::String)
                    .computed()
                    .with_description("Server certificate that the FortiGate uses for HTTPS administrative connections."),
            )
            .attribute(
                AttributeSchema::new("admin_sport", types::positive_int())
                    .computed()
                    .with_description("Administrative access port for HTTPS."),
            )
            .attribute(
                AttributeSchema::new("admin_ssh_port", types::positive_int())
                    .computed()
                    .with_description("Administrative access port for SSH."),
            )
            .attribute(
                AttributeSchema::new("admintimeout", AttributeType::Int)
                    .computed()
                    .with_description("Number of minutes before an idle administrator session times out."),
            )
            .attribute(
                AttributeSchema::new("alias", AttributeType::String)
                    .computed()
                    .with_description("Alias for your FortiGate unit."),
            )
            .attribute(
                AttributeSchema::new("av_failopen", AttributeType::enumeration(&["off", "pass", "one-shot"]))
                    .computed()
                    .with_description("Set the action to take if the FortiGate is running low on memory or the proxy connection limit has been reached."),
            )
            .attribute(
                AttributeSchema::new("cpu_use_threshold", AttributeType::Int)
                    .computed()
                    .with_description("Threshold at which CPU usage is reported."),
            )
            .attribute(
                AttributeSchema::new("daily_restart", enable_disable())
                    .computed()
                    .with_description("Enable/disable daily restart of FortiGate unit."),
            )
            .attribute(
                AttributeSchema::new("fgd_alert_subscription", AttributeType::Set(Box::new(AttributeType::enumeration(&["advisory", "latest-threat", "latest-virus", "latest-attack", "new-antivirus-db", "new-attack-db"]))))
                    .computed()
                    .with_description("Type of alert to retrieve from FortiGuard."),
            )
            .attribute(
                AttributeSchema::new("gui_theme", AttributeType::enumeration(&["jade", "neutrino", "mariner", "graphite", "melongene", "retro", "dark-matter", "onyx", "eclipse"]))
                    .computed()
                    .with_description("Color scheme for the administration GUI."),
            )
            .attribute(
                AttributeSchema::new("hostname", AttributeType::String)
                    .computed()
                    .with_description("FortiGate unit's hostname."),
            )
            .attribute(
                AttributeSchema::new("language", AttributeType::enumeration(&["english", "french", "spanish", "portuguese", "japanese", "trach", "simch", "korean"]))
                    .computed()
                    .with_description("GUI display language."),
            )
            .attribute(
                AttributeSchema::new("lldp_transmission", enable_disable())
                    .computed()
                    .with_description("Enable/disable Link Layer Discovery Protocol (LLDP) transmission."),
            )
            .attribute(
                AttributeSchema::new("management_vdom", AttributeType::String)
                    .computed()
                    .with_description("Management virtual domain name."),
            )
            .attribute(
                AttributeSchema::new("private_data_encryption", enable_disable())
                    .computed()
                    .with_description("Enable/disable private data encryption using an AES 128-bit key or passphrase."),
            )
            .attribute(
                AttributeSchema::new("restart_time", AttributeType::String)
                    .computed()
                    .with_description("Daily restart time (hh:mm)."),
            )
            .attribute(
                AttributeSchema::new("ssl_static_key_ciphers", enable_disable())
                    .computed()
                    .with_description("Enable/disable static key ciphers in SSL/TLS connections."),
            )
            .attribute(
                AttributeSchema::new("strong_crypto", enable_disable())
                    .computed()
                    .with_description("Enable to use strong encryption and only allow strong ciphers and digest for HTTPS/SSH/TLS/SSL functions."),
            )
            .attribute(
                AttributeSchema::new("switch_controller", enable_disable())
                    .computed()
                    .with_description("Enable/disable switch controller feature."),
            )
            .attribute(
                AttributeSchema::new("timezone", AttributeType::String)
                    .computed()
                    .with_description("Number corresponding to your time zone from 00 to 86."),
            )
            .attribute(
                AttributeSchema::new("vdom_mode", AttributeType::enumeration(&["no-vdom", "split-vdom", "multi-vdom"]))
                    .computed()
                    .with_description("Enable/disable support for split/multiple virtual domains."),
            ),
            Scope::Device,
        ),
    }
}

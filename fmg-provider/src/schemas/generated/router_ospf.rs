//! router_ospf schema definition for FortiManager
//!
//! Auto-generated from object definition: router/ospf
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};
use fmg_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema, types};

/// Returns the schema config for router_ospf (RouterOspf)
pub fn router_ospf_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        api_path: "/pm/config/device/{device}/vdom/{vdom}/router/ospf",
        display_name: "RouterOspf",
        identity: Identity::Singleton("RouterOspf"),
        scope: Scope::DeviceVdom,
        schema: with_meta_attributes(
            ResourceSchema::new("router_ospf")
            .with_description("Configure OSPF.")
            .attribute(
                AttributeSchema::new("abr_type", AttributeType::enumeration(&["cisco", "ibm", "shortcut", "standard"]))
                    .computed()
                    .with_description("Area border router type."),
            )
            .attribute(
                AttributeSchema::new("area", BlockSchema::new()
                    .with_mkey("id")
                    .attribute(
                        AttributeSchema::new("authentication", AttributeType::enumeration(&["none", "text", "message-digest"]))
                            .computed()
                            .with_description("Authentication type."),
                    )
                    .attribute(
                        AttributeSchema::new("default_cost", AttributeType::Int)
                            .computed()
                            .with_description("Summary default cost of stub or NSSA area."),
                    )
                    .attribute(
                        AttributeSchema::new("filter_list", BlockSchema::new()
                            .with_mkey("id")
                            .attribute(
                                AttributeSchema::new("direction", AttributeType::enumeration(&["in", "out"]))
                                    .computed()
                                    .with_description("Direction."),
                            )
                            .attribute(
                                AttributeSchema::new("id", AttributeType::Int)
                                    .computed()
                                    .with_description("Filter list entry ID."),
                            )
                            .attribute(
                                AttributeSchema::new("list", AttributeType::String)
                                    .computed()
                                    .with_description("Access-list or prefix-list name."),
                            )
                            .into_type())
                            .with_description("OSPF area filter-list configuration."),
                    )
                    .attribute(
                        AttributeSchema::new("id", types::ipv4())
                            .computed()
                            .with_description("Area entry IP address."),
                    )
                    .attribute(
                        AttributeSchema::new("nssa_default_information_originate", AttributeType::enumeration(&["enable", "always", "disable"]))
                            .computed()
                            .with_description("Redistribute, advertise, or do not originate Type-7 default route into NSSA area."),
                    )
                    .attribute(
                        AttributeSchema::new("nssa_translator_role", AttributeType::enumeration(&["candidate", "never", "always"]))
                            .computed()
                            .with_description("NSSA translator role type."),
                    )
                    .attribute(
                        AttributeSchema::new("range", BlockSchema::new()
                            .with_mkey("id")
                            .attribute(
                                AttributeSchema::new("advertise", enable_disable())
                                    .computed()
                                    .with_description("Enable/disable advertise status."),
                            )
                            .attribute(
                                AttributeSchema::new("id", AttributeType::Int)
                                    .computed()
                                    .with_description("Range entry ID."),
                            )
                            .attribute(
                                AttributeSchema::new("prefix", types::ipv4_mask())
                                    .computed()
                                    .with_description("Prefix."),
                            )
                            .attribute(
                                AttributeSchema::new("substitute", types::ipv4_mask())
                                    .computed()
                                    .with_description("Substitute prefix."),
                            )
                            .attribute(
                                AttributeSchema::new("substitute_status", enable_disable())
                                    .computed()
                                    .with_description("Enable/disable substitute status."),
                            )
                            .into_type())
                            .with_description("OSPF area range configuration."),
                    )
                    .attribute(
                        AttributeSchema::new("shortcut", AttributeType::enumeration(&["disable", "enable", "default"]))
                            .computed()
                            .with_description("Enable/disable shortcut option."),
                    )
                    .attribute(
                        AttributeSchema::new("stub_type", AttributeType::enumeration(&["no-summary", "summary"]))
                            .computed()
                            .with_description("Stub summary setting."),
                    )
                    .attribute(
                        AttributeSchema::new("type", AttributeType::enumeration(&["regular", "nssa", "stub"]))
                            .computed()
                            .with_description("Area type setting."),
                    )
                    .attribute(
                        AttributeSchema::new("virtual_link", BlockSchema::new()
                            .with_mkey("name")
                            .attribute(
                                AttributeSchema::new("authentication", AttributeType::enumeration(&["none", "text", "message-digest"]))
                                    .computed()
                                    .with_description("Authentication type."),
                            )
                            .attribute(
                                AttributeSchema::new("authentication_key", AttributeType::String)
                                    .sensitive()
                                    .with_description("Authentication key."),
                            )
                            .attribute(
                                AttributeSchema::new("dead_interval", AttributeType::Int)
                                    .computed()
                                    .with_description("Dead interval."),
                            )
                            .attribute(
                                AttributeSchema::new("hello_interval", AttributeType::Int)
                                    .computed()
                                    .with_description("Hello interval."),
                            )
                            .attribute(
                                AttributeSchema::new("md5_keys", BlockSchema::new()
                                    .with_mkey("id")
                                    .attribute(
                                        AttributeSchema::new("id", AttributeType::Int)
                                            .computed()
                                            .with_description("Key ID (1 - 255)."),
                                    )
                                    .attribute(
                                        AttributeSchema::new("key_string", AttributeType::String)
                                            .sensitive()
                                            .with_description("Password for the key."),
                                    )
                                    .into_type())
                                    .with_description("MD5 key."),
                            )
                            .attribute(
                                AttributeSchema::new("name", AttributeType::String)
                                    .computed()
                                    .with_description("Virtual link entry name."),
                            )
                            .attribute(
                                AttributeSchema::new("peer", types::ipv4())
                                    .computed()
                                    .with_description("Peer IP."),
                            )
                            .attribute(
                                AttributeSchema::new("retransmit_interval", AttributeType::Int)
                                    .computed()
                                    .with_description("Retransmit interval."),
                            )
                            .attribute(
                                AttributeSchema::new("transmit_delay", AttributeType::Int)
                                    .computed()
                                    .with_description("Transmit delay."),
                            )
                            .into_type())
                            .with_description("OSPF virtual link configuration."),
                    )
                    .into_type())
                    .with_description("OSPF area configuration."),
            )
            .attribute(
                AttributeSchema::new("auto_cost_ref_bandwidth", AttributeType::Int)
                    .computed()
                    .with_description("Reference bandwidth in terms of megabits per second."),
            )
            .attribute(
                AttributeSchema::new("bfd", enable_disable())
                    .computed()
                    .with_description("Bidirectional Forwarding Detection (BFD)."),
            )
            .attribute(
                AttributeSchema::new("database_overflow", enable_disable())
                    .computed()
                    .with_description("Enable/disable database overflow."),
            )
            .attribute(
                AttributeSchema::new("default_information_metric", AttributeType::Int)
                    .computed()
                    .with_description("Default information metric."),
            )
            .attribute(
                AttributeSchema::new("default_information_originate", AttributeType::enumeration(&["enable", "always", "disable"]))
                    .computed()
                    .with_description("Enable/disable generation of default route."),
            )
            .attribute(
                AttributeSchema::new("default_metric", AttributeType::Int)
                    .computed()
                    .with_description("Default metric of redistribute routes."),
            )
            .attribute(
                AttributeSchema::new("distance", AttributeType::Int)
                    .computed()
                    .with_description("Distance of the route."),
            )
            .attribute(
                AttributeSchema::new("log_neighbour_changes", enable_disable())
                    .computed()
                    .with_description("Log of OSPF neighbor changes."),
            )
            .attribute(
                AttributeSchema::new("neighbor", BlockSchema::new()
                    .with_mkey("id")
                    .attribute(
                        AttributeSchema::new("cost", AttributeType::Int)
                            .computed()
                            .with_description("Cost of the interface, value range from 0 to 65535, 0 means auto-cost."),
                    )
                    .attribute(
                        AttributeSchema::new("id", AttributeType::Int)
                            .computed()
                            .with_description("Neighbor entry ID."),
                    )
                    .attribute(
                        AttributeSchema::new("ip", types::ipv4())
                            .computed()
                            .with_description("Interface IP address of the neighbor."),
                    )
                    .attribute(
                        AttributeSchema::new("poll_interval", AttributeType::Int)
                            .computed()
                            .with_description("Poll interval time in seconds."),
                    )
                    .attribute(
                        AttributeSchema::new("priority", AttributeType::Int)
                            .computed()
                            .with_description("Priority."),
                    )
                    .into_type())
                    .with_description("OSPF neighbor configuration are used when OSPF runs on non-broadcast media."),
            )
            .attribute(
                AttributeSchema::new("network", BlockSchema::new()
                    .with_mkey("id")
                    .attribute(
                        AttributeSchema::new("area", types::ipv4())
                            .computed()
                            .with_description("Attach the network to area."),
                    )
                    .attribute(
                        AttributeSchema::new("comments", AttributeType::String)
                            .computed()
                            .with_description("Comment."),
                    )
                    .attribute(
                        AttributeSchema::new("id", AttributeType::Int)
                            .computed()
                            .with_description("Network entry ID."),
                    )
                    .attribute(
                        AttributeSchema::new("prefix", types::ipv4_mask())
                            .computed()
                            .with_description("Prefix."),
                    )
                    .into_type())
                    .with_description("OSPF network configuration."),
            )
            .attribute(
                AttributeSchema::new("ospf_interface", BlockSchema::new()
                    .with_mkey("name")
                    .attribute(
                        AttributeSchema::new("authentication", AttributeType::enumeration(&["none", "text", "message-digest"]))
                            .computed()
                            .with_description("Authentication type."),
                    )
                    .attribute(
                        AttributeSchema::new("authentication_key", AttributeType::String)
                            .sensitive()
                            .with_description("Authentication key."),
                    )
                    .attribute(
                        AttributeSchema::new("bfd", AttributeType::enumeration(&["global", "enable", "disable"]))
                            .computed()
                            .with_description("Bidirectional Forwarding Detection (BFD)."),
                    )
                    .attribute(
                        AttributeSchema::new("cost", AttributeType::Int)
                            .computed()
                            .with_description("Cost of the interface, value range from 0 to 65535, 0 means auto-cost."),
                    )
                    .attribute(
                        AttributeSchema::new("dead_interval", AttributeType::Int)
                            .computed()
                            .with_description("Dead interval."),
                    )
                    .attribute(
                        AttributeSchema::new("hello_interval", AttributeType::Int)
                            .computed()
                            .with_description("Hello interval."),
                    )
                    .attribute(
                        AttributeSchema::new("interface", AttributeType::String)
                            .computed()
                            .with_description("Configuration interface name."),
                    )
                    .attribute(
                        AttributeSchema::new("ip", types::ipv4())
                            .computed()
                            .with_description("IP address."),
                    )
                    .attribute(
                        AttributeSchema::new("md5_keys", BlockSchema::new()
                            .with_mkey("id")
                            .attribute(
                                AttributeSchema::new("id", AttributeType::Int)
                                    .computed()
                                    .with_description("Key ID (1 - 255)."),
                            )
                            .attribute(
                                AttributeSchema::new("key_string", AttributeType::String)
                                    .sensitive()
                                    .with_description("Password for the key."),
                            )
                            .into_type())
                            .with_description("MD5 key."),
                    )
                    .attribute(
                        AttributeSchema::new("mtu", AttributeType::Int)
                            .computed()
                            .with_description("MTU for database description packets."),
                    )
                    .attribute(
                        AttributeSchema::new("name", AttributeType::String)
                            .computed()
                            .with_description("Interface entry name."),
                    )
                    .attribute(
                        AttributeSchema::new("network_type", AttributeType::enumeration(&["broadcast", "non-broadcast", "point-to-point", "point-to-multipoint", "point-to-multipoint-non-broadcast"]))
                            .computed()
                            .with_description("Network type."),
                    )
                    .attribute(
                        AttributeSchema::new("priority", AttributeType::Int)
                            .computed()
                            .with_description("Priority."),
                    )
                    .attribute(
                        AttributeSchema::new("status", enable_disable())
                            .computed()
                            .with_description("Enable/disable status."),
                    )
                    .into_type())
                    .with_description("OSPF interface configuration."),
            )
            .attribute(
                AttributeSchema::new("passive_interface", AttributeType::string_set())
                    .computed()
                    .with_description("Passive interface configuration."),
            )
            .attribute(
                AttributeSchema::new("redistribute", BlockSchema::new()
                    .with_mkey("name")
                    .attribute(
                        AttributeSchema::new("metric", AttributeType::Int)
                            .computed()
                            .with_description("Redistribute metric setting."),
                    )
                    .attribute(
                        AttributeSchema::new("metric_type", AttributeType::enumeration(&["1", "2"]))
                            .computed()
                            .with_description("Metric type."),
                    )
                    .attribute(
                        AttributeSchema::new("name", AttributeType::String)
                            .computed()
                            .with_description("Redistribute name."),
                    )
                    .attribute(
                        AttributeSchema::new("routemap", AttributeType::String)
                            .computed()
                            .with_description("Route map name."),
                    )
                    .attribute(
                        AttributeSchema::new("status", enable_disable())
                            .computed()
                            .with_description("Status."),
                    )
                    .attribute(
                        AttributeSchema::new("tag", AttributeType::Int)
                            .computed()
                            .with_description("Tag value."),
                    )
                    .into_type())
                    .with_description("Redistribute configuration."),
            )
            .attribute(
                AttributeSchema::new("restart_mode", AttributeType::enumeration(&["none", "lls", "graceful-restart"]))
                    .computed()
                    .with_description("OSPF restart mode (graceful or LLS)."),
            )
            .attribute(
                AttributeSchema::new("rfc1583_compatible", enable_disable())
                    .computed()
                    .with_description("Enable/disable RFC1583 compatibility."),
            )
            .attribute(
                AttributeSchema::new("router_id", types::ipv4())
                    .computed()
                    .with_description("Router ID."),
            )
            .attribute(
                AttributeSchema::new("spf_timers", AttributeType::String)
                    .computed()
                    .with_description("SPF calculation frequency."),
            )
            .attribute(
                AttributeSchema::new("summary_address", BlockSchema::new()
                    .with_mkey("id")
                    .attribute(
                        AttributeSchema::new("advertise", enable_disable())
                            .computed()
                            .with_description("Enable/disable advertise status."),
                    )
                    .attribute(
                        AttributeSchema::new("id", AttributeType::Int)
                            .computed()
                            .with_description("Summary address entry ID."),
                    )
                    .attribute(
                        AttributeSchema::new("prefix", types::ipv4_mask())
                            .computed()
                            .with_description("Prefix address."),
                    )
                    .attribute(
                        AttributeSchema::new("tag", AttributeType::Int)
                            .computed()
                            .with_description("Tag value."),
                    )
                    .into_type())
                    .with_description("IP address summary configuration."),
            ),
            Scope::DeviceVdom,
        ),
    }
}

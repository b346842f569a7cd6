//! FortiManager object definition to fmg schema code generator
//!
//! This tool generates the schema modules under
//! `fmg-provider/src/schemas/generated/` from JSON object definitions.
//!
//! Usage:
//!   # Generate from file
//!   fmg-codegen --file definitions/system_dns.json --output system_dns.rs
//!
//!   # Generate from stdin
//!   cat definitions/router_ospf.json | fmg-codegen

use anyhow::{Context, Result};
use clap::Parser;
use heck::{ToSnakeCase, ToUpperCamelCase};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{self, Read};

const DESCRIPTION_LIMIT: usize = 150;

#[derive(Parser, Debug)]
#[command(name = "fmg-codegen")]
#[command(about = "Generate fmg schema code from FortiManager object definitions")]
struct Args {
    /// Input file (reads from stdin if not specified)
    #[arg(long)]
    file: Option<String>,

    /// Output file (writes to stdout if not specified)
    #[arg(long, short)]
    output: Option<String>,
}

/// A FortiManager object definition
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectDefinition {
    /// Object path below the scope, e.g. "system/dns" or "obj/firewall/address"
    name: String,
    /// JSON-RPC URL template
    path: String,
    description: Option<String>,
    #[serde(default)]
    singleton: bool,
    /// Key field of table objects
    mkey: Option<String>,
    scope: ScopeDefinition,
    attributes: Vec<AttributeDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ScopeDefinition {
    Device,
    DeviceVdom,
    Adom,
}

impl ScopeDefinition {
    fn variant(self) -> &'static str {
        match self {
            ScopeDefinition::Device => "Scope::Device",
            ScopeDefinition::DeviceVdom => "Scope::DeviceVdom",
            ScopeDefinition::Adom => "Scope::Adom",
        }
    }

    fn placeholders(self) -> &'static [&'static str] {
        match self {
            ScopeDefinition::Device => &["{device}"],
            ScopeDefinition::DeviceVdom => &["{device}", "{vdom}"],
            ScopeDefinition::Adom => &["{adom}"],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttributeDefinition {
    /// FortiOS field name, e.g. "filter-list"
    name: String,
    #[serde(rename = "type")]
    kind: AttributeKind,
    description: Option<String>,
    /// Allowed values of option and multi-string fields
    #[serde(default)]
    options: Vec<String>,
    /// Value format of string and integer fields
    format: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    read_only: bool,
    /// Whether the device fills in the value when unset
    #[serde(default = "default_computed")]
    computed: bool,
    /// Row key of tables
    mkey: Option<String>,
    max_items: Option<usize>,
    /// Columns of tables
    #[serde(default)]
    attributes: Vec<AttributeDefinition>,
}

fn default_computed() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum AttributeKind {
    String,
    Integer,
    Option,
    MultiString,
    MultiInteger,
    Password,
    Table,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Read definition JSON
    let definition_json = if let Some(file_path) = &args.file {
        std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    };

    let definition: ObjectDefinition =
        serde_json::from_str(&definition_json).context("Failed to parse object definition")?;

    let code = generate_schema_code(&definition)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &code)
            .with_context(|| format!("Failed to write to: {}", output_path))?;
        eprintln!("Generated: {}", output_path);
    } else {
        print!("{}", code);
    }

    Ok(())
}

/// Resource type name: "obj/firewall/address" -> "object_firewall_address"
fn resource_type(name: &str) -> String {
    let name = name.strip_prefix("obj/").map_or_else(
        || name.to_string(),
        |rest| format!("object/{}", rest),
    );
    name.split('/')
        .map(|part| part.to_snake_case())
        .collect::<Vec<_>>()
        .join("_")
}

/// Attribute name in configuration. A top-level "id" clashes with the
/// resource address and becomes "fosid".
fn attribute_name(name: &str, top_level: bool) -> String {
    if top_level && name == "id" {
        "fosid".to_string()
    } else {
        name.to_snake_case()
    }
}

fn check_definition(definition: &ObjectDefinition) -> Result<()> {
    match (&definition.mkey, definition.singleton) {
        (Some(_), true) => anyhow::bail!("{}: a singleton has no mkey", definition.name),
        (None, false) => anyhow::bail!("{}: table objects need an mkey", definition.name),
        (Some(mkey), false) if !definition.attributes.iter().any(|a| &a.name == mkey) => {
            anyhow::bail!("{}: mkey '{}' is not an attribute", definition.name, mkey)
        }
        _ => {}
    }

    for placeholder in definition.scope.placeholders() {
        if !definition.path.contains(placeholder) {
            anyhow::bail!(
                "{}: path {} lacks {} for its scope",
                definition.name,
                definition.path,
                placeholder
            );
        }
    }

    check_attributes(&definition.name, &definition.attributes)
}

fn check_attributes(context: &str, attributes: &[AttributeDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for attr in attributes {
        let path = format!("{}.{}", context, attr.name);
        if !seen.insert(attr.name.as_str()) {
            anyhow::bail!("{}: duplicate attribute", path);
        }
        match attr.kind {
            AttributeKind::Option if attr.options.is_empty() => {
                anyhow::bail!("{}: option attributes need options", path)
            }
            AttributeKind::Table => {
                if attr.attributes.is_empty() {
                    anyhow::bail!("{}: tables need attributes", path);
                }
                if let Some(mkey) = &attr.mkey {
                    if !attr.attributes.iter().any(|a| &a.name == mkey) {
                        anyhow::bail!("{}: row key '{}' is not an attribute", path, mkey);
                    }
                }
                check_attributes(&path, &attr.attributes)?;
            }
            _ if !attr.attributes.is_empty() => {
                anyhow::bail!("{}: only tables have nested attributes", path)
            }
            _ => {}
        }
    }
    Ok(())
}

fn generate_schema_code(definition: &ObjectDefinition) -> Result<String> {
    check_definition(definition)?;

    let resource = resource_type(&definition.name);
    let display_name = resource.to_upper_camel_case();
    let identity = match &definition.mkey {
        Some(mkey) => format!(
            "Identity::Key {{ attribute: \"{}\" }}",
            attribute_name(mkey, true)
        ),
        None => format!("Identity::Singleton(\"{}\")", display_name),
    };

    // Attributes first, so the imports can follow what they use
    let mut body = String::new();
    if let Some(desc) = &definition.description {
        body.push_str(&format!(
            "            .with_description(\"{}\")\n",
            escape_description(desc)
        ));
    }
    let mut attrs: Vec<&AttributeDefinition> = definition.attributes.iter().collect();
    attrs.sort_by_key(|a| attribute_name(&a.name, true));
    let count = attrs.len();
    for (i, attr) in attrs.into_iter().enumerate() {
        let is_mkey = definition.mkey.as_deref() == Some(attr.name.as_str());
        emit_attribute(&mut body, attr, 12, true, is_mkey);
        body.push_str(if i + 1 == count { "),\n" } else { ")\n" });
    }

    let mut super_imports = vec!["FmgSchemaConfig", "Identity", "Scope"];
    if body.contains("enable_disable()") {
        super_imports.push("enable_disable");
    }
    super_imports.push("with_meta_attributes");

    let mut core_imports = vec!["AttributeSchema"];
    if body.contains("AttributeType::") {
        core_imports.push("AttributeType");
    }
    if body.contains("BlockSchema::") {
        core_imports.push("BlockSchema");
    }
    core_imports.push("ResourceSchema");
    if body.contains("types::") {
        core_imports.push("types");
    }

    let mut code = String::new();
    code.push_str(&format!(
        r#"//! {resource} schema definition for FortiManager
//!
//! Auto-generated from object definition: {name}
//!
//! DO NOT EDIT MANUALLY - regenerate with fmg-codegen

use super::{{{super_imports}}};
use fmg_core::schema::{{{core_imports}}};

/// Returns the schema config for {resource} ({display_name})
pub fn {resource}_config() -> FmgSchemaConfig {{
    FmgSchemaConfig {{
        api_path: "{path}",
        display_name: "{display_name}",
        identity: {identity},
        scope: {scope},
        schema: with_meta_attributes(
            ResourceSchema::new("{resource}")
"#,
        resource = resource,
        name = definition.name,
        super_imports = super_imports.join(", "),
        core_imports = core_imports.join(", "),
        display_name = display_name,
        path = definition.path,
        identity = identity,
        scope = definition.scope.variant(),
    ));
    code.push_str(&body);
    if count == 0 {
        code.pop();
        code.push_str(",\n");
    }
    code.push_str(&format!(
        "            {},\n        ),\n    }}\n}}\n",
        definition.scope.variant()
    ));

    Ok(code)
}

/// Emit one `.attribute(...)` call, leaving the closing parenthesis to the caller
fn emit_attribute(
    code: &mut String,
    attr: &AttributeDefinition,
    indent: usize,
    top_level: bool,
    is_mkey: bool,
) {
    let pad = " ".repeat(indent);
    let inner = " ".repeat(indent + 4);
    let flag_pad = " ".repeat(indent + 8);
    let name = attribute_name(&attr.name, top_level);

    code.push_str(&format!("{}.attribute(\n", pad));

    if attr.kind == AttributeKind::Table {
        code.push_str(&format!(
            "{}AttributeSchema::new(\"{}\", BlockSchema::new()\n",
            inner, name
        ));
        if let Some(mkey) = &attr.mkey {
            code.push_str(&format!(
                "{}.with_mkey(\"{}\")\n",
                flag_pad,
                mkey.to_snake_case()
            ));
        }
        if let Some(max) = attr.max_items {
            code.push_str(&format!("{}.with_max_items({})\n", flag_pad, max));
        }
        let mut columns: Vec<&AttributeDefinition> = attr.attributes.iter().collect();
        columns.sort_by_key(|a| a.name.to_snake_case());
        for column in columns {
            emit_attribute(code, column, indent + 8, false, false);
            code.push_str(")\n");
        }
        code.push_str(&format!("{}.into_type())", flag_pad));
    } else {
        code.push_str(&format!(
            "{}AttributeSchema::new(\"{}\", {})",
            inner,
            name,
            attribute_type(attr)
        ));
    }

    let mut flags = Vec::new();
    if is_mkey || attr.required {
        flags.push(".required()".to_string());
    }
    if is_mkey {
        flags.push(".force_new()".to_string());
    } else if attr.read_only {
        flags.push(".read_only()".to_string());
    } else if attr.kind == AttributeKind::Password {
        flags.push(".sensitive()".to_string());
    } else if attr.computed && !attr.required && attr.kind != AttributeKind::Table {
        flags.push(".computed()".to_string());
    }
    if let Some(desc) = &attr.description {
        flags.push(format!(".with_description(\"{}\")", escape_description(desc)));
    }
    if name.replace('_', "-") != attr.name {
        flags.push(format!(".with_provider_name(\"{}\")", attr.name));
    }

    for flag in flags {
        code.push_str(&format!("\n{}{}", flag_pad, flag));
    }
    code.push_str(&format!(",\n{}", pad));
}

fn attribute_type(attr: &AttributeDefinition) -> String {
    match attr.kind {
        AttributeKind::String | AttributeKind::Password => match attr.format.as_deref() {
            Some("ipv4") => "types::ipv4()".to_string(),
            Some("ipv4-mask") => "types::ipv4_mask()".to_string(),
            Some("port-range") => "types::port_range()".to_string(),
            _ => "AttributeType::String".to_string(),
        },
        AttributeKind::Integer => match attr.format.as_deref() {
            Some("positive") => "types::positive_int()".to_string(),
            _ => "AttributeType::Int".to_string(),
        },
        AttributeKind::Option => {
            if is_enable_disable(&attr.options) {
                "enable_disable()".to_string()
            } else {
                format!("AttributeType::enumeration(&[{}])", quoted(&attr.options))
            }
        }
        AttributeKind::MultiString if attr.options.is_empty() => {
            "AttributeType::string_set()".to_string()
        }
        AttributeKind::MultiString => format!(
            "AttributeType::Set(Box::new(AttributeType::enumeration(&[{}])))",
            quoted(&attr.options)
        ),
        AttributeKind::MultiInteger => "AttributeType::Set(Box::new(AttributeType::Int))".to_string(),
        // Tables are emitted as blocks by the caller
        AttributeKind::Table => "AttributeType::String".to_string(),
    }
}

fn is_enable_disable(options: &[String]) -> bool {
    options.len() == 2
        && options.iter().any(|o| o == "enable")
        && options.iter().any(|o| o == "disable")
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_description(desc: &str) -> String {
    let escaped = desc
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', " ")
        .replace("  ", " ");
    if escaped.chars().count() > DESCRIPTION_LIMIT {
        let truncated: String = escaped.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", truncated.trim_end_matches('\\'))
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ObjectDefinition {
        serde_json::from_str(json).unwrap()
    }

    const DNSTRANSLATION: &str = r#"{
        "name": "firewall/dnstranslation",
        "path": "/pm/config/device/{device}/vdom/{vdom}/firewall/dnstranslation",
        "description": "Configure DNS translation.",
        "mkey": "id",
        "scope": "device-vdom",
        "attributes": [
            {"name": "src", "type": "string", "format": "ipv4", "description": "Source."},
            {"name": "id", "type": "integer", "description": "ID."}
        ]
    }"#;

    #[test]
    fn resource_type_names() {
        assert_eq!(resource_type("system/global"), "system_global");
        assert_eq!(resource_type("obj/firewall/address"), "object_firewall_address");
        assert_eq!(resource_type("router/prefix-list"), "router_prefix_list");
    }

    #[test]
    fn keyed_object() {
        let code = generate_schema_code(&parse(DNSTRANSLATION)).unwrap();
        assert!(code.contains("pub fn firewall_dnstranslation_config() -> FmgSchemaConfig {"));
        assert!(code.contains("identity: Identity::Key { attribute: \"fosid\" },"));
        assert!(code.contains("scope: Scope::DeviceVdom,"));
        assert!(code.contains(
            "AttributeSchema::new(\"fosid\", AttributeType::Int)\n                    .required()\n                    .force_new()\n                    .with_description(\"ID.\")\n                    .with_provider_name(\"id\"),"
        ));
        assert!(code.contains("use fmg_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};"));
        assert!(code.contains("use super::{FmgSchemaConfig, Identity, Scope, with_meta_attributes};"));

        // Sorted, with the last attribute closing the builder
        let fosid = code.find("\"fosid\"").unwrap();
        let src = code.find("\"src\"").unwrap();
        assert!(fosid < src);
        assert!(code.ends_with(
            "            ),\n            Scope::DeviceVdom,\n        ),\n    }\n}\n"
        ));
    }

    #[test]
    fn singleton_with_table() {
        let definition = parse(
            r#"{
            "name": "system/ntp",
            "path": "/pm/config/device/{device}/global/system/ntp",
            "singleton": true,
            "scope": "device",
            "attributes": [
                {"name": "ntpsync", "type": "option", "options": ["enable", "disable"]},
                {"name": "ntpserver", "type": "table", "mkey": "id", "attributes": [
                    {"name": "id", "type": "integer"},
                    {"name": "key", "type": "password"},
                    {"name": "server-name", "type": "string", "computed": false}
                ]}
            ]
        }"#,
        );
        let code = generate_schema_code(&definition).unwrap();
        assert!(code.contains("identity: Identity::Singleton(\"SystemNtp\"),"));
        assert!(code.contains("use super::{FmgSchemaConfig, Identity, Scope, enable_disable, with_meta_attributes};"));
        assert!(code.contains("AttributeSchema::new(\"ntpserver\", BlockSchema::new()\n                    .with_mkey(\"id\")\n"));
        // Nested "id" keeps its name
        assert!(code.contains("AttributeSchema::new(\"id\", AttributeType::Int)\n                            .computed(),"));
        assert!(code.contains("AttributeSchema::new(\"key\", AttributeType::String)\n                            .sensitive(),"));
        assert!(code.contains("AttributeSchema::new(\"server_name\", AttributeType::String),"));
        assert!(code.contains("                    .into_type()),\n"));
        assert!(code.contains("AttributeSchema::new(\"ntpsync\", enable_disable())"));
    }

    #[test]
    fn option_and_set_types() {
        let attr: AttributeDefinition = serde_json::from_str(
            r#"{"name": "protocol", "type": "multi-string", "options": ["cleartext", "dot"]}"#,
        )
        .unwrap();
        assert_eq!(
            attribute_type(&attr),
            "AttributeType::Set(Box::new(AttributeType::enumeration(&[\"cleartext\", \"dot\"])))"
        );

        let attr: AttributeDefinition =
            serde_json::from_str(r#"{"name": "members", "type": "multi-integer"}"#).unwrap();
        assert_eq!(attribute_type(&attr), "AttributeType::Set(Box::new(AttributeType::Int))");

        let attr: AttributeDefinition = serde_json::from_str(
            r#"{"name": "type", "type": "option", "options": ["regular", "nssa"]}"#,
        )
        .unwrap();
        assert_eq!(
            attribute_type(&attr),
            "AttributeType::enumeration(&[\"regular\", \"nssa\"])"
        );
    }

    #[test]
    fn invalid_definitions() {
        let missing_mkey = parse(
            r#"{"name": "router/static", "path": "/pm/config/device/{device}/vdom/{vdom}/router/static",
                "scope": "device-vdom", "attributes": []}"#,
        );
        assert!(generate_schema_code(&missing_mkey).is_err());

        let wrong_scope = parse(
            r#"{"name": "system/dns", "path": "/pm/config/{adom}/system/dns", "singleton": true,
                "scope": "device", "attributes": []}"#,
        );
        let err = generate_schema_code(&wrong_scope).unwrap_err();
        assert!(err.to_string().contains("{device}"));

        let empty_options = parse(
            r#"{"name": "system/dns", "path": "/pm/config/device/{device}/global/system/dns",
                "singleton": true, "scope": "device",
                "attributes": [{"name": "mode", "type": "option"}]}"#,
        );
        assert!(generate_schema_code(&empty_options).is_err());
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let desc = "word ".repeat(60);
        let escaped = escape_description(&desc);
        assert!(escaped.ends_with("..."));
        assert_eq!(escaped.chars().count(), DESCRIPTION_LIMIT + 3);
        assert_eq!(escape_description("say \"hi\""), "say \\\"hi\\\"");
    }
}

//! Manifest loading
//!
//! A manifest is a TOML file with a `[provider]` table, an optional
//! `[backend]` table and any number of `[[resource]]` entries:
//!
//! ```toml
//! [provider]
//! hostname = "fmg.example.com"
//! device_name = "FGT-branch"
//!
//! [[resource]]
//! type = "firewall_dnstranslation"
//! name = "web"
//!
//! [resource.attributes]
//! fosid = 1
//! src = "10.0.0.1"
//! dst = "192.168.0.1"
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use fmg_core::resource::{Resource, Value};
use fmg_provider::ProviderSettings;
use fmg_state::BackendConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub backend: Option<BackendSection>,
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceBlock>,
}

/// The `[backend]` table
#[derive(Debug, Deserialize)]
pub struct BackendSection {
    #[serde(rename = "type", default = "default_backend_type")]
    pub backend_type: String,
    #[serde(flatten)]
    pub attributes: toml::Table,
}

fn default_backend_type() -> String {
    "local".to_string()
}

/// One `[[resource]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceBlock {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub attributes: toml::Table,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::parse(&content).map_err(|e| format!("{}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Parse error: {}", e))
    }

    /// Desired resources, in manifest order
    pub fn resources(&self) -> Result<Vec<Resource>, String> {
        let mut seen = HashSet::new();
        let mut resources = Vec::with_capacity(self.resources.len());

        for block in &self.resources {
            if !seen.insert((block.resource_type.as_str(), block.name.as_str())) {
                return Err(format!(
                    "Duplicate resource {}.{}",
                    block.resource_type, block.name
                ));
            }

            let mut resource = Resource::new(&block.resource_type, &block.name);
            for (key, value) in &block.attributes {
                let value = toml_to_value(value).map_err(|e| {
                    format!("{}.{}: {}: {}", block.resource_type, block.name, key, e)
                })?;
                resource.attributes.insert(key.clone(), value);
            }
            resources.push(resource);
        }
        Ok(resources)
    }

    /// Backend configuration; a local file when the manifest has none
    pub fn backend_config(&self) -> Result<BackendConfig, String> {
        let Some(section) = &self.backend else {
            return Ok(BackendConfig {
                backend_type: default_backend_type(),
                attributes: HashMap::new(),
            });
        };

        let attributes = section
            .attributes
            .iter()
            .map(|(k, v)| toml_to_value(v).map(|v| (k.clone(), v)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|e| format!("backend: {}", e))?;

        Ok(BackendConfig {
            backend_type: section.backend_type.clone(),
            attributes,
        })
    }
}

/// Convert a TOML value into a resource value
pub fn toml_to_value(value: &toml::Value) -> Result<Value, String> {
    match value {
        toml::Value::String(s) => Ok(Value::String(s.clone())),
        toml::Value::Integer(i) => Ok(Value::Int(*i)),
        toml::Value::Boolean(b) => Ok(Value::Bool(*b)),
        toml::Value::Datetime(d) => Ok(Value::String(d.to_string())),
        toml::Value::Float(f) => Err(format!("floating point values are not supported ({})", f)),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        toml::Value::Table(table) => table
            .iter()
            .map(|(k, v)| toml_to_value(v).map(|v| (k.clone(), v)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Value::Map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[provider]
hostname = "fmg.example.com"
token = "secret"
device_name = "FGT1"

[[resource]]
type = "firewall_dnstranslation"
name = "web"

[resource.attributes]
fosid = 1
src = "10.0.0.1"
dst = "192.168.0.1"

[[resource]]
type = "router_ospf"
name = "main"

[resource.attributes]
router_id = "10.1.1.1"

[[resource.attributes.area]]
id = "0.0.0.0"

[[resource.attributes.area.filter_list]]
id = 1
list = "deny-bogons"
direction = "in"
"#;

    #[test]
    fn parse_resources() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.provider.device_name.as_deref(), Some("FGT1"));

        let resources = manifest.resources().unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id.to_string(), "firewall_dnstranslation.web");
        assert_eq!(resources[0].attributes["fosid"], Value::Int(1));

        let Value::List(areas) = &resources[1].attributes["area"] else {
            panic!("area should be a list");
        };
        let Value::Map(area) = &areas[0] else {
            panic!("area row should be a map");
        };
        let Value::List(filters) = &area["filter_list"] else {
            panic!("filter_list should be a list");
        };
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn duplicate_resource_is_rejected() {
        let manifest = Manifest::parse(
            r#"
[provider]
hostname = "fmg"

[[resource]]
type = "system_dns"
name = "dns"

[[resource]]
type = "system_dns"
name = "dns"
"#,
        )
        .unwrap();
        assert_eq!(
            manifest.resources().unwrap_err(),
            "Duplicate resource system_dns.dns"
        );
    }

    #[test]
    fn floats_are_rejected() {
        assert!(toml_to_value(&toml::Value::Float(1.5)).is_err());
    }

    #[test]
    fn unknown_provider_setting_is_rejected() {
        assert!(Manifest::parse("[provider]\nregion = \"x\"\n").is_err());
    }

    #[test]
    fn backend_defaults_to_local() {
        let manifest = Manifest::parse("[provider]\nhostname = \"fmg\"\n").unwrap();
        let config = manifest.backend_config().unwrap();
        assert_eq!(config.backend_type, "local");
        assert!(config.attributes.is_empty());

        let manifest = Manifest::parse(
            "[provider]\nhostname = \"fmg\"\n\n[backend]\npath = \"state/branch.json\"\n",
        )
        .unwrap();
        let config = manifest.backend_config().unwrap();
        assert_eq!(config.backend_type, "local");
        assert_eq!(config.get_string("path"), Some("state/branch.json"));
    }

    #[test]
    fn load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmg.toml");
        std::fs::write(&path, "[provider\n").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(err.starts_with(&path.display().to_string()), "{}", err);
        assert!(err.contains("Parse error"), "{}", err);

        let missing = Manifest::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(missing.starts_with("Failed to read"), "{}", missing);
    }
}

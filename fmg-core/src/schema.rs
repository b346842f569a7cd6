//! Attribute and resource schemas
//!
//! Providers define schemas for each resource type, enabling type validation
//! before any request reaches the device, and driving the flatten/expand of
//! every attribute between state and the API payload.

use std::collections::HashMap;
use std::fmt;

use crate::convert::to_api_name;
use crate::resource::Value;

#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values, e.g. "enable" / "disable")
    Enum(Vec<String>),
    /// Scalar with an extra check, such as an IPv4 address
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
        /// Rewrites accepted spellings into the form the device reports
        canonical: Option<fn(&Value) -> Value>,
    },
    /// Ordered list
    List(Box<AttributeType>),
    /// Unordered collection (member lists); compared ignoring order
    Set(Box<AttributeType>),
    /// Nested configuration block: a list of maps with table semantics
    Block(Box<BlockSchema>),
}

impl AttributeType {
    /// Shorthand for an enum type built from string slices
    pub fn enumeration(values: &[&str]) -> Self {
        AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// Shorthand for a set of strings (the usual FortiManager member list)
    pub fn string_set() -> Self {
        AttributeType::Set(Box::new(AttributeType::String))
    }

    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, .. }, v) => {
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner) | AttributeType::Set(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Block(block), Value::List(rows)) => block.validate_rows(rows),

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Set(inner) => format!("Set<{}>", inner.type_name()),
            AttributeType::Block(_) => "Block".to_string(),
        }
    }

    /// `value` in the form the device reports it back.
    ///
    /// Lists, sets and block rows are rewritten element by element; types
    /// without a canonical form return the value unchanged.
    pub fn canonicalize(&self, value: &Value) -> Value {
        match (self, value) {
            (AttributeType::Custom { canonical: Some(f), .. }, v) => f(v),
            (AttributeType::List(inner) | AttributeType::Set(inner), Value::List(items)) => {
                Value::List(items.iter().map(|item| inner.canonicalize(item)).collect())
            }
            (AttributeType::Block(block), Value::List(rows)) => Value::List(
                rows.iter()
                    .map(|row| match row {
                        Value::Map(fields) => Value::Map(
                            fields
                                .iter()
                                .map(|(k, v)| {
                                    let v = match block.attributes.get(k) {
                                        Some(schema) => schema.attr_type.canonicalize(v),
                                        None => v.clone(),
                                    };
                                    (k.clone(), v)
                                })
                                .collect(),
                        ),
                        other => other.clone(),
                    })
                    .collect(),
            ),
            (_, v) => v.clone(),
        }
    }

    /// The scalar type a custom type is built on, or self
    pub fn base(&self) -> &AttributeType {
        match self {
            AttributeType::Custom { base, .. } => base.base(),
            other => other,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Why a configured value does not fit its schema
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is read-only")]
    ReadOnlyAttribute { name: String },

    #[error("Block allows at most {max} item(s), got {got}")]
    TooManyItems { max: usize, got: usize },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Block row {index}, attribute '{attribute}': {inner}")]
    BlockItemError {
        index: usize,
        attribute: String,
        inner: Box<TypeError>,
    },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Value may be filled in by the device when not configured
    pub computed: bool,
    /// Never shown in plan output
    pub sensitive: bool,
    /// Changing the value requires delete and re-create
    pub force_new: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// API-side field name (e.g., "filter-list"); defaults to the hyphenated name
    pub provider_name: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            optional: true,
            computed: false,
            sensitive: false,
            force_new: false,
            default: None,
            description: None,
            provider_name: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Optional and filled in by the device when absent
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Computed only; rejected in configuration
    pub fn read_only(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Field name used on the wire
    pub fn api_name(&self) -> String {
        self.provider_name
            .clone()
            .unwrap_or_else(|| to_api_name(&self.name))
    }

    /// Whether the attribute is computed-only
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// Nested block schema (one row of a table attribute)
#[derive(Debug, Clone, Default)]
pub struct BlockSchema {
    pub attributes: HashMap<String, AttributeSchema>,
    /// Row key attribute (e.g. "id" for OSPF areas)
    pub mkey: Option<String>,
    pub max_items: Option<usize>,
}

impl BlockSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_mkey(mut self, mkey: impl Into<String>) -> Self {
        self.mkey = Some(mkey.into());
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Wrap into an attribute type
    pub fn into_type(self) -> AttributeType {
        AttributeType::Block(Box::new(self))
    }

    fn validate_rows(&self, rows: &[Value]) -> Result<(), TypeError> {
        if let Some(max) = self.max_items
            && rows.len() > max
        {
            return Err(TypeError::TooManyItems {
                max,
                got: rows.len(),
            });
        }

        for (index, row) in rows.iter().enumerate() {
            let Value::Map(fields) = row else {
                return Err(TypeError::ListItemError {
                    index,
                    inner: Box::new(TypeError::TypeMismatch {
                        expected: "Map".to_string(),
                        got: row.type_name(),
                    }),
                });
            };
            for (name, value) in fields {
                let schema = self.attributes.get(name).ok_or_else(|| {
                    TypeError::BlockItemError {
                        index,
                        attribute: name.clone(),
                        inner: Box::new(TypeError::UnknownAttribute { name: name.clone() }),
                    }
                })?;
                schema
                    .attr_type
                    .validate(value)
                    .map_err(|e| TypeError::BlockItemError {
                        index,
                        attribute: name.clone(),
                        inner: Box::new(e),
                    })?;
            }
        }
        Ok(())
    }
}

/// Every attribute a resource type accepts or reports
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Attribute names in a stable order
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check manifest attributes; all problems are reported, not just the first
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in attributes {
            match self.attributes.get(name) {
                Some(schema) if schema.is_read_only() => {
                    errors.push(TypeError::ReadOnlyAttribute { name: name.clone() });
                }
                Some(schema) => {
                    if let Err(e) = schema.attr_type.validate(value) {
                        errors.push(e);
                    }
                }
                None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Checked scalar types used by generated schemas
pub mod types {
    use super::*;

    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| {
                if let Value::Int(n) = value {
                    if *n > 0 {
                        Ok(())
                    } else {
                        Err("Value must be positive".to_string())
                    }
                } else {
                    Err("Expected integer".to_string())
                }
            },
            canonical: None,
        }
    }

    /// IPv4 address type (e.g., "10.0.0.1")
    pub fn ipv4() -> AttributeType {
        AttributeType::Custom {
            name: "Ipv4".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_ipv4(s)
                } else {
                    Err("Expected string".to_string())
                }
            },
            canonical: None,
        }
    }

    /// IPv4 address with mask, either "10.0.0.0 255.255.255.0" or "10.0.0.0/24".
    ///
    /// The device reports the dotted-mask form, so prefixes are rewritten to it.
    pub fn ipv4_mask() -> AttributeType {
        AttributeType::Custom {
            name: "Ipv4Mask".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_ipv4_mask(s)
                } else {
                    Err("Expected string".to_string())
                }
            },
            canonical: Some(ipv4_mask_value as fn(&Value) -> Value),
        }
    }

    fn ipv4_mask_value(value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(canonical_ipv4_mask(s)),
            other => other.clone(),
        }
    }

    /// Port or port range ("443", "1000-2000")
    pub fn port_range() -> AttributeType {
        AttributeType::Custom {
            name: "PortRange".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_port_range(s)
                } else {
                    Err("Expected string".to_string())
                }
            },
            canonical: None,
        }
    }
}

/// Validate dotted IPv4 address format
pub fn validate_ipv4(ip: &str) -> Result<(), String> {
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(format!("Invalid IP address '{}': expected 4 octets", ip));
    }

    for octet in &octets {
        if octet.parse::<u8>().is_err() {
            return Err(format!(
                "Invalid octet '{}' in IP address: must be 0-255",
                octet
            ));
        }
    }
    Ok(())
}

/// Validate "address mask" or "address/prefix" pairs
pub fn validate_ipv4_mask(s: &str) -> Result<(), String> {
    if let Some((ip, prefix)) = s.split_once('/') {
        validate_ipv4(ip)?;
        return match prefix.parse::<u8>() {
            Ok(p) if p <= 32 => Ok(()),
            Ok(p) => Err(format!("Invalid prefix length '{}': must be 0-32", p)),
            Err(_) => Err(format!(
                "Invalid prefix length '{}': must be a number",
                prefix
            )),
        };
    }

    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid address '{}': expected 'IP MASK' or 'IP/prefix'",
            s
        ));
    }
    validate_ipv4(parts[0])?;
    validate_ipv4(parts[1])?;

    let mask: u32 = parts[1]
        .split('.')
        .filter_map(|o| o.parse::<u8>().ok())
        .fold(0u32, |acc, o| (acc << 8) | u32::from(o));
    if mask.leading_ones() + mask.trailing_zeros() != 32 {
        return Err(format!("Invalid netmask '{}': not contiguous", parts[1]));
    }
    Ok(())
}

/// Rewrite "10.0.0.0/24" as "10.0.0.0 255.255.255.0" and collapse runs of
/// whitespace. Input that does not validate is returned trimmed.
pub fn canonical_ipv4_mask(s: &str) -> String {
    if validate_ipv4_mask(s).is_err() {
        return s.trim().to_string();
    }
    match s.split_once('/') {
        Some((ip, prefix)) => {
            let bits = prefix.trim().parse::<u32>().unwrap_or(32);
            let mask = u32::MAX.checked_shl(32 - bits).unwrap_or(0);
            format!("{} {}", ip.trim(), std::net::Ipv4Addr::from(mask))
        }
        None => s.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Validate a port or a low-high port range
pub fn validate_port_range(s: &str) -> Result<(), String> {
    let parse = |p: &str| {
        p.trim()
            .parse::<u16>()
            .map_err(|_| format!("Invalid port '{}': must be 0-65535", p))
    };
    match s.split_once('-') {
        Some((low, high)) => {
            let (low, high) = (parse(low)?, parse(high)?);
            if low > high {
                return Err(format!("Invalid port range '{}': low > high", s));
            }
            Ok(())
        }
        None => parse(s).map(|_| ()),
    }
}

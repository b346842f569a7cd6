//! Differ - Compare desired state with current state to generate a Plan
//!
//! Compares the "desired state" declared in the manifest with the "current
//! state" read from the device, and generates the list of required Effects.
//! Only attributes present in the desired state are compared, so values the
//! device fills in on its own never show up as changes.

use std::collections::{HashMap, HashSet};

use crate::effect::Effect;
use crate::plan::Plan;
use crate::resource::{Resource, ResourceId, State, Value};
use crate::schema::{AttributeType, ResourceSchema};

/// Result of a diff operation
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// Resource does not exist -> needs creation
    Create(Resource),
    /// Resource exists with differences -> needs update
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
    },
    /// A force-new attribute changed -> delete then create
    Replace {
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
    },
    /// Resource exists with no differences -> no action needed
    NoChange(ResourceId),
}

impl Diff {
    /// Returns whether this Diff involves a change
    pub fn is_change(&self) -> bool {
        !matches!(self, Diff::NoChange(_))
    }
}

/// Compare desired state with current state to compute a Diff
pub fn diff(desired: &Resource, current: &State, schema: Option<&ResourceSchema>) -> Diff {
    if !current.exists {
        return Diff::Create(desired.clone());
    }

    let changed = find_changed_attributes(&desired.attributes, &current.attributes, schema);

    if changed.is_empty() {
        return Diff::NoChange(desired.id.clone());
    }

    let replace = schema.is_some_and(|s| {
        changed
            .iter()
            .any(|name| s.get(name).is_some_and(|a| a.force_new))
    });

    if replace {
        Diff::Replace {
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
        }
    } else {
        Diff::Update {
            id: desired.id.clone(),
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
        }
    }
}

/// Find changed attributes between desired and current state
fn find_changed_attributes(
    desired: &HashMap<String, Value>,
    current: &HashMap<String, Value>,
    schema: Option<&ResourceSchema>,
) -> Vec<String> {
    let mut changed = Vec::new();

    for (key, desired_value) in desired {
        let attr = schema.and_then(|s| s.get(key));
        if attr.is_some_and(|a| a.is_read_only()) {
            continue;
        }

        let equal = match current.get(key) {
            Some(current_value) => match attr {
                Some(a) => values_equal(desired_value, current_value, &a.attr_type),
                None => desired_value == current_value,
            },
            None => desired_value.is_empty(),
        };
        if !equal {
            changed.push(key.clone());
        }
    }

    changed.sort();
    changed
}

/// Compare a desired value against the current one under an attribute type.
///
/// Both sides are compared in canonical form, so "10.0.0.0/24" matches the
/// "10.0.0.0 255.255.255.0" the device reports.
pub fn values_equal(desired: &Value, current: &Value, attr_type: &AttributeType) -> bool {
    match (attr_type, desired, current) {
        (AttributeType::Set(inner), Value::List(a), Value::List(b)) => {
            let keys = |items: &[Value]| -> HashSet<String> {
                items
                    .iter()
                    .map(|v| inner.canonicalize(v).to_key_string())
                    .collect()
            };
            keys(a) == keys(b)
        }
        (AttributeType::Block(block), Value::List(a), Value::List(b)) => {
            a.len() == b.len()
                && a.iter().zip(b).all(|(da, cb)| match (da, cb) {
                    (Value::Map(dr), Value::Map(cr)) => dr.iter().all(|(k, dv)| {
                        match (block.attributes.get(k), cr.get(k)) {
                            (Some(s), _) if s.sensitive => true,
                            (Some(s), Some(cv)) => values_equal(dv, cv, &s.attr_type),
                            (None, Some(cv)) => dv == cv,
                            (_, None) => dv.is_empty(),
                        }
                    }),
                    _ => da == cb,
                })
        }
        _ => attr_type.canonicalize(desired) == attr_type.canonicalize(current),
    }
}

/// Compute Diffs for multiple resources and generate a Plan.
///
/// Existing states with no desired counterpart are planned for deletion.
pub fn create_plan(
    desired: &[Resource],
    current_states: &HashMap<ResourceId, State>,
    schemas: &HashMap<String, ResourceSchema>,
) -> Plan {
    let mut plan = Plan::new();

    for resource in desired {
        let current = current_states
            .get(&resource.id)
            .cloned()
            .unwrap_or_else(|| State::not_found(resource.id.clone()));

        let d = diff(resource, &current, schemas.get(&resource.id.resource_type));

        match d {
            Diff::Create(r) => plan.add(Effect::Create(r)),
            Diff::Update {
                id,
                from,
                to,
                changed_attributes,
            } => plan.add(Effect::Update {
                id,
                from,
                to,
                changed_attributes,
            }),
            Diff::Replace { from, to, .. } => {
                plan.add(Effect::Delete {
                    id: from.id.clone(),
                    identifier: from.identifier.clone().unwrap_or_default(),
                    attributes: from.attributes.clone(),
                });
                plan.add(Effect::Create(to));
            }
            Diff::NoChange(_) => {}
        }
    }

    let wanted: HashSet<&ResourceId> = desired.iter().map(|r| &r.id).collect();
    let mut orphans: Vec<&State> = current_states
        .values()
        .filter(|s| s.exists && !wanted.contains(&s.id))
        .collect();
    orphans.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
    for state in orphans {
        if let Some(identifier) = &state.identifier {
            plan.add(Effect::Delete {
                id: state.id.clone(),
                identifier: identifier.clone(),
                attributes: state.attributes.clone(),
            });
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, BlockSchema};

    fn dns_translation_schema() -> ResourceSchema {
        ResourceSchema::new("firewall_dnstranslation")
            .attribute(AttributeSchema::new("fosid", AttributeType::Int).force_new())
            .attribute(AttributeSchema::new("src", AttributeType::String))
            .attribute(AttributeSchema::new("dst", AttributeType::String))
    }

    fn schemas() -> HashMap<String, ResourceSchema> {
        let mut m = HashMap::new();
        m.insert(
            "firewall_dnstranslation".to_string(),
            dns_translation_schema(),
        );
        m
    }

    #[test]
    fn diff_create_when_not_exists() {
        let desired = Resource::new("firewall_dnstranslation", "web");
        let current = State::not_found(ResourceId::new("firewall_dnstranslation", "web"));

        let result = diff(&desired, &current, None);
        assert!(matches!(result, Diff::Create(_)));
    }

    #[test]
    fn diff_no_change_ignores_extra_current_attributes() {
        let desired = Resource::new("firewall_dnstranslation", "web")
            .with_attribute("src", Value::from("10.0.0.1"));

        let mut attrs = HashMap::new();
        attrs.insert("src".to_string(), Value::from("10.0.0.1"));
        attrs.insert("netmask".to_string(), Value::from("255.255.255.255"));
        let current = State::existing(ResourceId::new("firewall_dnstranslation", "web"), attrs);

        let result = diff(&desired, &current, Some(&dns_translation_schema()));
        assert!(matches!(result, Diff::NoChange(_)));
    }

    #[test]
    fn diff_update_when_different() {
        let desired = Resource::new("firewall_dnstranslation", "web")
            .with_attribute("dst", Value::from("192.0.2.1"));

        let mut attrs = HashMap::new();
        attrs.insert("dst".to_string(), Value::from("192.0.2.9"));
        let current = State::existing(ResourceId::new("firewall_dnstranslation", "web"), attrs);

        match diff(&desired, &current, Some(&dns_translation_schema())) {
            Diff::Update {
                changed_attributes, ..
            } => assert_eq!(changed_attributes, vec!["dst".to_string()]),
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn diff_replace_on_force_new() {
        let desired = Resource::new("firewall_dnstranslation", "web")
            .with_attribute("fosid", Value::Int(2));

        let mut attrs = HashMap::new();
        attrs.insert("fosid".to_string(), Value::Int(1));
        let current = State::existing(ResourceId::new("firewall_dnstranslation", "web"), attrs)
            .with_identifier("1");

        assert!(matches!(
            diff(&desired, &current, Some(&dns_translation_schema())),
            Diff::Replace { .. }
        ));
    }

    #[test]
    fn set_attributes_ignore_order() {
        let t = AttributeType::string_set();
        let a = Value::List(vec![Value::from("a"), Value::from("b")]);
        let b = Value::List(vec![Value::from("b"), Value::from("a")]);
        assert!(values_equal(&a, &b, &t));
        assert!(!values_equal(&a, &b, &AttributeType::List(Box::new(AttributeType::String))));
    }

    #[test]
    fn prefix_matches_reported_mask() {
        let schema = ResourceSchema::new("router_static")
            .attribute(AttributeSchema::new("dst", crate::schema::types::ipv4_mask()));
        let desired = Resource::new("router_static", "default")
            .with_attribute("dst", Value::from("10.20.0.0/16"));
        let id = ResourceId::new("router_static", "default");

        let reported = HashMap::from([("dst".to_string(), Value::from("10.20.0.0 255.255.0.0"))]);
        let current = State::existing(id.clone(), reported).with_identifier("1");
        assert!(matches!(diff(&desired, &current, Some(&schema)), Diff::NoChange(_)));

        let moved = HashMap::from([("dst".to_string(), Value::from("10.30.0.0 255.255.0.0"))]);
        let current = State::existing(id, moved).with_identifier("1");
        assert!(matches!(diff(&desired, &current, Some(&schema)), Diff::Update { .. }));
    }

    #[test]
    fn block_compares_only_desired_fields() {
        let block = BlockSchema::new()
            .attribute(AttributeSchema::new("id", AttributeType::String))
            .attribute(AttributeSchema::new("cost", AttributeType::Int))
            .into_type();

        let mut d = HashMap::new();
        d.insert("id".to_string(), Value::from("0.0.0.0"));
        let mut c = d.clone();
        c.insert("cost".to_string(), Value::Int(10));

        assert!(values_equal(
            &Value::List(vec![Value::Map(d.clone())]),
            &Value::List(vec![Value::Map(c.clone())]),
            &block
        ));

        d.insert("cost".to_string(), Value::Int(20));
        assert!(!values_equal(
            &Value::List(vec![Value::Map(d)]),
            &Value::List(vec![Value::Map(c)]),
            &block
        ));
    }

    #[test]
    fn create_plan_from_resources() {
        let resources = vec![
            Resource::new("firewall_dnstranslation", "new")
                .with_attribute("fosid", Value::Int(1)),
            Resource::new("firewall_dnstranslation", "existing")
                .with_attribute("src", Value::from("10.0.0.2")),
        ];

        let mut current_states = HashMap::new();
        let mut attrs = HashMap::new();
        attrs.insert("src".to_string(), Value::from("10.0.0.1"));
        current_states.insert(
            ResourceId::new("firewall_dnstranslation", "existing"),
            State::existing(ResourceId::new("firewall_dnstranslation", "existing"), attrs)
                .with_identifier("2"),
        );
        current_states.insert(
            ResourceId::new("firewall_dnstranslation", "stale"),
            State::existing(
                ResourceId::new("firewall_dnstranslation", "stale"),
                HashMap::new(),
            )
            .with_identifier("9"),
        );

        let plan = create_plan(&resources, &current_states, &schemas());

        assert_eq!(plan.effects().len(), 3);
        assert!(matches!(plan.effects()[0], Effect::Create(_)));
        assert!(matches!(plan.effects()[1], Effect::Update { .. }));
        match &plan.effects()[2] {
            Effect::Delete { identifier, .. } => assert_eq!(identifier, "9"),
            other => panic!("Expected Delete, got {:?}", other),
        }
    }

    #[test]
    fn replace_plans_delete_then_create() {
        let resources = vec![
            Resource::new("firewall_dnstranslation", "web").with_attribute("fosid", Value::Int(5)),
        ];
        let mut attrs = HashMap::new();
        attrs.insert("fosid".to_string(), Value::Int(4));
        let mut current_states = HashMap::new();
        current_states.insert(
            ResourceId::new("firewall_dnstranslation", "web"),
            State::existing(ResourceId::new("firewall_dnstranslation", "web"), attrs)
                .with_identifier("4"),
        );

        let plan = create_plan(&resources, &current_states, &schemas());
        assert_eq!(plan.effects().len(), 2);
        assert!(matches!(plan.effects()[0], Effect::Delete { .. }));
        assert!(matches!(plan.effects()[1], Effect::Create(_)));
    }
}

//! Ordered effects computed by the differ
//!
//! Nothing touches the device until a [`Plan`] is handed to the interpreter.

use std::fmt;

use crate::effect::Effect;

#[derive(Debug, Clone, Default)]
pub struct Plan {
    effects: Vec<Effect>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// True when no effect would change the device
    pub fn is_empty(&self) -> bool {
        !self.effects.iter().any(Effect::is_mutating)
    }

    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        let mut previous: Option<&Effect> = None;
        for effect in &self.effects {
            match effect {
                Effect::Read(_) => {}
                Effect::Create(resource) => {
                    // A delete immediately followed by a create of the same
                    // address is a force-new replacement
                    match previous {
                        Some(Effect::Delete { id, .. }) if *id == resource.id => {
                            summary.delete -= 1;
                            summary.replace += 1;
                        }
                        _ => summary.create += 1,
                    }
                }
                Effect::Update { .. } => summary.update += 1,
                Effect::Delete { .. } => summary.delete += 1,
            }
            previous = Some(effect);
        }
        summary
    }
}

impl FromIterator<Effect> for Plan {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

/// Counts shown under a rendered plan
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub update: usize,
    pub replace: usize,
    pub delete: usize,
}

impl PlanSummary {
    pub fn total(&self) -> usize {
        self.create + self.update + self.replace + self.delete
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to add, {} to change, {} to replace, {} to destroy",
            self.create, self.update, self.replace, self.delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, ResourceId};

    fn delete(name: &str, identifier: &str) -> Effect {
        Effect::Delete {
            id: ResourceId::new("firewall_dnstranslation", name),
            identifier: identifier.to_string(),
            attributes: Default::default(),
        }
    }

    #[test]
    fn reads_alone_are_empty() {
        let plan: Plan = [Effect::Read(ResourceId::new("system_dns", "dns"))]
            .into_iter()
            .collect();
        assert!(plan.is_empty());
        assert_eq!(plan.effects().len(), 1);
        assert_eq!(plan.summary().total(), 0);
    }

    #[test]
    fn summary_counts_each_kind() {
        let mut plan = Plan::new();
        plan.add(Effect::Create(Resource::new("firewall_dnstranslation", "a")));
        plan.add(Effect::Create(Resource::new("firewall_dnstranslation", "b")));
        plan.add(delete("c", "3"));

        let summary = plan.summary();
        assert!(!plan.is_empty());
        assert_eq!(
            summary,
            PlanSummary {
                create: 2,
                update: 0,
                replace: 0,
                delete: 1
            }
        );
        assert_eq!(
            summary.to_string(),
            "2 to add, 0 to change, 0 to replace, 1 to destroy"
        );
    }

    #[test]
    fn delete_then_create_counts_as_replace() {
        let mut plan = Plan::new();
        plan.add(delete("web", "7"));
        plan.add(Effect::Create(Resource::new("firewall_dnstranslation", "web")));
        plan.add(delete("old", "8"));
        plan.add(Effect::Create(Resource::new("firewall_dnstranslation", "new")));

        let summary = plan.summary();
        assert_eq!(summary.replace, 1);
        assert_eq!(summary.delete, 1);
        assert_eq!(summary.create, 1);
        assert_eq!(summary.total(), 3);
    }
}

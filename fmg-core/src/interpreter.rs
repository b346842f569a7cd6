//! Runs a [`Plan`] against a provider
//!
//! Effects run in plan order. The first failure stops the run so that a
//! replacement never creates an object whose predecessor is still present.

use std::collections::HashMap;

use log::{debug, warn};

use crate::effect::Effect;
use crate::plan::Plan;
use crate::provider::{Provider, ProviderError, ProviderResult};
use crate::resource::State;

/// What a successful effect left behind
#[derive(Debug)]
pub enum EffectOutcome {
    Read { state: State },
    Created { state: State },
    Updated { state: State },
    Deleted,
}

impl EffectOutcome {
    /// State to record, if the object still exists
    pub fn state(&self) -> Option<&State> {
        match self {
            EffectOutcome::Read { state }
            | EffectOutcome::Created { state }
            | EffectOutcome::Updated { state } => Some(state),
            EffectOutcome::Deleted => None,
        }
    }
}

/// One entry per attempted effect, in plan order
#[derive(Debug)]
pub struct ApplyResult {
    pub outcomes: Vec<Result<EffectOutcome, ProviderError>>,
    pub success_count: usize,
    pub failure_count: usize,
}

impl ApplyResult {
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    /// Effects of `plan` never attempted because of an earlier failure
    pub fn not_attempted(&self, plan: &Plan) -> usize {
        plan.effects().len().saturating_sub(self.outcomes.len())
    }
}

pub struct Interpreter<P: Provider> {
    provider: P,
}

impl<P: Provider> Interpreter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn apply(&self, plan: &Plan) -> ApplyResult {
        let mut result = ApplyResult {
            outcomes: Vec::with_capacity(plan.effects().len()),
            success_count: 0,
            failure_count: 0,
        };

        for effect in plan.effects() {
            debug!("executing {}", effect);
            match self.execute(effect).await {
                Ok(outcome) => {
                    result.success_count += 1;
                    result.outcomes.push(Ok(outcome));
                }
                Err(e) => {
                    warn!("{} failed: {}", effect, e);
                    result.failure_count += 1;
                    result.outcomes.push(Err(e));
                    break;
                }
            }
        }

        result
    }

    async fn execute(&self, effect: &Effect) -> ProviderResult<EffectOutcome> {
        let outcome = match effect {
            Effect::Read(id) => EffectOutcome::Read {
                state: self.provider.read(id, None, &HashMap::new()).await?,
            },
            Effect::Create(resource) => EffectOutcome::Created {
                state: self.provider.create(resource).await?,
            },
            Effect::Update { id, from, to, .. } => {
                let identifier = from.identifier.as_deref().unwrap_or_default();
                EffectOutcome::Updated {
                    state: self.provider.update(id, identifier, from, to).await?,
                }
            }
            Effect::Delete {
                id,
                identifier,
                attributes,
            } => {
                self.provider.delete(id, identifier, attributes).await?;
                EffectOutcome::Deleted
            }
        };
        Ok(outcome)
    }
}

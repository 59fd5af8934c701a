//! Step resolution - which step reacts to a trigger.
//!
//! Resolution narrows the model's steps in three passes (trigger kind,
//! actor, enablement), then applies interrupt priority: if any candidate
//! carries an explicitly declared predicate, plain follow-on steps yield
//! to it. What survives must be a single step; anything more is an
//! ambiguity the model's author has to resolve.

use std::any::TypeId;

use scenario_core::{ActorId, Model, Position, Step, StepId};

use crate::error::RunnerError;

/// What the runner is trying to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// An external message of the given runtime type.
    Message(TypeId),
    /// The auto-dispatch pass: steps that need no message.
    Auto,
}

pub(crate) fn resolve(
    model: &Model,
    actor: Option<ActorId>,
    position: &Position,
    trigger: Trigger,
) -> Result<Option<StepId>, RunnerError> {
    let mut candidates: Vec<&Step> = model
        .steps()
        .filter(|step| matches_trigger(step, trigger))
        .filter(|step| matches_actor(step, actor))
        .filter(|step| step.is_enabled(position))
        .collect();

    // Interrupt priority: an explicitly scoped step (alternative flow
    // entry, guard, repeat) takes over from plain follow-on steps.
    if candidates.iter().any(|step| step.has_explicit_predicate()) {
        candidates.retain(|step| step.has_explicit_predicate());
    }

    match candidates.as_slice() {
        [] => Ok(None),
        [step] => Ok(Some(step.id())),
        steps => Err(RunnerError::AmbiguousReaction {
            steps: steps
                .iter()
                .map(|step| model.qualified_step_name(step.id()))
                .collect(),
        }),
    }
}

fn matches_trigger(step: &Step, trigger: Trigger) -> bool {
    match trigger {
        Trigger::Message(type_id) => step
            .message()
            .is_some_and(|key| key.type_id() == type_id),
        Trigger::Auto => step.message().is_none(),
    }
}

fn matches_actor(step: &Step, actor: Option<ActorId>) -> bool {
    step.actors().is_empty() || actor.is_some_and(|actor| step.actors().contains(&actor))
}

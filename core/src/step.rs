//! Step - the atomic reactive unit of a use case.
//!
//! A step declares what kind of message it reacts to, who may trigger it,
//! under which predicate it is enabled and what reaction it performs. The
//! enablement rules mirror the flow structure: a plain step is enabled
//! directly after its flow predecessor; a step carrying flow modifiers is
//! enabled by those instead; a repeating step additionally re-arms itself.

use crate::actor::ActorId;
use crate::condition::Condition;
use crate::flow::FlowId;
use crate::flow_position::{FlowPosition, Position};
use crate::message::MessageKey;
use crate::reaction::Reaction;
use crate::use_case::UseCaseId;

/// Stable index of a step within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(pub(crate) usize);

/// Control transfer applied after the declaring step executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The target step fires next.
    At(StepId),
    /// The target step's declared successor fires next.
    After(StepId),
}

#[derive(Debug, Clone)]
pub struct Step {
    pub(crate) id: StepId,
    pub(crate) name: String,
    pub(crate) use_case: UseCaseId,
    pub(crate) flow: FlowId,
    pub(crate) previous_in_flow: Option<StepId>,
    pub(crate) actors: Vec<ActorId>,
    pub(crate) message: Option<MessageKey>,
    pub(crate) reaction: Reaction,
    pub(crate) flow_position: Option<FlowPosition>,
    pub(crate) when: Option<Condition>,
    pub(crate) repeat_while: Option<Condition>,
    pub(crate) continuation: Option<Continuation>,
    pub(crate) publish_to: Option<ActorId>,
}

impl Step {
    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn use_case(&self) -> UseCaseId {
        self.use_case
    }

    pub fn flow(&self) -> FlowId {
        self.flow
    }

    /// The step preceding this one in its flow; `None` for a flow's first step.
    pub fn previous_in_flow(&self) -> Option<StepId> {
        self.previous_in_flow
    }

    /// Allowed actors; empty means any actor may trigger the step.
    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    /// Declared message type; `None` marks an automatic step that needs no
    /// external trigger.
    pub fn message(&self) -> Option<&MessageKey> {
        self.message.as_ref()
    }

    pub fn reaction(&self) -> &Reaction {
        &self.reaction
    }

    pub fn continuation(&self) -> Option<Continuation> {
        self.continuation
    }

    pub fn publish_to(&self) -> Option<ActorId> {
        self.publish_to
    }

    /// Whether this step carries an explicitly declared predicate (flow
    /// position, when-guard or repeat-condition). Steps without one yield
    /// to explicitly scoped steps during resolution.
    pub fn has_explicit_predicate(&self) -> bool {
        self.flow_position.is_some() || self.when.is_some() || self.repeat_while.is_some()
    }

    /// The step's effective predicate, minus the interrupt-priority rule
    /// (which needs the whole candidate set and lives in the runtime).
    pub fn is_enabled(&self, position: &Position) -> bool {
        if let Some(repeat_while) = &self.repeat_while {
            // Repeating steps re-arm in place: once they are the latest
            // executed step, the repeat condition alone keeps them enabled.
            let repeating = position.latest_step == Some(self.id) && repeat_while.check();
            return repeating || self.flow_predicate(position);
        }
        self.flow_predicate(position)
    }

    fn flow_predicate(&self, position: &Position) -> bool {
        if self.has_flow_modifiers() {
            // A flow entry must not re-trigger while the runner is already
            // positioned inside that same flow.
            self.is_in_different_flow(position)
                && self
                    .flow_position
                    .as_ref()
                    .is_none_or(|p| p.evaluate(position))
                && self.when.as_ref().is_none_or(Condition::check)
        } else {
            // Default: enabled directly after the flow predecessor (or at
            // the very start, for a first step).
            position.latest_step == self.previous_in_flow
        }
    }

    fn has_flow_modifiers(&self) -> bool {
        self.flow_position.is_some() || self.when.is_some()
    }

    fn is_in_different_flow(&self, position: &Position) -> bool {
        position.latest_flow != Some(self.flow)
    }
}

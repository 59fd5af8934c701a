//! Fluent model builder.
//!
//! The builder moves through part types the way declarations read:
//! `Model::builder().use_case(..).basic_flow().step(..).on::<T>().system(..)`.
//! Each part owns the model under construction, so a step cannot be left
//! without a reaction - the chain only continues once one is supplied.
//!
//! Errors are deferred: the first failure is remembered, every later call
//! becomes a no-op, and `build()` surfaces it. All cross references
//! (`after`, `instead_of`, `continues_at`, ...) must resolve to steps that
//! already exist when they are declared.

use std::any::Any;
use std::marker::PhantomData;

use ahash::AHashMap;
use uuid::Uuid;

use crate::actor::{Actor, ActorId};
use crate::condition::Condition;
use crate::error::BuildError;
use crate::flow::{Flow, FlowId};
use crate::flow_position::FlowPosition;
use crate::message::{AnyMessage, Fault, MessageKey};
use crate::model::Model;
use crate::reaction::Reaction;
use crate::step::{Continuation, Step, StepId};
use crate::use_case::{UseCase, UseCaseId};

const BASIC_FLOW: &str = "basic flow";

struct Core {
    use_cases: Vec<UseCase>,
    flows: Vec<Flow>,
    steps: Vec<Step>,
    actors: Vec<Actor>,
    use_case_names: AHashMap<String, UseCaseId>,
    actor_names: AHashMap<String, ActorId>,
    step_names: AHashMap<(UseCaseId, String), StepId>,
    flow_names: AHashMap<(UseCaseId, String), FlowId>,
    error: Option<BuildError>,
}

impl Core {
    fn new() -> Self {
        Self {
            use_cases: Vec::new(),
            flows: Vec::new(),
            steps: Vec::new(),
            actors: Vec::new(),
            use_case_names: AHashMap::new(),
            actor_names: AHashMap::new(),
            step_names: AHashMap::new(),
            flow_names: AHashMap::new(),
            error: None,
        }
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn fail(&mut self, error: BuildError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn ensure_actor(&mut self, name: &str) -> ActorId {
        if let Some(id) = self.actor_names.get(name) {
            return *id;
        }
        let id = ActorId(self.actors.len());
        self.actors.push(Actor {
            id,
            name: name.to_string(),
        });
        self.actor_names.insert(name.to_string(), id);
        id
    }

    fn new_use_case(&mut self, name: &str) -> UseCaseId {
        if self.failed() {
            return UseCaseId(0);
        }
        if self.use_case_names.contains_key(name) {
            self.fail(BuildError::ElementAlreadyInModel(name.to_string()));
            return UseCaseId(0);
        }
        let id = UseCaseId(self.use_cases.len());
        let basic_flow = self.push_flow(id, BASIC_FLOW);
        self.use_cases.push(UseCase {
            id,
            name: name.to_string(),
            basic_flow,
            flows: vec![basic_flow],
        });
        self.use_case_names.insert(name.to_string(), id);
        id
    }

    fn new_flow(&mut self, use_case: UseCaseId, name: &str) -> FlowId {
        if self.failed() {
            return FlowId(0);
        }
        if self
            .flow_names
            .contains_key(&(use_case, name.to_string()))
        {
            self.fail(BuildError::ElementAlreadyInModel(name.to_string()));
            return FlowId(0);
        }
        let id = self.push_flow(use_case, name);
        self.use_cases[use_case.0].flows.push(id);
        id
    }

    fn push_flow(&mut self, use_case: UseCaseId, name: &str) -> FlowId {
        let id = FlowId(self.flows.len());
        self.flows.push(Flow {
            id,
            name: name.to_string(),
            use_case,
            steps: Vec::new(),
            position: None,
            when: None,
        });
        self.flow_names.insert((use_case, name.to_string()), id);
        id
    }

    fn find_step(&self, use_case: UseCaseId, name: &str) -> Option<StepId> {
        self.step_names.get(&(use_case, name.to_string())).copied()
    }

    fn set_position(&mut self, flow: FlowId, position: FlowPosition) {
        if self.failed() {
            return;
        }
        if !self.flows[flow.0].steps.is_empty() {
            let name = self.flows[flow.0].name.clone();
            self.fail(BuildError::FlowAlreadyStarted(name));
            return;
        }
        self.flows[flow.0].position = Some(position);
    }

    fn set_when(&mut self, flow: FlowId, when: Condition) {
        if self.failed() {
            return;
        }
        if !self.flows[flow.0].steps.is_empty() {
            let name = self.flows[flow.0].name.clone();
            self.fail(BuildError::FlowAlreadyStarted(name));
            return;
        }
        self.flows[flow.0].when = Some(when);
    }

    fn commit_step(&mut self, draft: StepDraft) -> StepId {
        if self.failed() {
            return StepId(0);
        }
        let id = StepId(self.steps.len());
        let flow = &self.flows[draft.flow.0];
        let previous_in_flow = flow.steps.last().copied();
        // The flow's modifiers gate its first step; later steps follow
        // their predecessor.
        let (flow_position, when) = if flow.steps.is_empty() {
            (flow.position.clone(), flow.when.clone())
        } else {
            (None, None)
        };
        tracing::debug!(step = %draft.name, flow = %flow.name, "step declared");
        self.steps.push(Step {
            id,
            name: draft.name.clone(),
            use_case: draft.use_case,
            flow: draft.flow,
            previous_in_flow,
            actors: draft.actors,
            message: draft.message,
            reaction: draft.reaction,
            flow_position,
            when,
            repeat_while: None,
            continuation: draft.continuation,
            publish_to: draft.publish_to,
        });
        self.flows[draft.flow.0].steps.push(id);
        self.step_names.insert((draft.use_case, draft.name), id);
        id
    }

    fn build(self) -> Result<Model, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let model = Model {
            id: Uuid::new_v4(),
            use_cases: self.use_cases,
            flows: self.flows,
            steps: self.steps,
            actors: self.actors,
            use_case_names: self.use_case_names,
            actor_names: self.actor_names,
            step_names: self.step_names,
        };
        tracing::debug!(model = %model.id(), steps = model.steps.len(), "model built");
        Ok(model)
    }
}

struct StepDraft {
    name: String,
    use_case: UseCaseId,
    flow: FlowId,
    actors: Vec<ActorId>,
    message: Option<MessageKey>,
    reaction: Reaction,
    continuation: Option<Continuation>,
    publish_to: Option<ActorId>,
}

/// Entry point of the fluent construction API.
pub struct ModelBuilder {
    core: Core,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self { core: Core::new() }
    }

    /// Declare an actor up front. Actors referenced by steps are created
    /// on demand; declaring them here only fixes their order.
    pub fn actor(mut self, name: &str) -> Self {
        self.core.ensure_actor(name);
        self
    }

    pub fn use_case(mut self, name: &str) -> UseCasePart {
        let use_case = self.core.new_use_case(name);
        UseCasePart {
            core: self.core,
            use_case,
        }
    }

    pub fn build(self) -> Result<Model, BuildError> {
        self.core.build()
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the details of one use case.
pub struct UseCasePart {
    core: Core,
    use_case: UseCaseId,
}

impl UseCasePart {
    /// The "happy day" flow, created with the use case.
    pub fn basic_flow(self) -> FlowPart {
        let flow = if self.core.failed() {
            FlowId(0)
        } else {
            self.core.use_cases[self.use_case.0].basic_flow
        };
        FlowPart {
            core: self.core,
            use_case: self.use_case,
            flow,
        }
    }

    /// A named alternative flow.
    pub fn flow(mut self, name: &str) -> FlowPart {
        let flow = self.core.new_flow(self.use_case, name);
        FlowPart {
            core: self.core,
            use_case: self.use_case,
            flow,
        }
    }

    pub fn use_case(mut self, name: &str) -> UseCasePart {
        let use_case = self.core.new_use_case(name);
        UseCasePart {
            core: self.core,
            use_case,
        }
    }

    pub fn build(self) -> Result<Model, BuildError> {
        self.core.build()
    }
}

/// Builds one flow: position modifiers first, then steps.
pub struct FlowPart {
    core: Core,
    use_case: UseCaseId,
    flow: FlowId,
}

impl FlowPart {
    pub fn anytime(mut self) -> Self {
        self.core.set_position(self.flow, FlowPosition::Anytime);
        self
    }

    pub fn at_first(mut self) -> Self {
        self.core.set_position(self.flow, FlowPosition::AtFirst);
        self
    }

    /// Position this flow directly after a step of the same use case.
    pub fn after(mut self, step: &str) -> Self {
        match self.core.find_step(self.use_case, step) {
            Some(target) => self.core.set_position(
                self.flow,
                FlowPosition::After { step: Some(target) },
            ),
            None => self.core.fail(BuildError::NoSuchElementInModel(step.to_string())),
        }
        self
    }

    /// Position this flow after a step of another use case.
    pub fn after_in(mut self, step: &str, use_case: &str) -> Self {
        if self.core.failed() {
            return self;
        }
        let Some(&target_use_case) = self.core.use_case_names.get(use_case) else {
            self.core.fail(BuildError::NoSuchElementInModel(use_case.to_string()));
            return self;
        };
        match self.core.find_step(target_use_case, step) {
            Some(target) => self.core.set_position(
                self.flow,
                FlowPosition::After { step: Some(target) },
            ),
            None => self.core.fail(BuildError::NoSuchElementInModel(step.to_string())),
        }
        self
    }

    /// Offer this flow as an alternative at the point `step` would fire.
    pub fn instead_of(mut self, step: &str) -> Self {
        if self.core.failed() {
            return self;
        }
        match self.core.find_step(self.use_case, step) {
            Some(target) => {
                let lowered = self.core.steps[target.0].previous_in_flow;
                self.core.set_position(
                    self.flow,
                    FlowPosition::InsteadOf {
                        step: target,
                        lowered,
                    },
                );
            }
            None => self.core.fail(BuildError::NoSuchElementInModel(step.to_string())),
        }
        self
    }

    /// Position this flow on an arbitrary application condition.
    pub fn condition(mut self, check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.core
            .set_position(self.flow, FlowPosition::Condition(Condition::new(check)));
        self
    }

    /// Guard this flow with an application condition.
    pub fn when(mut self, check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.core.set_when(self.flow, Condition::new(check));
        self
    }

    pub fn step(mut self, name: &str) -> StepPart {
        if !self.core.failed()
            && self.core.find_step(self.use_case, name).is_some()
        {
            self.core
                .fail(BuildError::ElementAlreadyInModel(name.to_string()));
        }
        StepPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            name: name.to_string(),
            actors: Vec::new(),
        }
    }

    pub fn build(self) -> Result<Model, BuildError> {
        self.core.build()
    }
}

/// Builds one step up to the point its reaction is known.
pub struct StepPart {
    core: Core,
    use_case: UseCaseId,
    flow: FlowId,
    name: String,
    actors: Vec<ActorId>,
}

impl StepPart {
    /// Restrict the step to an actor. May be called repeatedly; without
    /// any call, every actor may trigger the step.
    pub fn by(mut self, actor: &str) -> Self {
        let id = self.core.ensure_actor(actor);
        self.actors.push(id);
        self
    }

    /// Declare the message type this step reacts to - an event, a command
    /// or a failure type raised by another reaction.
    pub fn on<T: Any>(self) -> StepUserPart<T> {
        StepUserPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            name: self.name,
            actors: self.actors,
            _marker: PhantomData,
        }
    }

    /// An automatic step: no message needed, runs in the auto-dispatch pass.
    pub fn system(self, reaction: impl Fn() + Send + Sync + 'static) -> StepSystemPart {
        self.commit(
            None,
            Reaction::system(move || {
                reaction();
                Ok(None)
            }),
            None,
            None,
        )
    }

    /// An automatic step whose reaction may raise a fault.
    pub fn fallible_system(
        self,
        reaction: impl Fn() -> Result<(), Fault> + Send + Sync + 'static,
    ) -> StepSystemPart {
        self.commit(
            None,
            Reaction::system(move || reaction().map(|()| None)),
            None,
            None,
        )
    }

    /// An automatic step publishing its output to another runner.
    pub fn system_publish<U: Any + Send>(
        self,
        reaction: impl Fn() -> U + Send + Sync + 'static,
    ) -> PublishPart {
        PublishPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            name: self.name,
            actors: self.actors,
            message: None,
            reaction: Reaction::system(move || Ok(Some(Box::new(reaction()) as AnyMessage))),
        }
    }

    /// Jump: make `target` the next step to fire.
    pub fn continues_at(mut self, target: &str) -> StepSystemPart {
        let continuation = self.resolve_continuation(target, Continuation::At);
        self.commit(None, Reaction::noop(), continuation, None)
    }

    /// Jump: make `target`'s declared successor the next step to fire.
    pub fn continues_after(mut self, target: &str) -> StepSystemPart {
        let continuation = self.resolve_continuation(target, Continuation::After);
        self.commit(None, Reaction::noop(), continuation, None)
    }

    /// Jump back to the start of the owning use case's basic flow.
    pub fn restart(mut self) -> StepSystemPart {
        let continuation = restart_continuation(&mut self.core, self.use_case);
        self.commit(None, Reaction::noop(), continuation, None)
    }

    fn resolve_continuation(
        &mut self,
        target: &str,
        wrap: fn(StepId) -> Continuation,
    ) -> Option<Continuation> {
        if self.core.failed() {
            return None;
        }
        match self.core.find_step(self.use_case, target) {
            Some(step) => Some(wrap(step)),
            None => {
                self.core
                    .fail(BuildError::NoSuchElementInModel(target.to_string()));
                None
            }
        }
    }

    fn commit(
        mut self,
        message: Option<MessageKey>,
        reaction: Reaction,
        continuation: Option<Continuation>,
        publish_to: Option<ActorId>,
    ) -> StepSystemPart {
        let step = self.core.commit_step(StepDraft {
            name: self.name,
            use_case: self.use_case,
            flow: self.flow,
            actors: self.actors,
            message,
            reaction,
            continuation,
            publish_to,
        });
        StepSystemPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            step,
        }
    }
}

/// Builds a step that reacts to messages of type `T`.
pub struct StepUserPart<T> {
    core: Core,
    use_case: UseCaseId,
    flow: FlowId,
    name: String,
    actors: Vec<ActorId>,
    _marker: PhantomData<fn(T)>,
}

impl<T: Any> StepUserPart<T> {
    pub fn by(mut self, actor: &str) -> Self {
        let id = self.core.ensure_actor(actor);
        self.actors.push(id);
        self
    }

    pub fn system(self, reaction: impl Fn(&T) + Send + Sync + 'static) -> StepSystemPart {
        self.commit(Reaction::on_message(move |message| {
            if let Some(message) = message.downcast_ref::<T>() {
                reaction(message);
            }
            Ok(None)
        }))
    }

    /// A reaction that may raise a fault, to be handled by a step declared
    /// `on` the fault's type - or to propagate as an unhandled failure.
    pub fn fallible_system(
        self,
        reaction: impl Fn(&T) -> Result<(), Fault> + Send + Sync + 'static,
    ) -> StepSystemPart {
        self.commit(Reaction::on_message(move |message| {
            match message.downcast_ref::<T>() {
                Some(message) => reaction(message).map(|()| None),
                None => Ok(None),
            }
        }))
    }

    /// A reaction whose output is forwarded to another runner.
    pub fn system_publish<U: Any + Send>(
        self,
        reaction: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> PublishPart {
        PublishPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            name: self.name,
            actors: self.actors,
            message: Some(MessageKey::of::<T>()),
            reaction: Reaction::on_message(move |message| {
                Ok(message
                    .downcast_ref::<T>()
                    .map(|message| Box::new(reaction(message)) as AnyMessage))
            }),
        }
    }

    fn commit(mut self, reaction: Reaction) -> StepSystemPart {
        let step = self.core.commit_step(StepDraft {
            name: self.name,
            use_case: self.use_case,
            flow: self.flow,
            actors: self.actors,
            message: Some(MessageKey::of::<T>()),
            reaction,
            continuation: None,
            publish_to: None,
        });
        StepSystemPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            step,
        }
    }
}

/// A publishing step waiting for its recipient.
pub struct PublishPart {
    core: Core,
    use_case: UseCaseId,
    flow: FlowId,
    name: String,
    actors: Vec<ActorId>,
    message: Option<MessageKey>,
    reaction: Reaction,
}

impl PublishPart {
    /// Name the actor whose runner receives the reaction's output.
    pub fn to(mut self, actor: &str) -> StepSystemPart {
        let recipient = self.core.ensure_actor(actor);
        let step = self.core.commit_step(StepDraft {
            name: self.name,
            use_case: self.use_case,
            flow: self.flow,
            actors: self.actors,
            message: self.message,
            reaction: self.reaction,
            continuation: None,
            publish_to: Some(recipient),
        });
        StepSystemPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            step,
        }
    }
}

/// A committed step; continues the chain with siblings, flows, use cases
/// or step-level modifiers.
pub struct StepSystemPart {
    core: Core,
    use_case: UseCaseId,
    flow: FlowId,
    step: StepId,
}

impl StepSystemPart {
    /// Keep this step the sole eligible reactor while the condition holds;
    /// once it turns false the declared successor takes over.
    pub fn repeat_while(mut self, condition: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        if !self.core.failed() {
            self.core.steps[self.step.0].repeat_while = Some(Condition::new(condition));
        }
        self
    }

    /// Append a restart step to this flow.
    pub fn restart(mut self) -> StepSystemPart {
        let continuation = restart_continuation(&mut self.core, self.use_case);
        let name = if self.core.failed() {
            String::new()
        } else {
            format!("restart {}", self.core.flows[self.flow.0].name)
        };
        let step = self.core.commit_step(StepDraft {
            name,
            use_case: self.use_case,
            flow: self.flow,
            actors: Vec::new(),
            message: None,
            reaction: Reaction::noop(),
            continuation,
            publish_to: None,
        });
        StepSystemPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            step,
        }
    }

    pub fn step(mut self, name: &str) -> StepPart {
        if !self.core.failed()
            && self.core.find_step(self.use_case, name).is_some()
        {
            self.core
                .fail(BuildError::ElementAlreadyInModel(name.to_string()));
        }
        StepPart {
            core: self.core,
            use_case: self.use_case,
            flow: self.flow,
            name: name.to_string(),
            actors: Vec::new(),
        }
    }

    pub fn flow(mut self, name: &str) -> FlowPart {
        let flow = self.core.new_flow(self.use_case, name);
        FlowPart {
            core: self.core,
            use_case: self.use_case,
            flow,
        }
    }

    pub fn use_case(mut self, name: &str) -> UseCasePart {
        let use_case = self.core.new_use_case(name);
        UseCasePart {
            core: self.core,
            use_case,
        }
    }

    pub fn build(self) -> Result<Model, BuildError> {
        self.core.build()
    }
}

fn restart_continuation(core: &mut Core, use_case: UseCaseId) -> Option<Continuation> {
    if core.failed() {
        return None;
    }
    let basic_flow = core.use_cases[use_case.0].basic_flow;
    match core.flows[basic_flow.0].steps.first() {
        Some(&first) => Some(Continuation::At(first)),
        None => {
            let name = core.use_cases[use_case.0].name.clone();
            core.fail(BuildError::NoSuchElementInModel(format!(
                "first step of basic flow of '{name}'"
            )));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EntersText;

    #[test]
    fn builds_basic_flow_with_back_links() {
        let model = Model::builder()
            .use_case("get greeted")
            .basic_flow()
            .step("S1")
            .on::<EntersText>()
            .system(|_| {})
            .step("S2")
            .system(|| {})
            .build()
            .unwrap();

        let s1 = model.find_step("get greeted", "S1").unwrap();
        let s2 = model.find_step("get greeted", "S2").unwrap();
        assert_eq!(model.step(s1).previous_in_flow(), None);
        assert_eq!(model.step(s2).previous_in_flow(), Some(s1));
        assert!(model.step(s1).message().is_some());
        assert!(model.step(s2).message().is_none());
    }

    #[test]
    fn duplicate_step_fails() {
        let result = Model::builder()
            .use_case("uc")
            .basic_flow()
            .step("S1")
            .system(|| {})
            .step("S1")
            .system(|| {})
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::ElementAlreadyInModel("S1".to_string()))
        );
    }

    #[test]
    fn duplicate_flow_fails() {
        let result = Model::builder()
            .use_case("uc")
            .flow("alternative")
            .step("S1")
            .system(|| {})
            .flow("alternative")
            .step("S2")
            .system(|| {})
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::ElementAlreadyInModel("alternative".to_string()))
        );
    }

    #[test]
    fn duplicate_use_case_fails() {
        let result = Model::builder()
            .use_case("uc")
            .basic_flow()
            .step("S1")
            .system(|| {})
            .use_case("uc")
            .basic_flow()
            .step("S2")
            .system(|| {})
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::ElementAlreadyInModel("uc".to_string()))
        );
    }

    #[test]
    fn after_unknown_step_fails() {
        let result = Model::builder()
            .use_case("uc")
            .flow("alternative")
            .after("missing")
            .step("S1")
            .system(|| {})
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::NoSuchElementInModel("missing".to_string()))
        );
    }

    #[test]
    fn continues_at_unknown_step_fails() {
        let result = Model::builder()
            .use_case("uc")
            .basic_flow()
            .step("S1")
            .continues_at("missing")
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::NoSuchElementInModel("missing".to_string()))
        );
    }

    #[test]
    fn instead_of_lowers_to_target_predecessor() {
        let model = Model::builder()
            .use_case("uc")
            .basic_flow()
            .step("S1")
            .on::<EntersText>()
            .system(|_| {})
            .step("S2")
            .on::<EntersText>()
            .system(|_| {})
            .flow("alternative")
            .instead_of("S2")
            .step("S3")
            .on::<EntersText>()
            .system(|_| {})
            .build()
            .unwrap();

        let s1 = model.find_step("uc", "S1").unwrap();
        let s3 = model.find_step("uc", "S3").unwrap();
        match model.step(s3).flow_position.as_ref() {
            Some(FlowPosition::InsteadOf { lowered, .. }) => assert_eq!(*lowered, Some(s1)),
            other => panic!("unexpected position: {other:?}"),
        }
    }

    #[test]
    fn flow_modifiers_gate_only_the_first_step() {
        let model = Model::builder()
            .use_case("uc")
            .flow("alternative")
            .anytime()
            .when(|| true)
            .step("S1")
            .on::<EntersText>()
            .system(|_| {})
            .step("S2")
            .on::<EntersText>()
            .system(|_| {})
            .build()
            .unwrap();

        let s1 = model.find_step("uc", "S1").unwrap();
        let s2 = model.find_step("uc", "S2").unwrap();
        assert!(model.step(s1).flow_position.is_some());
        assert!(model.step(s1).when.is_some());
        assert!(model.step(s2).flow_position.is_none());
        assert!(model.step(s2).when.is_none());
    }

    #[test]
    fn actors_are_created_on_demand() {
        let model = Model::builder()
            .actor("customer")
            .use_case("uc")
            .basic_flow()
            .step("S1")
            .by("customer")
            .by("clerk")
            .on::<EntersText>()
            .system(|_| {})
            .build()
            .unwrap();

        assert!(model.find_actor("customer").is_some());
        assert!(model.find_actor("clerk").is_some());
        let s1 = model.find_step("uc", "S1").unwrap();
        assert_eq!(model.step(s1).actors().len(), 2);
    }
}

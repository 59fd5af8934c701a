//! Model - the immutable container of declared behavior.
//!
//! A model owns its use cases, flows, steps and actors in arena vectors;
//! all cross references are stable indices, which keeps the model
//! trivially shareable between runners and session positions trivially
//! copyable.

use ahash::AHashMap;
use uuid::Uuid;

use crate::actor::{Actor, ActorId};
use crate::builder::ModelBuilder;
use crate::flow::{Flow, FlowId};
use crate::step::{Step, StepId};
use crate::use_case::{UseCase, UseCaseId};

pub struct Model {
    pub(crate) id: Uuid,
    pub(crate) use_cases: Vec<UseCase>,
    pub(crate) flows: Vec<Flow>,
    pub(crate) steps: Vec<Step>,
    pub(crate) actors: Vec<Actor>,
    pub(crate) use_case_names: AHashMap<String, UseCaseId>,
    pub(crate) actor_names: AHashMap<String, ActorId>,
    pub(crate) step_names: AHashMap<(UseCaseId, String), StepId>,
}

impl Model {
    /// Start building a new model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// Instance id, for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn step(&self, id: StepId) -> &Step {
        &self.steps[id.0]
    }

    pub fn flow(&self, id: FlowId) -> &Flow {
        &self.flows[id.0]
    }

    pub fn use_case(&self, id: UseCaseId) -> &UseCase {
        &self.use_cases[id.0]
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.0]
    }

    pub fn find_actor(&self, name: &str) -> Option<ActorId> {
        self.actor_names.get(name).copied()
    }

    pub fn find_use_case(&self, name: &str) -> Option<UseCaseId> {
        self.use_case_names.get(name).copied()
    }

    pub fn find_step(&self, use_case: &str, step: &str) -> Option<StepId> {
        let use_case = self.find_use_case(use_case)?;
        self.step_names
            .get(&(use_case, step.to_string()))
            .copied()
    }

    /// Step name qualified by its use case, for diagnostics where names
    /// may collide across use cases.
    pub fn qualified_step_name(&self, id: StepId) -> String {
        let step = self.step(id);
        let use_case = self.use_case(step.use_case());
        format!("{}/{}", use_case.name(), step.name())
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("use_cases", &self.use_cases.len())
            .field("flows", &self.flows.len())
            .field("steps", &self.steps.len())
            .field("actors", &self.actors.len())
            .finish()
    }
}

//! Scenario Core - The Declarative Use Case Model
//!
//! This crate defines the **structural** aspects of scenario:
//! - `Model`: the immutable container of use cases, flows and steps
//! - `ModelBuilder`: the fluent construction API
//! - `FlowPosition`: positional predicates gating flows
//! - `Schematic`: the serializable structural view of a model
//!
//! The model describes *what* reacts to which message; the runtime crate
//! decides *when*. This layer is pure Rust - no IO, no async.

pub mod actor;
pub mod builder;
pub mod condition;
pub mod error;
pub mod flow;
pub mod flow_position;
pub mod message;
pub mod model;
pub mod reaction;
pub mod schematic;
pub mod step;
pub mod use_case;

pub use actor::{Actor, ActorId};
pub use builder::ModelBuilder;
pub use condition::Condition;
pub use error::BuildError;
pub use flow::{Flow, FlowId};
pub use flow_position::{FlowPosition, Position};
pub use message::{AnyMessage, Fault, MessageKey};
pub use model::Model;
pub use reaction::{Reaction, ReactionOutcome};
pub use schematic::{Edge, Node, NodeKind, Schematic};
pub use step::{Continuation, Step, StepId};
pub use use_case::{UseCase, UseCaseId};

pub mod prelude {
    pub use crate::builder::ModelBuilder;
    pub use crate::condition::Condition;
    pub use crate::error::BuildError;
    pub use crate::message::{AnyMessage, Fault};
    pub use crate::model::Model;
    pub use crate::step::StepId;
}

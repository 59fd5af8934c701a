//! Schematic - a serializable structural view of a model.
//!
//! The schematic flattens the model into nodes and edges, with all
//! closures (reactions, guards) reduced to descriptive strings. It is
//! meant for documentation exports and dashboards, not for round trips
//! back into a model.

use serde::{Deserialize, Serialize};

use crate::flow_position::FlowPosition;
use crate::model::Model;
use crate::step::{Continuation, Step};

/// What kind of step a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Reacts to a declared message type.
    Message,
    /// Runs in the auto-dispatch pass, no message needed.
    System,
    /// A jump: continues at, continues after, or restart.
    Continuation,
}

/// One step of the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Use-case-qualified step name, unique within the model.
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub use_case: String,
    pub flow: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub actors: Vec<String>,
    /// Human-readable flow position, present on first steps of
    /// positioned flows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub guarded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// The exported structure: nodes are steps, edges are flow succession
/// and continuation jumps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Model {
    /// Export the structural view of this model.
    pub fn schematic(&self, name: &str) -> Schematic {
        let mut nodes = Vec::with_capacity(self.steps.len());
        let mut edges = Vec::new();

        for step in self.steps() {
            nodes.push(self.node_of(step));
            let id = self.qualified_step_name(step.id());
            if let Some(previous) = step.previous_in_flow() {
                edges.push(Edge {
                    from: self.qualified_step_name(previous),
                    to: id.clone(),
                    label: "next".to_string(),
                });
            }
            match step.continuation() {
                Some(Continuation::At(target)) => edges.push(Edge {
                    from: id,
                    to: self.qualified_step_name(target),
                    label: "continues at".to_string(),
                }),
                Some(Continuation::After(target)) => edges.push(Edge {
                    from: id,
                    to: self.qualified_step_name(target),
                    label: "continues after".to_string(),
                }),
                None => {}
            }
        }

        Schematic {
            name: name.to_string(),
            nodes,
            edges,
        }
    }

    fn node_of(&self, step: &Step) -> Node {
        let kind = if step.continuation().is_some() {
            NodeKind::Continuation
        } else if step.message().is_some() {
            NodeKind::Message
        } else {
            NodeKind::System
        };
        Node {
            id: self.qualified_step_name(step.id()),
            kind,
            label: step.name().to_string(),
            use_case: self.use_case(step.use_case()).name().to_string(),
            flow: self.flow(step.flow()).name().to_string(),
            message: step.message().map(|key| key.short_name().to_string()),
            actors: step
                .actors()
                .iter()
                .map(|&actor| self.actor(actor).name().to_string())
                .collect(),
            position: step
                .flow_position
                .as_ref()
                .map(|position| self.describe_position(position)),
            guarded: step.when.is_some(),
        }
    }

    fn describe_position(&self, position: &FlowPosition) -> String {
        match position {
            FlowPosition::Anytime => "anytime".to_string(),
            FlowPosition::AtFirst => "at first".to_string(),
            FlowPosition::After { step: Some(step) } => {
                format!("after {}", self.qualified_step_name(*step))
            }
            FlowPosition::After { step: None } => "at first".to_string(),
            FlowPosition::InsteadOf { step, .. } => {
                format!("instead of {}", self.qualified_step_name(*step))
            }
            FlowPosition::Condition(_) => "condition".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EntersName;

    fn sample_model() -> Model {
        Model::builder()
            .use_case("get greeted")
            .basic_flow()
            .step("S1")
            .by("user")
            .on::<EntersName>()
            .system(|_| {})
            .step("S2")
            .system(|| {})
            .flow("undo")
            .after("S2")
            .step("S3")
            .continues_at("S1")
            .build()
            .unwrap()
    }

    #[test]
    fn exports_nodes_for_every_step() {
        let schematic = sample_model().schematic("greeter");
        assert_eq!(schematic.name, "greeter");
        assert_eq!(schematic.nodes.len(), 3);

        let s1 = &schematic.nodes[0];
        assert_eq!(s1.id, "get greeted/S1");
        assert_eq!(s1.kind, NodeKind::Message);
        assert_eq!(s1.message.as_deref(), Some("EntersName"));
        assert_eq!(s1.actors, vec!["user".to_string()]);

        let s2 = &schematic.nodes[1];
        assert_eq!(s2.kind, NodeKind::System);
        assert!(s2.message.is_none());

        let s3 = &schematic.nodes[2];
        assert_eq!(s3.kind, NodeKind::Continuation);
        assert_eq!(s3.position.as_deref(), Some("after get greeted/S2"));
    }

    #[test]
    fn exports_succession_and_continuation_edges() {
        let schematic = sample_model().schematic("greeter");
        let labels: Vec<(&str, &str, &str)> = schematic
            .edges
            .iter()
            .map(|edge| (edge.from.as_str(), edge.to.as_str(), edge.label.as_str()))
            .collect();
        assert!(labels.contains(&("get greeted/S1", "get greeted/S2", "next")));
        assert!(labels.contains(&("get greeted/S3", "get greeted/S1", "continues at")));
    }

    #[test]
    fn serializes_to_json() {
        let schematic = sample_model().schematic("greeter");
        let json = serde_json::to_string(&schematic).unwrap();
        let back: Schematic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nodes.len(), schematic.nodes.len());
        assert_eq!(back.edges.len(), schematic.edges.len());
    }
}

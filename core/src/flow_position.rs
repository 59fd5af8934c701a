//! Flow positions - where in the model a flow is enabled.
//!
//! A position predicate is a boolean function of the runner's session
//! position. `After` covers the interesting cases: "after nothing"
//! (`step: None`) is the state before anything has executed, which is how
//! first steps of basic flows and `instead_of` alternatives at the very
//! first step are gated.

use crate::condition::Condition;
use crate::flow::FlowId;
use crate::step::StepId;

/// The runner's session position: the latest executed step and its flow.
///
/// This pair, together with the model graph, is the whole implicit state
/// machine; it is trivially copyable so collaborators can snapshot and
/// restore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub latest_step: Option<StepId>,
    pub latest_flow: Option<FlowId>,
}

impl Position {
    pub fn at(step: StepId, flow: FlowId) -> Self {
        Self {
            latest_step: Some(step),
            latest_flow: Some(flow),
        }
    }
}

/// Positional predicate of a flow, evaluated against the session position.
#[derive(Debug, Clone)]
pub enum FlowPosition {
    /// Enabled regardless of position.
    Anytime,
    /// Enabled only before any step has executed.
    AtFirst,
    /// Enabled directly after the given step; `None` means "after nothing",
    /// i.e. before any step has executed.
    After { step: Option<StepId> },
    /// Enabled at the point `step` would fire, offering an alternative.
    /// `lowered` is `step`'s flow predecessor, captured at build time.
    InsteadOf {
        step: StepId,
        lowered: Option<StepId>,
    },
    /// Enabled whenever the supplied application condition holds.
    Condition(Condition),
}

impl FlowPosition {
    pub fn evaluate(&self, position: &Position) -> bool {
        match self {
            FlowPosition::Anytime => true,
            FlowPosition::AtFirst => position.latest_step.is_none(),
            FlowPosition::After { step } => position.latest_step == *step,
            FlowPosition::InsteadOf { lowered, .. } => position.latest_step == *lowered,
            FlowPosition::Condition(condition) => condition.check(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_first_only_before_any_step() {
        let position = Position::default();
        assert!(FlowPosition::AtFirst.evaluate(&position));

        let advanced = Position::at(StepId(0), FlowId(0));
        assert!(!FlowPosition::AtFirst.evaluate(&advanced));
    }

    #[test]
    fn after_matches_exact_step() {
        let after = FlowPosition::After {
            step: Some(StepId(1)),
        };
        assert!(!after.evaluate(&Position::default()));
        assert!(after.evaluate(&Position::at(StepId(1), FlowId(0))));
        assert!(!after.evaluate(&Position::at(StepId(2), FlowId(0))));
    }

    #[test]
    fn instead_of_fires_where_target_would() {
        // Target is the first step of its flow, so the alternative is
        // enabled exactly while nothing has executed.
        let instead = FlowPosition::InsteadOf {
            step: StepId(0),
            lowered: None,
        };
        assert!(instead.evaluate(&Position::default()));
        assert!(!instead.evaluate(&Position::at(StepId(0), FlowId(0))));
    }
}

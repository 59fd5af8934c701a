use crate::condition::Condition;
use crate::flow_position::FlowPosition;
use crate::step::StepId;
use crate::use_case::UseCaseId;

/// Stable index of a flow within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(pub(crate) usize);

/// An ordered sequence of steps inside a use case.
///
/// The flow-level position modifier and when-guard are carried by the
/// flow's first step; they are kept here as well for the structural view.
#[derive(Debug, Clone)]
pub struct Flow {
    pub(crate) id: FlowId,
    pub(crate) name: String,
    pub(crate) use_case: UseCaseId,
    pub(crate) steps: Vec<StepId>,
    pub(crate) position: Option<FlowPosition>,
    pub(crate) when: Option<Condition>,
}

impl Flow {
    pub fn id(&self) -> FlowId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn use_case(&self) -> UseCaseId {
        self.use_case
    }

    pub fn steps(&self) -> &[StepId] {
        &self.steps
    }

    pub fn position(&self) -> Option<&FlowPosition> {
        self.position.as_ref()
    }

    pub fn is_guarded(&self) -> bool {
        self.when.is_some()
    }
}

use crate::flow::FlowId;

/// Stable index of a use case within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UseCaseId(pub(crate) usize);

/// A named unit of behavior: one basic flow plus any number of named
/// alternative flows.
#[derive(Debug, Clone)]
pub struct UseCase {
    pub(crate) id: UseCaseId,
    pub(crate) name: String,
    pub(crate) basic_flow: FlowId,
    pub(crate) flows: Vec<FlowId>,
}

impl UseCase {
    pub fn id(&self) -> UseCaseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn basic_flow(&self) -> FlowId {
        self.basic_flow
    }

    /// All flows, the basic flow first.
    pub fn flows(&self) -> &[FlowId] {
        &self.flows
    }
}

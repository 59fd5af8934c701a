use thiserror::Error;

/// Errors detected while assembling a model.
///
/// The builder defers errors: the first failure is remembered, later calls
/// become no-ops, and `build()` surfaces it. Cross references must resolve
/// at build time, never at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("element already in model: {0}")]
    ElementAlreadyInModel(String),

    #[error("no such element in model: {0}")]
    NoSuchElementInModel(String),

    #[error("flow '{0}' already has steps; position modifiers must come first")]
    FlowAlreadyStarted(String),
}

use scenario_core::Fault;
use thiserror::Error;

/// Errors surfaced while dispatching messages to a model.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// More than one step was eligible for the same message. The model is
    /// ambiguous at the current position; the message was not consumed.
    #[error("more than one step reacts to the message: {}", steps.join(", "))]
    AmbiguousReaction { steps: Vec<String> },

    /// A reaction tried to dispatch a message through the runner that is
    /// currently executing it.
    #[error("runner is already reacting; dispatch the message after the reaction returns")]
    ReentrantReaction,

    /// A reaction raised a fault and no step at the current position is
    /// declared to handle its type.
    #[error("unhandled failure: {0}")]
    UnhandledFailure(Fault),

    /// The auto-dispatch pass exceeded its step limit, which points at a
    /// repeating automatic step whose condition never turns false.
    #[error("automatic step '{step}' kept reacting past the configured limit")]
    InfiniteRepetition { step: String },

    /// A publishing step named an actor no runner is connected for.
    #[error("no runner connected for actor '{actor}'")]
    UnknownRecipient { actor: String },
}

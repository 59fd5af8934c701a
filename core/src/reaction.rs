//! Reaction - the executable part of a step.
//!
//! Reactions are opaque synchronous closures supplied by the embedding
//! application. They may inspect the matched message, may raise a `Fault`,
//! and may produce a follow-up message consumed by publish-to forwarding.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::message::{AnyMessage, Fault};

/// What a reaction produced: optionally a follow-up message, or a fault
/// to be dispatched as a failure message.
pub type ReactionOutcome = Result<Option<AnyMessage>, Fault>;

type SystemFn = Arc<dyn Fn() -> ReactionOutcome + Send + Sync>;
type MessageFn = Arc<dyn Fn(&dyn Any) -> ReactionOutcome + Send + Sync>;

#[derive(Clone)]
pub enum Reaction {
    /// Runs without input: automatic steps and continuations.
    System(SystemFn),
    /// Receives the matched message.
    OnMessage(MessageFn),
}

impl Reaction {
    pub fn system(reaction: impl Fn() -> ReactionOutcome + Send + Sync + 'static) -> Self {
        Reaction::System(Arc::new(reaction))
    }

    pub fn on_message(reaction: impl Fn(&dyn Any) -> ReactionOutcome + Send + Sync + 'static) -> Self {
        Reaction::OnMessage(Arc::new(reaction))
    }

    /// A reaction that does nothing; used by pure control-transfer steps.
    pub fn noop() -> Self {
        Reaction::system(|| Ok(None))
    }

    pub fn run(&self, message: Option<&dyn Any>) -> ReactionOutcome {
        match self {
            Reaction::System(reaction) => reaction(),
            Reaction::OnMessage(reaction) => match message {
                Some(message) => reaction(message),
                None => Ok(None),
            },
        }
    }
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::System(_) => f.write_str("Reaction::System"),
            Reaction::OnMessage(_) => f.write_str("Reaction::OnMessage"),
        }
    }
}

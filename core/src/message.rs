//! Message typing - runtime-type keyed dispatch.
//!
//! Steps match incoming messages by the runtime type of the boxed value.
//! A `MessageKey` captures that type at declaration time; a `Fault` wraps
//! a failure raised by a reaction so it can itself be dispatched as a
//! message to a declared handling step.

use std::any::{Any, TypeId};
use std::fmt;

/// A message delivered to a runner. Matching is by the boxed value's
/// runtime type, not by any declared trait.
pub type AnyMessage = Box<dyn Any + Send>;

/// The declared message type of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl MessageKey {
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full path of the declared type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Final path segment, for labels.
    pub fn short_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }
}

/// A failure raised by a reaction function.
///
/// The payload keeps its runtime type so the runner can match it against
/// steps declared to handle that failure type; the rendered message is
/// captured eagerly for diagnostics.
pub struct Fault {
    type_id: TypeId,
    type_name: &'static str,
    summary: String,
    payload: Box<dyn Any + Send + Sync>,
}

impl Fault {
    pub fn new<E: Any + Send + Sync + fmt::Display>(failure: E) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
            summary: failure.to_string(),
            payload: Box::new(failure),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The failure as a message, for dispatch to a handling step.
    pub fn payload(&self) -> &dyn Any {
        self.payload.as_ref()
    }

    /// Recover the boxed failure value.
    pub fn into_payload(self) -> AnyMessage {
        self.payload
    }

    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.payload.downcast_ref()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.summary)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("type", &self.type_name)
            .field("summary", &self.summary)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct OutOfCredit;

    impl fmt::Display for OutOfCredit {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("out of credit")
        }
    }

    #[test]
    fn key_matches_runtime_type() {
        let key = MessageKey::of::<String>();
        let message: AnyMessage = Box::new("hi".to_string());
        assert_eq!(key.type_id(), message.as_ref().type_id());
        assert_eq!(key.short_name(), "String");
    }

    #[test]
    fn fault_keeps_type_and_summary() {
        let fault = Fault::new(OutOfCredit);
        assert_eq!(fault.type_id(), TypeId::of::<OutOfCredit>());
        assert!(fault.to_string().ends_with("out of credit"));
        assert!(fault.downcast_ref::<OutOfCredit>().is_some());
    }
}

use std::fmt;
use std::sync::Arc;

/// A zero-argument guard supplied by the embedding application.
///
/// Conditions gate flows (`when`), position flows arbitrarily
/// (`condition`) and control step repetition (`repeat_while`). They are
/// plain closures and may capture shared application state.
#[derive(Clone)]
pub struct Condition(Arc<dyn Fn() -> bool + Send + Sync>);

impl Condition {
    pub fn new(check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    /// Evaluate the guard.
    pub fn check(&self) -> bool {
        (self.0)()
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition")
    }
}

//! Runner - reactive dispatch over a model.
//!
//! The runner keeps almost no state of its own: a shared model, the
//! session position, and the configured limits. Dispatching a message
//! resolves the single enabled step, runs its reaction, advances the
//! position, applies any declared jump and then drains automatic steps
//! until an external message is needed again.

use std::any::Any;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{Mutex, MutexGuard};

use scenario_core::{
    ActorId, AnyMessage, Continuation, Fault, Model, Position, Step, StepId,
};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::resolve::{resolve, Trigger};

#[derive(Debug, Default)]
pub struct Runner {
    model: Option<Arc<Model>>,
    actor: Option<String>,
    position: Position,
    reacting: bool,
    config: RunnerConfig,
    peers: AHashMap<String, RunnerHandle>,
    recording: Option<Vec<String>>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Dispatch as the named actor. Steps restricted with `by` only react
    /// when the runner's actor is among the allowed ones.
    pub fn as_actor(&mut self, name: &str) -> &mut Self {
        self.actor = Some(name.to_string());
        self
    }

    /// Start running the model: reset the position to the beginning and
    /// execute any automatic steps enabled there.
    pub fn run(&mut self, model: Arc<Model>) -> Result<&mut Self, RunnerError> {
        tracing::debug!(model = %model.id(), "runner started");
        self.model = Some(Arc::clone(&model));
        self.position = Position::default();
        self.reacting = true;
        let drained = self.drain_system_steps(&model);
        self.reacting = false;
        drained?;
        Ok(self)
    }

    /// React to one message. Returns the step that completed the dispatch
    /// (the fault handler, if the resolved step's reaction failed and a
    /// declared step handled it), or `None` when no step was enabled for
    /// the message (it is dropped, which is how alternative inputs are
    /// ignored outside their flows).
    pub fn react_to(&mut self, message: AnyMessage) -> Result<Option<StepId>, RunnerError> {
        if self.reacting {
            return Err(RunnerError::ReentrantReaction);
        }
        let Some(model) = self.model.clone() else {
            return Ok(None);
        };
        let type_id = message.as_ref().type_id();
        let actor = self.actor_id(&model);
        let Some(step) = resolve(&model, actor, &self.position, Trigger::Message(type_id))?
        else {
            tracing::debug!(model = %model.id(), "message not handled at current position");
            return Ok(None);
        };

        self.reacting = true;
        let outcome = self
            .execute(&model, step, Some(message.as_ref()))
            .and_then(|executed| self.drain_system_steps(&model).map(|()| executed));
        self.reacting = false;
        Ok(Some(outcome?))
    }

    /// React to a sequence of messages, stopping at the first error.
    pub fn react_to_all(
        &mut self,
        messages: impl IntoIterator<Item = AnyMessage>,
    ) -> Result<&mut Self, RunnerError> {
        for message in messages {
            self.react_to(message)?;
        }
        Ok(self)
    }

    /// Whether a message of type `T` would be consumed at the current
    /// position. An ambiguity counts as reactable; dispatching it reports
    /// the error.
    pub fn can_react_to<T: Any>(&self) -> bool {
        let Some(model) = &self.model else {
            return false;
        };
        let actor = self.actor_id(model);
        matches!(
            resolve(
                model,
                actor,
                &self.position,
                Trigger::Message(std::any::TypeId::of::<T>())
            ),
            Ok(Some(_)) | Err(RunnerError::AmbiguousReaction { .. })
        )
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn latest_step(&self) -> Option<StepId> {
        self.position.latest_step
    }

    /// Move the session to directly after the given step, as if it had
    /// just executed. Useful for resuming a persisted session.
    pub fn set_latest_step(&mut self, step: StepId) {
        if let Some(model) = &self.model {
            self.position = Position::at(step, model.step(step).flow());
        }
    }

    /// Connect the runner that receives messages published to `actor`.
    pub fn connect(&mut self, actor: &str, handle: RunnerHandle) -> &mut Self {
        self.peers.insert(actor.to_string(), handle);
        self
    }

    /// Record qualified names of executed steps until stopped.
    pub fn start_recording(&mut self) -> &mut Self {
        self.recording = Some(Vec::new());
        self
    }

    pub fn stop_recording(&mut self) -> Vec<String> {
        self.recording.take().unwrap_or_default()
    }

    pub fn recorded_step_names(&self) -> &[String] {
        self.recording.as_deref().unwrap_or_default()
    }

    fn actor_id(&self, model: &Model) -> Option<ActorId> {
        self.actor.as_deref().and_then(|name| model.find_actor(name))
    }

    /// Run one step's reaction; returns the step that actually completed,
    /// which is the fault handler when the reaction raised one.
    fn execute(
        &mut self,
        model: &Arc<Model>,
        step_id: StepId,
        message: Option<&dyn Any>,
    ) -> Result<StepId, RunnerError> {
        let step = model.step(step_id);
        let span = tracing::info_span!(
            "react",
            scenario.model = %model.id(),
            scenario.step = %step.name(),
        );
        let _guard = span.enter();

        match step.reaction().run(message) {
            Ok(output) => {
                tracing::debug!("step executed");
                if let Some(recording) = &mut self.recording {
                    recording.push(model.qualified_step_name(step_id));
                }
                self.position = Position::at(step_id, step.flow());
                self.apply_continuation(model, step);
                if let (Some(output), Some(recipient)) = (output, step.publish_to()) {
                    self.forward(model, recipient, output)?;
                }
                Ok(step_id)
            }
            Err(fault) => self.dispatch_failure(model, fault),
        }
    }

    /// A jump rewrites the position so the resolver's ordinary rules make
    /// the intended step the next to fire.
    fn apply_continuation(&mut self, model: &Model, step: &Step) {
        match step.continuation() {
            Some(Continuation::At(target)) => {
                self.position = match model.step(target).previous_in_flow() {
                    Some(previous) => Position::at(previous, model.step(previous).flow()),
                    None => Position::default(),
                };
            }
            Some(Continuation::After(target)) => {
                self.position = Position::at(target, model.step(target).flow());
            }
            None => {}
        }
    }

    /// A fault becomes a message: if a step at the pre-failure position is
    /// declared on the fault's type, it reacts; otherwise the failure
    /// surfaces to the caller.
    fn dispatch_failure(
        &mut self,
        model: &Arc<Model>,
        fault: Fault,
    ) -> Result<StepId, RunnerError> {
        let actor = self.actor_id(model);
        let handler = resolve(
            model,
            actor,
            &self.position,
            Trigger::Message(fault.type_id()),
        )?;
        match handler {
            Some(step) => {
                tracing::debug!(failure = %fault, step = %model.qualified_step_name(step), "failure handled");
                self.execute(model, step, Some(fault.payload()))
            }
            None => {
                tracing::error!(failure = %fault, "unhandled failure");
                Err(RunnerError::UnhandledFailure(fault))
            }
        }
    }

    fn drain_system_steps(&mut self, model: &Arc<Model>) -> Result<(), RunnerError> {
        let mut executed = 0usize;
        loop {
            let actor = self.actor_id(model);
            let Some(step) = resolve(model, actor, &self.position, Trigger::Auto)? else {
                return Ok(());
            };
            if executed == self.config.max_system_steps {
                return Err(RunnerError::InfiniteRepetition {
                    step: model.qualified_step_name(step),
                });
            }
            executed += 1;
            self.execute(model, step, None)?;
        }
    }

    fn forward(
        &mut self,
        model: &Model,
        recipient: ActorId,
        output: AnyMessage,
    ) -> Result<(), RunnerError> {
        let name = model.actor(recipient).name();
        let Some(peer) = self.peers.get(name).cloned() else {
            return Err(RunnerError::UnknownRecipient {
                actor: name.to_string(),
            });
        };
        tracing::debug!(recipient = name, "publishing reaction output");
        peer.react_to(output)?;
        Ok(())
    }
}

/// A shareable, lockable runner, for wiring runners to each other and for
/// dispatching from multiple owners.
///
/// `react_to` refuses to wait on the lock: if the runner is busy reacting,
/// the dispatch is reentrant and reported as such instead of deadlocking.
#[derive(Clone, Default)]
pub struct RunnerHandle(Arc<Mutex<Runner>>);

impl RunnerHandle {
    pub fn new(runner: Runner) -> Self {
        Self(Arc::new(Mutex::new(runner)))
    }

    pub fn react_to(&self, message: AnyMessage) -> Result<Option<StepId>, RunnerError> {
        match self.0.try_lock() {
            Some(mut runner) => runner.react_to(message),
            None => Err(RunnerError::ReentrantReaction),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Runner> {
        self.0.lock()
    }
}

impl std::fmt::Debug for RunnerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RunnerHandle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SaysHello;

    #[test]
    fn runner_without_model_ignores_messages() {
        let mut runner = Runner::new();
        let reacted = runner.react_to(Box::new(SaysHello)).unwrap();
        assert_eq!(reacted, None);
        assert!(!runner.can_react_to::<SaysHello>());
    }

    #[test]
    fn handle_reports_reentrant_dispatch() {
        let handle = RunnerHandle::new(Runner::new());
        let _busy = handle.lock();
        let result = handle.react_to(Box::new(SaysHello));
        assert!(matches!(result, Err(RunnerError::ReentrantReaction)));
    }
}

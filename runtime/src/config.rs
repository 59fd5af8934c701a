/// Tunables of a [`Runner`](crate::Runner).
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Upper bound on automatic steps executed per dispatched message.
    /// Exceeding it is reported as an infinite repetition instead of
    /// spinning forever.
    pub max_system_steps: usize,
}

impl RunnerConfig {
    pub const DEFAULT_MAX_SYSTEM_STEPS: usize = 256;
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_system_steps: Self::DEFAULT_MAX_SYSTEM_STEPS,
        }
    }
}

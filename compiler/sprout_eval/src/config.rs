//! Evaluator configuration.

/// Per-evaluator settings, fixed for the evaluator's lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Emit an enter/exit event for every rule application on the
    /// `sprout_eval::trace` target.
    pub trace: bool,
    /// Maximum rule applications per parse invocation; `None` is unbounded.
    pub step_limit: Option<u64>,
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

//! Scheduling context for dispatching rule evaluation.

/// Runtime scheduling state passed to dispatching rules.
///
/// Static rules ignore it. Preemptive policies read the simulation clock
/// to compute time-dependent scores such as slack.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulingContext {
    /// Current simulation time.
    pub current_time: f64,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: f64) -> Self {
        Self { current_time }
    }

    /// Returns a context advanced by `delta` time units.
    pub fn advanced_by(self, delta: f64) -> Self {
        Self::at_time(self.current_time + delta)
    }
}

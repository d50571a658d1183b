//! Configuration for dispatching computations.

use serde::Deserialize;

/// How the preemptive simulator handles an idle machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleAdvance {
    /// Jump straight to the earliest pending release time.
    #[default]
    JumpToNextRelease,
    /// Advance one time unit per idle iteration.
    ///
    /// Produces the same schedule as `JumpToNextRelease` when release
    /// times are integers; fractional release times are rounded up to the
    /// next whole step.
    UnitStep,
}

/// Settings shared by all rules of a request.
///
/// Immutable once a [`crate::RuleDispatcher`] is built from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Idle-time handling in the preemptive simulator.
    pub idle_advance: IdleAdvance,
    /// Merge back-to-back unit segments of the same job in timelines.
    pub merge_segments: bool,
    /// Decimal places in formatted comparison output.
    pub precision: usize,
    /// Maximum simulation steps (executed units plus idle advances) per
    /// preemptive rule. `None` = unbounded.
    pub step_limit: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            idle_advance: IdleAdvance::JumpToNextRelease,
            merge_segments: true,
            precision: 2,
            step_limit: None,
        }
    }
}

impl DispatchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets idle-time handling.
    pub fn with_idle_advance(mut self, idle_advance: IdleAdvance) -> Self {
        self.idle_advance = idle_advance;
        self
    }

    /// Enables or disables timeline segment merging.
    pub fn with_merge_segments(mut self, merge: bool) -> Self {
        self.merge_segments = merge;
        self
    }

    /// Sets the number of decimals in formatted output.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Bounds the number of simulation steps per preemptive rule.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

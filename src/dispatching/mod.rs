//! Dispatching rules and rule engine for single-machine scheduling.
//!
//! Provides the seven supported rules as a closed [`Rule`] enum, a
//! priority-scoring [`DispatchingRule`] implementation per rule, and a
//! [`RuleEngine`] that either sorts jobs (static rules) or picks the
//! next job to run (preemptive rules).
//!
//! # Usage
//!
//! ```
//! use u_dispatch::dispatching::{Rule, RuleClass, RuleEngine, SchedulingContext};
//! use u_dispatch::models::JobRecord;
//!
//! let rule: Rule = "SPT".parse().unwrap();
//! assert_eq!(rule.class(), RuleClass::Static);
//!
//! let jobs = vec![
//!     JobRecord::new(0, "A", 4.0, 10.0),
//!     JobRecord::new(1, "B", 2.0, 5.0),
//! ];
//! let order = RuleEngine::for_rule(rule).sort_indices(&jobs, &SchedulingContext::default());
//! assert_eq!(order, vec![1, 0]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;
mod table;

pub use context::SchedulingContext;
pub use engine::RuleEngine;
pub use table::{Rule, RuleClass};

use crate::models::JobRecord;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (scheduled first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates job priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for jobs that should run first.
///
/// # Reference
/// Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job.
    ///
    /// `remaining` is the job's unfinished work; static rules are
    /// evaluated once with `remaining == job.processing_time`.
    fn evaluate(&self, job: &JobRecord, remaining: f64, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

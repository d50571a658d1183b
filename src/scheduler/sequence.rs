//! Static (sort-then-sequence) scheduler.
//!
//! # Algorithm
//!
//! 1. Sort jobs by the rule's key (stable, ties keep input order).
//! 2. Run the sorted jobs back-to-back on one machine from t = 0.
//!
//! Release times do not affect sequencing; they only enter the flow
//! time of each entry, which may therefore be negative (reported N/A).
//!
//! # Complexity
//! O(n log n) for n jobs.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 3.1: The Total Weighted Completion Time

use tracing::debug;

use crate::dispatching::{Rule, RuleClass, RuleEngine, SchedulingContext};
use crate::error::{DispatchError, Result};
use crate::models::{JobRecord, ScheduleEntry, ScheduleResult};

/// Sequences jobs by a static dispatching rule.
///
/// # Example
///
/// ```
/// use u_dispatch::dispatching::Rule;
/// use u_dispatch::models::JobRecord;
/// use u_dispatch::scheduler::StaticScheduler;
///
/// let jobs = vec![
///     JobRecord::new(0, "A", 4.0, 10.0),
///     JobRecord::new(1, "B", 2.0, 5.0),
///     JobRecord::new(2, "C", 6.0, 15.0),
/// ];
/// let result = StaticScheduler::new().schedule(&jobs, Rule::Spt).unwrap();
/// assert_eq!(result.sequence(), vec!["B", "A", "C"]);
/// assert_eq!(result.makespan(), 12.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticScheduler;

impl StaticScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Schedules `jobs` under a static rule (SPT, LPT, WSPT, EDD).
    ///
    /// # Errors
    /// [`DispatchError::Internal`] if `rule` is preemptive.
    pub fn schedule(&self, jobs: &[JobRecord], rule: Rule) -> Result<ScheduleResult> {
        if rule.class() != RuleClass::Static {
            return Err(DispatchError::Internal(format!(
                "{rule} is not a static rule"
            )));
        }

        let ctx = SchedulingContext::default();
        let order = RuleEngine::for_rule(rule).sort_indices(jobs, &ctx);

        let mut current_time = ctx.current_time;
        let mut entries = Vec::with_capacity(jobs.len());
        for position in order {
            let job = &jobs[position];
            let start = current_time;
            let completion = start + job.processing_time;

            entries.push(ScheduleEntry::new(
                job.index,
                job.id.clone(),
                job.release_time,
                job.processing_time,
                job.due_date,
                start,
                completion,
            ));
            current_time = completion;
        }

        debug!(
            rule = %rule,
            jobs = entries.len(),
            late = entries.iter().filter(|e| e.is_late()).count(),
            makespan = current_time,
            "sequenced static rule"
        );
        Ok(ScheduleResult::new(rule, entries, Vec::new()))
    }
}

//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Static (sort keys)**: SPT, LPT, WSPT, EDD
//! - **Preemptive (selection policies)**: SRPT, LRPT, LST
//!
//! # Score Convention
//! All rules return lower scores for higher priority jobs. Static rules
//! score a job once, with `remaining` equal to its processing time;
//! preemptive policies are re-evaluated at every simulation step.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::JobRecord;

// ======================== Static rules ========================

/// Shortest Processing Time.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(
        &self,
        job: &JobRecord,
        _remaining: f64,
        _context: &SchedulingContext,
    ) -> RuleScore {
        job.processing_time
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(
        &self,
        job: &JobRecord,
        _remaining: f64,
        _context: &SchedulingContext,
    ) -> RuleScore {
        -job.processing_time
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Weighted Shortest Processing Time.
///
/// Orders by `processing_time / weight` ascending.
///
/// # Reference
/// Smith (1956), optimal for minimizing total weighted completion time.
#[derive(Debug, Clone, Copy)]
pub struct Wspt;

impl DispatchingRule for Wspt {
    fn name(&self) -> &'static str {
        "WSPT"
    }

    fn evaluate(
        &self,
        job: &JobRecord,
        _remaining: f64,
        _context: &SchedulingContext,
    ) -> RuleScore {
        job.processing_time / job.weight
    }

    fn description(&self) -> &'static str {
        "Weighted Shortest Processing Time"
    }
}

/// Earliest Due Date.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(
        &self,
        job: &JobRecord,
        _remaining: f64,
        _context: &SchedulingContext,
    ) -> RuleScore {
        job.due_date
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

// ======================== Preemptive rules ========================

/// Shortest Remaining Processing Time.
///
/// # Reference
/// Schrage (1968), optimal for minimizing mean flow time with preemption.
#[derive(Debug, Clone, Copy)]
pub struct Srpt;

impl DispatchingRule for Srpt {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn evaluate(
        &self,
        _job: &JobRecord,
        remaining: f64,
        _context: &SchedulingContext,
    ) -> RuleScore {
        remaining
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Processing Time"
    }
}

/// Longest Remaining Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Lrpt;

impl DispatchingRule for Lrpt {
    fn name(&self) -> &'static str {
        "LRPT"
    }

    fn evaluate(
        &self,
        _job: &JobRecord,
        remaining: f64,
        _context: &SchedulingContext,
    ) -> RuleScore {
        -remaining
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Processing Time"
    }
}

/// Least Slack Time.
///
/// Slack = due_date - current_time - remaining.
#[derive(Debug, Clone, Copy)]
pub struct Lst;

impl DispatchingRule for Lst {
    fn name(&self) -> &'static str {
        "LST"
    }

    fn evaluate(&self, job: &JobRecord, remaining: f64, context: &SchedulingContext) -> RuleScore {
        job.due_date - context.current_time - remaining
    }

    fn description(&self) -> &'static str {
        "Least Slack Time"
    }
}

//! Rule engine for job prioritization.
//!
//! Applies a single dispatching rule two ways: as a sort key over the
//! whole job set, or as a selection policy over the currently eligible
//! jobs. Both break ties by input order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;

use super::{DispatchingRule, Rule, RuleScore, SchedulingContext};
use crate::models::JobRecord;

/// Applies a dispatching rule to a set of jobs.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::{rules, RuleEngine, SchedulingContext};
/// use u_dispatch::models::JobRecord;
///
/// let jobs = vec![
///     JobRecord::new(0, "A", 4.0, 10.0),
///     JobRecord::new(1, "B", 3.0, 6.0),
/// ];
/// let engine = RuleEngine::new(&rules::Srpt);
/// let ctx = SchedulingContext::at_time(2.0);
///
/// // A has 2 units left, B has 3.
/// let best = engine.select_best([(0, &jobs[0], 2.0), (1, &jobs[1], 3.0)], &ctx);
/// assert_eq!(best, Some(0));
/// ```
#[derive(Clone, Copy)]
pub struct RuleEngine {
    rule: &'static dyn DispatchingRule,
}

impl RuleEngine {
    /// Creates an engine for the given rule implementation.
    pub fn new(rule: &'static dyn DispatchingRule) -> Self {
        Self { rule }
    }

    /// Creates an engine for a rule from the lookup table.
    pub fn for_rule(rule: Rule) -> Self {
        Self::new(rule.evaluator())
    }

    /// Name of the wrapped rule.
    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    /// Scores a single job.
    pub fn evaluate(
        &self,
        job: &JobRecord,
        remaining: f64,
        context: &SchedulingContext,
    ) -> RuleScore {
        self.rule.evaluate(job, remaining, context)
    }

    /// Sorts jobs by priority (highest priority first).
    ///
    /// Returns positions into `jobs`. The sort is stable: jobs with equal
    /// scores keep their input order.
    pub fn sort_indices(&self, jobs: &[JobRecord], context: &SchedulingContext) -> Vec<usize> {
        let scores: Vec<RuleScore> = jobs
            .iter()
            .map(|j| self.evaluate(j, j.processing_time, context))
            .collect();

        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        indices.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));
        indices
    }

    /// Picks the highest-priority candidate.
    ///
    /// Candidates are `(slot, job, remaining)` triples in input order,
    /// where `slot` is any caller-side position. A later candidate
    /// replaces the current best only with a strictly lower score, so the
    /// earliest candidate wins ties. Returns the winner's slot.
    pub fn select_best<'a, I>(&self, candidates: I, context: &SchedulingContext) -> Option<usize>
    where
        I: IntoIterator<Item = (usize, &'a JobRecord, f64)>,
    {
        let mut best: Option<(usize, RuleScore)> = None;
        for (slot, job, remaining) in candidates {
            let score = self.evaluate(job, remaining, context);
            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((slot, score)),
            }
        }
        best.map(|(slot, _)| slot)
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rule", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    fn make_job(index: usize, id: &str, processing_time: f64, due_date: f64) -> JobRecord {
        JobRecord::new(index, id, processing_time, due_date)
    }

    fn sample_jobs() -> Vec<JobRecord> {
        vec![
            make_job(0, "A", 4.0, 10.0),
            make_job(1, "B", 2.0, 5.0),
            make_job(2, "C", 6.0, 15.0),
        ]
    }

    #[test]
    fn test_spt_ordering() {
        let jobs = sample_jobs();
        let engine = RuleEngine::for_rule(Rule::Spt);
        let indices = engine.sort_indices(&jobs, &SchedulingContext::default());
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn test_lpt_ordering() {
        let jobs = sample_jobs();
        let engine = RuleEngine::for_rule(Rule::Lpt);
        let indices = engine.sort_indices(&jobs, &SchedulingContext::default());
        assert_eq!(indices, vec![2, 0, 1]);
    }

    #[test]
    fn test_stable_ties() {
        let jobs = vec![
            make_job(0, "X", 3.0, 9.0),
            make_job(1, "Y", 1.0, 9.0),
            make_job(2, "Z", 3.0, 9.0),
            make_job(3, "W", 1.0, 9.0),
        ];
        let ctx = SchedulingContext::default();

        let spt = RuleEngine::for_rule(Rule::Spt).sort_indices(&jobs, &ctx);
        assert_eq!(spt, vec![1, 3, 0, 2]);

        // Ties keep input order under LPT too, not reversed order.
        let lpt = RuleEngine::for_rule(Rule::Lpt).sort_indices(&jobs, &ctx);
        assert_eq!(lpt, vec![0, 2, 1, 3]);

        // All due dates equal: EDD is the identity.
        let edd = RuleEngine::for_rule(Rule::Edd).sort_indices(&jobs, &ctx);
        assert_eq!(edd, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_select_best_lowest_index_on_ties() {
        let jobs = sample_jobs();
        let ctx = SchedulingContext::default();
        let engine = RuleEngine::new(&rules::Srpt);

        let candidates = [(0, &jobs[0], 3.0), (1, &jobs[1], 3.0), (2, &jobs[2], 5.0)];
        let best = engine.select_best(candidates, &ctx);
        assert_eq!(best, Some(0));
    }

    #[test]
    fn test_select_best_lrpt_keeps_first_maximum() {
        let jobs = sample_jobs();
        let ctx = SchedulingContext::default();
        let engine = RuleEngine::new(&rules::Lrpt);

        let candidates = [(0, &jobs[0], 2.0), (1, &jobs[1], 5.0), (2, &jobs[2], 5.0)];
        let best = engine.select_best(candidates, &ctx);
        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_select_best_lst() {
        let jobs = sample_jobs();
        let ctx = SchedulingContext::at_time(1.0);
        let engine = RuleEngine::for_rule(Rule::Lst);

        // Slack: A = 10-1-4 = 5, B = 5-1-2 = 2, C = 15-1-6 = 8
        let candidates = jobs.iter().enumerate().map(|(i, j)| (i, j, j.processing_time));
        assert_eq!(engine.select_best(candidates, &ctx), Some(1));
    }

    #[test]
    fn test_empty_jobs() {
        let ctx = SchedulingContext::default();
        let engine = RuleEngine::for_rule(Rule::Spt);
        assert!(engine.sort_indices(&[], &ctx).is_empty());
        let none = std::iter::empty::<(usize, &JobRecord, f64)>();
        assert!(engine.select_best(none, &ctx).is_none());
    }

    #[test]
    fn test_debug_shows_rule() {
        let engine = RuleEngine::for_rule(Rule::Wspt);
        assert_eq!(format!("{engine:?}"), "RuleEngine { rule: \"WSPT\" }");
        assert_eq!(engine.name(), "WSPT");
    }
}

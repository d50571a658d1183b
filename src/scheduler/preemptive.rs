//! Preemptive single-machine simulator.
//!
//! # Algorithm
//!
//! Discrete-time stepping in unit increments:
//!
//! 1. Collect eligible jobs: released (`release_time <= now`) with work left.
//! 2. If none: jump to the earliest pending release (or step one unit,
//!    see [`IdleAdvance`]); stop once no job has work left.
//! 3. Otherwise run the job the rule's selection policy picks for one
//!    unit, recording its first start and its completion.
//!
//! Ties go to the job earliest in input order. The selected job may
//! change at every step, which is where preemption happens.
//!
//! # Complexity
//! O(n × P) for n jobs and total processing time P.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 3.2-3.3: preemptive single-machine models

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::config::{DispatchConfig, IdleAdvance};
use crate::dispatching::{Rule, RuleClass, RuleEngine, SchedulingContext};
use crate::error::{DispatchError, Result};
use crate::models::{GanttSegment, JobRecord, ScheduleEntry, ScheduleResult};

/// Mutable simulation state of one job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobState {
    /// Work left; clamped to 0 on completion.
    pub remaining: f64,
    /// Time of first execution.
    pub start_time: Option<f64>,
    /// Time the last unit finished.
    pub completion_time: Option<f64>,
}

impl JobState {
    fn new(processing_time: f64) -> Self {
        Self {
            remaining: processing_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Whether work is left.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Simulates preemptive dispatching rules (SRPT, LRPT, LST).
///
/// # Example
///
/// ```
/// use u_dispatch::dispatching::Rule;
/// use u_dispatch::models::JobRecord;
/// use u_dispatch::scheduler::PreemptiveScheduler;
///
/// let jobs = vec![
///     JobRecord::new(0, "A", 4.0, 10.0),
///     JobRecord::new(1, "B", 3.0, 6.0).with_release_time(2.0),
/// ];
/// let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Srpt).unwrap();
///
/// assert_eq!(result.sequence(), vec!["A", "B"]);
/// assert_eq!(result.entries[1].completion_time, 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct PreemptiveScheduler {
    idle_advance: IdleAdvance,
    merge_segments: bool,
    step_limit: Option<u64>,
}

impl Default for PreemptiveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreemptiveScheduler {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&DispatchConfig::default())
    }

    /// Creates a simulator from shared configuration.
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            idle_advance: config.idle_advance,
            merge_segments: config.merge_segments,
            step_limit: config.step_limit,
        }
    }

    /// Simulates `jobs` under a preemptive rule.
    ///
    /// Entries are returned in ascending completion order; the timeline
    /// lists execution segments in time order.
    ///
    /// # Errors
    /// - [`DispatchError::StepLimitExceeded`] when a step limit is set and reached
    /// - [`DispatchError::Internal`] if `rule` is static, or if the clock
    ///   stops advancing (times beyond [`crate::validation::MAX_SIMULATION_TIME`])
    pub fn schedule(&self, jobs: &[JobRecord], rule: Rule) -> Result<ScheduleResult> {
        if rule.class() != RuleClass::Preemptive {
            return Err(DispatchError::Internal(format!(
                "{rule} is not a preemptive rule"
            )));
        }
        if jobs.iter().any(|j| j.processing_time.fract() != 0.0) {
            warn!(
                rule = %rule,
                "non-integer processing times are simulated in whole time units"
            );
        }

        let engine = RuleEngine::for_rule(rule);
        let mut states: Vec<JobState> = jobs
            .iter()
            .map(|j| JobState::new(j.processing_time))
            .collect();
        let mut timeline: Vec<GanttSegment> = Vec::new();
        let mut ctx = SchedulingContext::default();
        let mut steps: u64 = 0;

        loop {
            let now = ctx.current_time;
            let eligible = jobs
                .iter()
                .zip(&states)
                .enumerate()
                .filter(|(_, (job, state))| state.is_pending() && job.release_time <= now)
                .map(|(slot, (job, state))| (slot, job, state.remaining));

            let selected = engine.select_best(eligible, &ctx);

            let Some(slot) = selected else {
                let Some(release) = next_release(jobs, &states) else {
                    break;
                };
                self.count_step(&mut steps, rule)?;
                let next = match self.idle_advance {
                    IdleAdvance::JumpToNextRelease => release,
                    IdleAdvance::UnitStep => now + 1.0,
                };
                trace!(rule = %rule, from = now, to = next, "machine idle");
                ctx = SchedulingContext::at_time(next);
                continue;
            };
            self.count_step(&mut steps, rule)?;

            let job = &jobs[slot];
            let end = ctx.advanced_by(1.0).current_time;
            if end <= now {
                return Err(DispatchError::Internal(format!(
                    "clock cannot advance past t = {now} while running job '{}'",
                    job.id
                )));
            }

            let state = &mut states[slot];
            if state.start_time.is_none() {
                state.start_time = Some(now);
            }
            state.remaining -= 1.0;
            ctx = SchedulingContext::at_time(end);

            if state.remaining <= 0.0 {
                state.remaining = 0.0;
                state.completion_time = Some(end);
            }
            self.record_segment(&mut timeline, job, now, end);
        }

        let mut entries = jobs
            .iter()
            .zip(&states)
            .map(|(job, state)| build_entry(job, state))
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| {
            a.completion_time
                .partial_cmp(&b.completion_time)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            rule = %rule,
            jobs = entries.len(),
            late = entries.iter().filter(|e| e.is_late()).count(),
            makespan = ctx.current_time,
            segments = timeline.len(),
            steps,
            "simulated preemptive rule"
        );
        Ok(ScheduleResult::new(rule, entries, timeline))
    }

    /// Counts one executed unit or idle advance against the step limit.
    fn count_step(&self, steps: &mut u64, rule: Rule) -> Result<()> {
        *steps += 1;
        match self.step_limit {
            Some(limit) if *steps > limit => Err(DispatchError::StepLimitExceeded { rule, limit }),
            _ => Ok(()),
        }
    }

    fn record_segment(
        &self,
        timeline: &mut Vec<GanttSegment>,
        job: &JobRecord,
        start: f64,
        end: f64,
    ) {
        if self.merge_segments {
            if let Some(last) = timeline.last_mut() {
                if last.job_index == job.index && last.end == start {
                    last.end = end;
                    return;
                }
            }
        }
        timeline.push(GanttSegment::new(job.index, job.id.clone(), start, end));
    }
}

/// Earliest release time among jobs with work left.
fn next_release(jobs: &[JobRecord], states: &[JobState]) -> Option<f64> {
    jobs.iter()
        .zip(states)
        .filter(|(_, state)| state.is_pending())
        .map(|(job, _)| job.release_time)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

fn build_entry(job: &JobRecord, state: &JobState) -> Result<ScheduleEntry> {
    match (state.start_time, state.completion_time) {
        (Some(start), Some(completion)) => Ok(ScheduleEntry::new(
            job.index,
            job.id.clone(),
            job.release_time,
            job.processing_time,
            job.due_date,
            start,
            completion,
        )),
        _ => Err(DispatchError::Internal(format!(
            "job '{}' has no completion time after simulation",
            job.id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measure;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn make_job(index: usize, id: &str, pt: f64, due: f64, release: f64) -> JobRecord {
        JobRecord::new(index, id, pt, due).with_release_time(release)
    }

    fn completions(result: &ScheduleResult) -> Vec<(&str, f64)> {
        result
            .entries
            .iter()
            .map(|e| (e.job_id.as_str(), e.completion_time))
            .collect()
    }

    fn spans(result: &ScheduleResult) -> Vec<(&str, f64, f64)> {
        result
            .timeline
            .iter()
            .map(|s| (s.job_id.as_str(), s.start, s.end))
            .collect()
    }

    fn random_jobs(rng: &mut StdRng, n: usize) -> Vec<JobRecord> {
        (0..n)
            .map(|i| {
                let p = rng.random_range(1..=6) as f64;
                let r = rng.random_range(0..=10) as f64;
                let d = r + p + rng.random_range(0..=12) as f64;
                make_job(i, &format!("J{i}"), p, d, r)
            })
            .collect()
    }

    #[test]
    fn test_srpt_scenario() {
        let jobs = vec![
            make_job(0, "A", 4.0, 10.0, 0.0),
            make_job(1, "B", 3.0, 6.0, 2.0),
        ];
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Srpt).unwrap();

        // At t=2, A has 2 left < B's 3, so A is not preempted.
        assert_eq!(completions(&result), vec![("A", 4.0), ("B", 7.0)]);
        assert_eq!(spans(&result), vec![("A", 0.0, 4.0), ("B", 4.0, 7.0)]);
        assert_eq!(result.entry_for_job(1).unwrap().start_time, 4.0);
        // B: 7 - 6
        assert_eq!(result.entry_for_job(1).unwrap().lateness, 1.0);
    }

    #[test]
    fn test_srpt_preempts() {
        let jobs = vec![
            make_job(0, "A", 5.0, 20.0, 0.0),
            make_job(1, "B", 1.0, 20.0, 1.0),
        ];
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Srpt).unwrap();

        assert_eq!(completions(&result), vec![("B", 2.0), ("A", 6.0)]);
        assert_eq!(
            spans(&result),
            vec![("A", 0.0, 1.0), ("B", 1.0, 2.0), ("A", 2.0, 6.0)]
        );
        let a = result.entry_for_job(0).unwrap();
        assert_eq!(a.start_time, 0.0);
        // Interrupted: completion - start exceeds processing time.
        assert!(a.completion_time - a.start_time > a.processing_time);
    }

    #[test]
    fn test_lrpt_alternates_on_ties() {
        let jobs = vec![
            make_job(0, "A", 3.0, 10.0, 0.0),
            make_job(1, "B", 3.0, 10.0, 0.0),
        ];
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Lrpt).unwrap();

        assert_eq!(completions(&result), vec![("A", 5.0), ("B", 6.0)]);
        assert_eq!(result.entry_for_job(0).unwrap().start_time, 0.0);
        assert_eq!(result.entry_for_job(1).unwrap().start_time, 1.0);
        assert_eq!(result.timeline.len(), 6);
    }

    #[test]
    fn test_lst() {
        let jobs = vec![
            make_job(0, "A", 4.0, 10.0, 0.0),
            make_job(1, "B", 2.0, 5.0, 0.0),
        ];
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Lst).unwrap();

        // Slack at t=0: A = 6, B = 3
        assert_eq!(completions(&result), vec![("B", 2.0), ("A", 6.0)]);
        assert_eq!(spans(&result), vec![("B", 0.0, 2.0), ("A", 2.0, 6.0)]);
    }

    #[test]
    fn test_lst_tie_goes_to_first_job() {
        let jobs = vec![
            make_job(0, "A", 2.0, 5.0, 0.0),
            make_job(1, "B", 3.0, 6.0, 0.0),
        ];
        // Slack at t=0: A = 3, B = 3
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Lst).unwrap();
        assert_eq!(result.timeline[0].job_id, "A");
    }

    #[test]
    fn test_idle_gap_jumps_to_release() {
        let jobs = vec![
            make_job(0, "A", 2.0, 10.0, 0.0),
            make_job(1, "B", 2.0, 10.0, 5.0),
        ];
        for rule in [Rule::Srpt, Rule::Lrpt, Rule::Lst] {
            let result = PreemptiveScheduler::new().schedule(&jobs, rule).unwrap();
            assert_eq!(spans(&result), vec![("A", 0.0, 2.0), ("B", 5.0, 7.0)]);

            let b = result.entry_for_job(1).unwrap();
            assert_eq!(b.start_time, 5.0);
            assert_eq!(b.flow_time, Measure::Value(2.0));
        }
    }

    #[test]
    fn test_first_release_after_zero() {
        let jobs = vec![make_job(0, "A", 3.0, 4.0, 3.0)];
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Srpt).unwrap();
        let a = &result.entries[0];
        assert_eq!(a.start_time, 3.0);
        assert_eq!(a.completion_time, 6.0);
        assert_eq!(a.lateness, 2.0);
    }

    #[test]
    fn test_unit_step_matches_jump() {
        let jobs = vec![
            make_job(0, "A", 2.0, 10.0, 1.0),
            make_job(1, "B", 3.0, 8.0, 6.0),
            make_job(2, "C", 1.0, 20.0, 6.0),
        ];
        let config = DispatchConfig::new().with_idle_advance(IdleAdvance::UnitStep);
        for rule in [Rule::Srpt, Rule::Lrpt, Rule::Lst] {
            let jump = PreemptiveScheduler::new().schedule(&jobs, rule).unwrap();
            let unit = PreemptiveScheduler::from_config(&config)
                .schedule(&jobs, rule)
                .unwrap();
            assert_eq!(jump, unit);
        }
    }

    #[test]
    fn test_unmerged_segments_are_unit_length() {
        let jobs = vec![
            make_job(0, "A", 3.0, 10.0, 0.0),
            make_job(1, "B", 2.0, 10.0, 0.0),
        ];
        let config = DispatchConfig::new().with_merge_segments(false);
        let result = PreemptiveScheduler::from_config(&config)
            .schedule(&jobs, Rule::Srpt)
            .unwrap();

        assert_eq!(result.timeline.len(), 5);
        assert!(result.timeline.iter().all(|s| s.duration() == 1.0));
    }

    #[test]
    fn test_step_limit_counts_units() {
        let jobs = vec![make_job(0, "A", 3.0, 5.0, 2.0)];
        // One idle jump plus three executed units.
        let exact = DispatchConfig::new().with_step_limit(4);
        assert!(PreemptiveScheduler::from_config(&exact)
            .schedule(&jobs, Rule::Srpt)
            .is_ok());

        let short = DispatchConfig::new().with_step_limit(3);
        assert!(PreemptiveScheduler::from_config(&short)
            .schedule(&jobs, Rule::Srpt)
            .is_err());
    }

    #[test]
    fn test_step_limit() {
        let jobs = vec![make_job(0, "A", 50.0, 60.0, 0.0)];
        let config = DispatchConfig::new().with_step_limit(10);
        let err = PreemptiveScheduler::from_config(&config)
            .schedule(&jobs, Rule::Srpt)
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::StepLimitExceeded {
                rule: Rule::Srpt,
                limit: 10
            }
        );
    }

    #[test]
    fn test_fractional_processing_time_rounds_up() {
        // Known limitation: the final fractional unit still takes a full step.
        let jobs = vec![make_job(0, "A", 2.5, 10.0, 0.0)];
        let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Srpt).unwrap();
        assert_eq!(result.entries[0].completion_time, 3.0);
        assert_eq!(result.entries[0].processing_time, 2.5);
    }

    #[test]
    fn test_stalled_clock_is_an_error() {
        let jobs = vec![make_job(0, "A", 3.0, 10.0, 1e17)];
        let err = PreemptiveScheduler::new()
            .schedule(&jobs, Rule::Srpt)
            .unwrap_err();
        assert!(matches!(err, DispatchError::Internal(_)));
    }

    #[test]
    fn test_rejects_static_rule() {
        let jobs = vec![make_job(0, "A", 1.0, 1.0, 0.0)];
        let err = PreemptiveScheduler::new().schedule(&jobs, Rule::Edd).unwrap_err();
        assert!(matches!(err, DispatchError::Internal(_)));
    }

    #[test]
    fn test_timeline_invariants_random() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let n = rng.random_range(1..=8);
            let jobs = random_jobs(&mut rng, n);

            for rule in [Rule::Srpt, Rule::Lrpt, Rule::Lst] {
                let result = PreemptiveScheduler::new().schedule(&jobs, rule).unwrap();
                assert_eq!(result.len(), jobs.len());

                // Segments are ordered and never overlap.
                for pair in result.timeline.windows(2) {
                    assert!(pair[0].end <= pair[1].start);
                }
                for job in &jobs {
                    let segments = result.segments_for_job(job.index);
                    let executed: f64 = segments.iter().map(|s| s.duration()).sum();
                    assert_eq!(executed, job.processing_time);

                    let entry = result.entry_for_job(job.index).unwrap();
                    assert_eq!(entry.start_time, segments[0].start);
                    assert_eq!(entry.completion_time, segments[segments.len() - 1].end);
                    assert!(entry.start_time >= job.release_time);
                    assert_eq!(
                        entry.lateness,
                        (entry.completion_time - job.due_date).max(0.0)
                    );
                    assert!(entry.flow_time.is_applicable());
                }

                // Ascending completion order.
                for pair in result.entries.windows(2) {
                    assert!(pair[0].completion_time <= pair[1].completion_time);
                }
                assert_eq!(
                    result.total_processing_time(),
                    jobs.iter().map(|j| j.processing_time).sum::<f64>()
                );
            }
        }
    }

    #[test]
    fn test_no_idle_while_jobs_wait() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            let jobs = random_jobs(&mut rng, 6);
            let result = PreemptiveScheduler::new().schedule(&jobs, Rule::Srpt).unwrap();

            // Every gap in the timeline ends at a release time.
            for pair in result.timeline.windows(2) {
                if pair[0].end < pair[1].start {
                    assert!(jobs.iter().any(|j| j.release_time == pair[1].start));
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let jobs = random_jobs(&mut rng, 8);
        for rule in [Rule::Srpt, Rule::Lrpt, Rule::Lst] {
            let scheduler = PreemptiveScheduler::new();
            assert_eq!(
                scheduler.schedule(&jobs, rule).unwrap(),
                scheduler.schedule(&jobs, rule).unwrap()
            );
        }
    }
}

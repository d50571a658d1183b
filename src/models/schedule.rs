//! Schedule (solution) model.
//!
//! A schedule result holds one timing row per job for a single rule and,
//! for preemptive rules, the execution timeline the rows were derived from.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Serialize, Serializer};
use std::fmt;

use crate::dispatching::Rule;

/// Marker emitted for values that are not applicable.
pub const NOT_APPLICABLE: &str = "N/A";

/// A numeric outcome that may be not applicable.
///
/// Serializes as a plain number, or as the string `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Value(f64),
    NotApplicable,
}

impl Measure {
    /// `Value(v)` when `v >= 0`, otherwise not applicable.
    pub fn non_negative(v: f64) -> Self {
        if v >= 0.0 {
            Measure::Value(v)
        } else {
            Measure::NotApplicable
        }
    }

    /// The numeric value, if applicable.
    pub fn value(&self) -> Option<f64> {
        match self {
            Measure::Value(v) => Some(*v),
            Measure::NotApplicable => None,
        }
    }

    /// Whether a numeric value is present.
    pub fn is_applicable(&self) -> bool {
        matches!(self, Measure::Value(_))
    }

    /// Renders with a fixed number of decimals, or the N/A marker.
    pub fn format(&self, precision: usize) -> String {
        match self {
            Measure::Value(v) => format!("{v:.precision$}"),
            Measure::NotApplicable => NOT_APPLICABLE.to_string(),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Value(v) => write!(f, "{v}"),
            Measure::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Measure::Value(v) => serializer.serialize_f64(*v),
            Measure::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

/// Timing of one job under one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    /// Position of the job in the input table.
    pub job_index: usize,
    pub job_id: String,
    pub release_time: f64,
    pub processing_time: f64,
    pub due_date: f64,
    /// First instant the job runs.
    pub start_time: f64,
    /// Instant the last unit of work finishes.
    pub completion_time: f64,
    /// `completion - release`, not applicable when negative.
    pub flow_time: Measure,
    /// `max(0, completion - due_date)`.
    pub lateness: f64,
}

impl ScheduleEntry {
    /// Builds an entry, deriving flow time and lateness.
    pub(crate) fn new(
        job_index: usize,
        job_id: impl Into<String>,
        release_time: f64,
        processing_time: f64,
        due_date: f64,
        start_time: f64,
        completion_time: f64,
    ) -> Self {
        Self {
            job_index,
            job_id: job_id.into(),
            release_time,
            processing_time,
            due_date,
            start_time,
            completion_time,
            flow_time: Measure::non_negative(completion_time - release_time),
            lateness: (completion_time - due_date).max(0.0),
        }
    }

    /// Whether the job finished after its due date.
    pub fn is_late(&self) -> bool {
        self.lateness > 0.0
    }
}

/// One contiguous interval during which a job runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttSegment {
    pub job_index: usize,
    pub job_id: String,
    pub start: f64,
    pub end: f64,
}

impl GanttSegment {
    /// Creates a segment.
    pub fn new(job_index: usize, job_id: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            job_index,
            job_id: job_id.into(),
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The outcome of one dispatching rule.
///
/// Entries are in dispatch order for static rules and in ascending
/// completion order for preemptive rules. The timeline is empty for
/// static rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResult {
    pub rule: Rule,
    pub entries: Vec<ScheduleEntry>,
    pub timeline: Vec<GanttSegment>,
}

impl ScheduleResult {
    /// Creates a result.
    pub fn new(rule: Rule, entries: Vec<ScheduleEntry>, timeline: Vec<GanttSegment>) -> Self {
        Self {
            rule,
            entries,
            timeline,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest completion time, 0 for an empty result.
    pub fn makespan(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.completion_time)
            .fold(0.0, f64::max)
    }

    /// Sum of processing times over all entries.
    pub fn total_processing_time(&self) -> f64 {
        self.entries.iter().map(|e| e.processing_time).sum()
    }

    /// Entry for the job at `job_index` in the input table.
    pub fn entry_for_job(&self, job_index: usize) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.job_index == job_index)
    }

    /// Timeline segments of the job at `job_index`, in time order.
    pub fn segments_for_job(&self, job_index: usize) -> Vec<&GanttSegment> {
        self.timeline
            .iter()
            .filter(|s| s.job_index == job_index)
            .collect()
    }

    /// Job ids in entry order.
    pub fn sequence(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.job_id.as_str()).collect()
    }

    /// Execution intervals suitable for a Gantt chart.
    ///
    /// Returns the recorded timeline for preemptive rules. Static rules
    /// run each job without interruption, so one bar per entry is derived
    /// from its start and processing time.
    pub fn execution_segments(&self) -> Vec<GanttSegment> {
        if !self.timeline.is_empty() {
            return self.timeline.clone();
        }
        self.entries
            .iter()
            .map(|e| {
                GanttSegment::new(
                    e.job_index,
                    e.job_id.clone(),
                    e.start_time,
                    e.start_time + e.processing_time,
                )
            })
            .collect()
    }
}

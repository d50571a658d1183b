//! Rule comparison metrics.
//!
//! Summarizes each rule's schedule into one comparison row so rules can
//! be ranked side by side.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Completion Time | mean(C_j) |
//! | Avg Flow Time | mean(C_j - r_j), N/A if any job's flow time is N/A |
//! | Avg Lateness | mean(max(0, C_j - d_j)) |
//! | Utilization (%) | 100 × Σp_j / ΣC_j |
//!
//! Utilization divides by the *sum* of completion times rather than the
//! makespan. It equals 100% only for a single job starting at 0.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use crate::dispatching::Rule;
use crate::models::{Measure, ScheduleResult};

/// Aggregate performance of one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub rule: Rule,
    pub average_completion_time: f64,
    /// Not applicable when any job's flow time is.
    pub average_flow_time: Measure,
    pub average_lateness: f64,
    /// Percentage, not applicable when Σ completion times is 0.
    pub utilization: Measure,
}

impl ComparisonRow {
    /// Computes the row for a single rule's schedule.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let entries = &result.entries;
        let n = entries.len() as f64;

        let total_completion: f64 = entries.iter().map(|e| e.completion_time).sum();
        let total_lateness: f64 = entries.iter().map(|e| e.lateness).sum();

        let average_flow_time = entries
            .iter()
            .map(|e| e.flow_time.value())
            .sum::<Option<f64>>()
            .map_or(Measure::NotApplicable, |total| Measure::Value(mean(total, n)));

        let utilization = if total_completion > 0.0 {
            Measure::Value(100.0 * result.total_processing_time() / total_completion)
        } else {
            Measure::NotApplicable
        };

        Self {
            rule: result.rule,
            average_completion_time: mean(total_completion, n),
            average_flow_time,
            average_lateness: mean(total_lateness, n),
            utilization,
        }
    }

    /// Renders every metric with `precision` decimals.
    pub fn formatted(&self, precision: usize) -> FormattedComparisonRow {
        FormattedComparisonRow {
            rule: self.rule.name().to_string(),
            average_completion_time: format!("{:.precision$}", self.average_completion_time),
            average_flow_time: self.average_flow_time.format(precision),
            average_lateness: format!("{:.precision$}", self.average_lateness),
            utilization: self.utilization.format(precision),
        }
    }
}

/// A comparison row rendered for reporting.
///
/// Serialized keys match the report column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedComparisonRow {
    #[serde(rename = "Rule")]
    pub rule: String,
    #[serde(rename = "Average Completion Time")]
    pub average_completion_time: String,
    #[serde(rename = "Average Flow Time")]
    pub average_flow_time: String,
    #[serde(rename = "Average Late Time")]
    pub average_lateness: String,
    #[serde(rename = "Utilization (%)")]
    pub utilization: String,
}

/// Builds one comparison row per result, in input order.
pub fn compare(results: &[ScheduleResult]) -> Vec<ComparisonRow> {
    results.iter().map(ComparisonRow::calculate).collect()
}

fn mean(total: f64, n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else {
        total / n
    }
}

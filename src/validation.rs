//! Input validation for dispatching requests.
//!
//! Checks a job table against the needs of one rule before any
//! computation runs. Detects:
//! - Columns the rule requires but the table lacks (schema errors)
//! - Non-positive processing times and weights
//! - Negative or non-finite release times, non-finite due dates
//! - Rows missing a value in a required column
//! - Preemptive horizons too large to step through in whole units
//!
//! All data issues in a table are collected and reported together.

use crate::dispatching::Rule;
use crate::error::{DataIssue, DataIssueKind, DispatchError, Result};
use crate::models::{Column, Job, JobRecord, JobTable};

/// Data validation result.
pub type ValidationResult = std::result::Result<(), Vec<DataIssue>>;

/// First time at which `t + 1.0 == t` in `f64` (2^53).
///
/// Preemptive simulation advances its clock in unit steps and must stay
/// below this bound.
pub const MAX_SIMULATION_TIME: f64 = 9_007_199_254_740_992.0;

/// Checks that the table provides every column `rule` requires.
pub fn check_schema(table: &JobTable, rule: Rule) -> Result<()> {
    let missing: Vec<Column> = rule
        .required_columns()
        .iter()
        .copied()
        .filter(|&c| !table.has_column(c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DispatchError::MissingColumns { rule, missing })
    }
}

/// Validates every row's values for `rule`.
///
/// Checks:
/// 1. Processing time is finite and positive
/// 2. Every column the rule requires has a value
/// 3. Release times, where given, are finite and non-negative
/// 4. Due dates, where given, are finite
/// 5. Weights are finite and positive when the rule uses them
/// 6. For preemptive rules, `release_time + Σ processing_time` stays
///    below [`MAX_SIMULATION_TIME`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(issues)` with all detected issues.
pub fn validate_jobs(table: &JobTable, rule: Rule) -> ValidationResult {
    let required = rule.required_columns();
    let total_processing = table.total_processing_time();
    let mut issues = Vec::new();

    for job in table.jobs() {
        if !(job.processing_time.is_finite() && job.processing_time > 0.0) {
            issues.push(DataIssue::new(
                &job.id,
                DataIssueKind::NonPositiveProcessingTime,
                format!("processing time must be positive, got {}", job.processing_time),
            ));
        }

        for &column in required {
            if matches!(column, Column::Id | Column::ProcessingTime) {
                continue;
            }
            if job.optional_value(column).is_none() {
                issues.push(DataIssue::new(
                    &job.id,
                    DataIssueKind::MissingValue,
                    format!("missing value in column '{column}'"),
                ));
            }
        }

        if let Some(release) = job.release_time {
            if !(release.is_finite() && release >= 0.0) {
                issues.push(DataIssue::new(
                    &job.id,
                    DataIssueKind::InvalidReleaseTime,
                    format!("release time must be non-negative, got {release}"),
                ));
            }
        }

        if let Some(due) = job.due_date {
            if !due.is_finite() {
                issues.push(DataIssue::new(
                    &job.id,
                    DataIssueKind::InvalidDueDate,
                    format!("due date must be finite, got {due}"),
                ));
            }
        }

        if rule.is_preemptive() {
            let horizon = job.release_time.unwrap_or(0.0) + total_processing;
            if horizon >= MAX_SIMULATION_TIME {
                issues.push(DataIssue::new(
                    &job.id,
                    DataIssueKind::TimeHorizonExceeded,
                    format!("simulation horizon {horizon} exceeds {MAX_SIMULATION_TIME}"),
                ));
            }
        }

        if required.contains(&Column::Weight) {
            if let Some(weight) = job.weight {
                if !(weight.is_finite() && weight > 0.0) {
                    issues.push(DataIssue::new(
                        &job.id,
                        DataIssueKind::NonPositiveWeight,
                        format!("weight must be positive, got {weight}"),
                    ));
                }
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validates the table for `rule` and resolves it into job records.
///
/// Columns the rule does not require fall back to release time 0 and
/// weight 1. Records keep input order, so `records[i].index == i`.
///
/// # Errors
/// - [`DispatchError::EmptyTable`] for a table without rows
/// - [`DispatchError::MissingColumns`] when a required column is absent
/// - [`DispatchError::InvalidData`] listing every out-of-domain value
pub fn resolve(table: &JobTable, rule: Rule) -> Result<Vec<JobRecord>> {
    if table.is_empty() {
        return Err(DispatchError::EmptyTable);
    }
    check_schema(table, rule)?;
    validate_jobs(table, rule).map_err(DispatchError::InvalidData)?;

    Ok(table
        .jobs()
        .iter()
        .enumerate()
        .map(|(index, job)| to_record(index, job))
        .collect())
}

fn to_record(index: usize, job: &Job) -> JobRecord {
    JobRecord::new(
        index,
        job.id.clone(),
        job.processing_time,
        job.due_date.unwrap_or_default(),
    )
    .with_release_time(job.release_time.unwrap_or(0.0))
    .with_weight(job.weight.unwrap_or(1.0))
}

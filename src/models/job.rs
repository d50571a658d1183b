//! Job and job table models.
//!
//! A job is one row of input: a unit of work for the single machine,
//! with an optional due date, release time, and weight. Which optional
//! columns are needed depends on the rule being computed; the table keeps
//! the raw rows and [`crate::validation`] resolves them per rule into
//! [`JobRecord`]s.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A job (one input row).
///
/// Field names also accept the short column labels used in job sheets
/// (`job`, `pj`, `dj`, `rj`, `wj`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job label. Uniqueness is recommended but not required.
    ///
    /// Numeric labels are read as their decimal text.
    #[serde(alias = "job", deserialize_with = "deserialize_label")]
    pub id: String,
    /// Processing time (p_j). Must be positive.
    #[serde(alias = "pj")]
    pub processing_time: f64,
    /// Due date (d_j).
    #[serde(default, alias = "dj", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<f64>,
    /// Release time (r_j). `None` = column absent.
    #[serde(default, alias = "rj", skip_serializing_if = "Option::is_none")]
    pub release_time: Option<f64>,
    /// Weight (w_j), used by WSPT.
    #[serde(default, alias = "wj", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Job {
    /// Creates a job with the given id and processing time.
    pub fn new(id: impl Into<String>, processing_time: f64) -> Self {
        Self {
            id: id.into(),
            processing_time,
            due_date: None,
            release_time: None,
            weight: None,
        }
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: f64) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the release time.
    pub fn with_release_time(mut self, release_time: f64) -> Self {
        self.release_time = Some(release_time);
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Value of an optional column for this row.
    ///
    /// Returns `None` for the mandatory `Id` and `ProcessingTime` columns.
    pub fn optional_value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Id | Column::ProcessingTime => None,
            Column::DueDate => self.due_date,
            Column::ReleaseTime => self.release_time,
            Column::Weight => self.weight,
        }
    }
}

/// A job label as it appears in a sheet cell.
#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Integer(i64),
    Number(f64),
}

fn deserialize_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Integer(n) => n.to_string(),
        Label::Number(n) => n.to_string(),
    })
}

/// Input columns of a job table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Id,
    ProcessingTime,
    DueDate,
    ReleaseTime,
    Weight,
}

impl Column {
    /// All columns in sheet order.
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::ProcessingTime,
        Column::DueDate,
        Column::ReleaseTime,
        Column::Weight,
    ];

    /// Short sheet label.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Id => "job",
            Column::ProcessingTime => "pj",
            Column::DueDate => "dj",
            Column::ReleaseTime => "rj",
            Column::Weight => "wj",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered, immutable table of jobs.
///
/// A column counts as present when at least one row has a value for it.
/// Rows missing a value in a present column are reported by validation
/// when a rule needs that column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Job>", into = "Vec<Job>")]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    /// Creates a table from rows in input order.
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Rows in input order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Whether any row carries a value for `column`.
    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::Id | Column::ProcessingTime => true,
            _ => self.jobs.iter().any(|j| j.optional_value(column).is_some()),
        }
    }

    /// Present columns in sheet order.
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|&c| self.has_column(c))
            .collect()
    }

    /// Sum of processing times across all rows.
    pub fn total_processing_time(&self) -> f64 {
        self.jobs.iter().map(|j| j.processing_time).sum()
    }
}

impl From<Vec<Job>> for JobTable {
    fn from(jobs: Vec<Job>) -> Self {
        Self::new(jobs)
    }
}

impl From<JobTable> for Vec<Job> {
    fn from(table: JobTable) -> Self {
        table.jobs
    }
}

impl FromIterator<Job> for JobTable {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A job resolved for one rule.
///
/// Optional columns the rule does not use are filled with neutral
/// defaults: release time 0, weight 1.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    /// Position in the input table.
    pub index: usize,
    /// Job label.
    pub id: String,
    pub processing_time: f64,
    pub due_date: f64,
    pub release_time: f64,
    pub weight: f64,
}

impl JobRecord {
    /// Creates a record with release time 0 and weight 1.
    pub fn new(index: usize, id: impl Into<String>, processing_time: f64, due_date: f64) -> Self {
        Self {
            index,
            id: id.into(),
            processing_time,
            due_date,
            release_time: 0.0,
            weight: 1.0,
        }
    }

    /// Sets the release time.
    pub fn with_release_time(mut self, release_time: f64) -> Self {
        self.release_time = release_time;
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

//! Request-level entry point.
//!
//! Parses rule names and the mode flag, validates the job table for each
//! rule and routes the rule to the static or preemptive scheduler. A
//! request either succeeds for every rule or fails with the first error.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::config::DispatchConfig;
use crate::dispatching::{Rule, RuleClass};
use crate::error::{DispatchError, Result};
use crate::models::{JobTable, ScheduleResult};
use crate::scheduler::{
    compare, ComparisonRow, FormattedComparisonRow, PreemptiveScheduler, StaticScheduler,
};
use crate::validation;

/// What a request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Schedules only.
    #[default]
    Execute,
    /// Schedules plus one comparison row per rule.
    Compare,
}

impl Mode {
    /// The flag value accepted by [`Mode::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Execute => "execute",
            Mode::Compare => "compare",
        }
    }
}

impl FromStr for Mode {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "execute" => Ok(Mode::Execute),
            "compare" => Ok(Mode::Compare),
            other => Err(DispatchError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Schedule results keyed by rule, in request order.
///
/// Serializes as a JSON object from rule name to result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleResults {
    results: Vec<ScheduleResult>,
}

impl RuleResults {
    /// Result for `rule`, if it was requested.
    pub fn get(&self, rule: Rule) -> Option<&ScheduleResult> {
        self.results.iter().find(|r| r.rule == rule)
    }

    /// Results in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleResult> {
        self.results.iter()
    }

    /// Number of rules with a result.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no rule was requested.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Rules in request order.
    pub fn rules(&self) -> Vec<Rule> {
        self.results.iter().map(|r| r.rule).collect()
    }

    /// Results as a slice, in request order.
    pub fn as_slice(&self) -> &[ScheduleResult] {
        &self.results
    }
}

impl<'a> IntoIterator for &'a RuleResults {
    type Item = &'a ScheduleResult;
    type IntoIter = std::slice::Iter<'a, ScheduleResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for RuleResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for result in &self.results {
            map.serialize_entry(result.rule.name(), result)?;
        }
        map.end()
    }
}

/// Response to a dispatch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResponse {
    pub mode: Mode,
    pub results: RuleResults,
    /// Formatted comparison rows, present in compare mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<FormattedComparisonRow>>,
}

/// Runs dispatching rules over a job table.
///
/// # Example
///
/// ```
/// use u_dispatch::models::{Job, JobTable};
/// use u_dispatch::RuleDispatcher;
///
/// let table = JobTable::new(vec![
///     Job::new("A", 4.0).with_due_date(10.0).with_release_time(0.0),
///     Job::new("B", 3.0).with_due_date(6.0).with_release_time(2.0),
/// ]);
/// let response = RuleDispatcher::default()
///     .process(&table, &["SPT", "SRPT"], "compare")
///     .unwrap();
///
/// assert_eq!(response.results.len(), 2);
/// let rows = response.comparison.unwrap();
/// assert_eq!(rows[1].rule, "SRPT");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleDispatcher {
    config: DispatchConfig,
}

impl RuleDispatcher {
    /// Creates a dispatcher with the given configuration.
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Configuration applied to every rule.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Parses rule names, rejecting unknown and repeated names.
    ///
    /// Names are case-sensitive.
    pub fn parse_rules<S: AsRef<str>>(names: &[S]) -> Result<Vec<Rule>> {
        let mut rules: Vec<Rule> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let rule: Rule = name.parse()?;
            if rules.contains(&rule) {
                return Err(DispatchError::DuplicateRule(name.to_string()));
            }
            rules.push(rule);
        }
        Ok(rules)
    }

    /// Schedules the table under each named rule.
    ///
    /// # Errors
    /// Fails with the first error encountered; no partial results are
    /// returned. Rule names are checked before any schedule is computed.
    pub fn execute<S: AsRef<str>>(
        &self,
        table: &JobTable,
        rule_names: &[S],
    ) -> Result<RuleResults> {
        let rules = Self::parse_rules(rule_names)?;
        info!(rules = rules.len(), jobs = table.len(), "dispatch request");
        self.run(table, &rules)
    }

    /// Schedules the table under each named rule and compares them.
    pub fn compare<S: AsRef<str>>(
        &self,
        table: &JobTable,
        rule_names: &[S],
    ) -> Result<Vec<ComparisonRow>> {
        let results = self.execute(table, rule_names)?;
        Ok(compare(results.as_slice()))
    }

    /// Handles a full request: rule names plus a mode flag
    /// (`"execute"` or `"compare"`).
    ///
    /// The mode and every rule name are validated before computation.
    pub fn process<S: AsRef<str>>(
        &self,
        table: &JobTable,
        rule_names: &[S],
        mode: &str,
    ) -> Result<DispatchResponse> {
        let mode: Mode = mode.parse()?;
        let rules = Self::parse_rules(rule_names)?;

        info!(
            mode = %mode,
            rules = rules.len(),
            jobs = table.len(),
            "dispatch request"
        );

        let results = self.run(table, &rules)?;
        let comparison = match mode {
            Mode::Execute => None,
            Mode::Compare => Some(
                compare(results.as_slice())
                    .iter()
                    .map(|row| row.formatted(self.config.precision))
                    .collect(),
            ),
        };

        Ok(DispatchResponse {
            mode,
            results,
            comparison,
        })
    }

    /// Schedules the table under a single rule.
    pub fn schedule(&self, table: &JobTable, rule: Rule) -> Result<ScheduleResult> {
        let jobs = validation::resolve(table, rule)?;
        match rule.class() {
            RuleClass::Static => StaticScheduler::new().schedule(&jobs, rule),
            RuleClass::Preemptive => {
                PreemptiveScheduler::from_config(&self.config).schedule(&jobs, rule)
            }
        }
    }

    fn run(&self, table: &JobTable, rules: &[Rule]) -> Result<RuleResults> {
        let results = rules
            .iter()
            .map(|&rule| self.schedule(table, rule))
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleResults { results })
    }
}

//! Rule identifiers and the rule lookup table.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::rules;
use super::DispatchingRule;
use crate::error::DispatchError;
use crate::models::Column;

/// The supported dispatching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Spt,
    Lpt,
    Wspt,
    Edd,
    Srpt,
    Lst,
    Lrpt,
}

/// How a rule produces a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleClass {
    /// Sort once, then run jobs back-to-back from t = 0.
    Static,
    /// Discrete-time simulation with release times and preemption.
    Preemptive,
}

struct RuleEntry {
    rule: Rule,
    name: &'static str,
    class: RuleClass,
    columns: &'static [Column],
    evaluator: &'static dyn DispatchingRule,
}

const SEQUENCING_COLUMNS: &[Column] = &[Column::Id, Column::ProcessingTime, Column::DueDate];

const WEIGHTED_COLUMNS: &[Column] = &[
    Column::Id,
    Column::ProcessingTime,
    Column::DueDate,
    Column::Weight,
];

const SIMULATION_COLUMNS: &[Column] = &[
    Column::Id,
    Column::ProcessingTime,
    Column::DueDate,
    Column::ReleaseTime,
];

// Indexed by `Rule as usize`.
static RULE_TABLE: [RuleEntry; 7] = [
    RuleEntry {
        rule: Rule::Spt,
        name: "SPT",
        class: RuleClass::Static,
        columns: SEQUENCING_COLUMNS,
        evaluator: &rules::Spt,
    },
    RuleEntry {
        rule: Rule::Lpt,
        name: "LPT",
        class: RuleClass::Static,
        columns: SEQUENCING_COLUMNS,
        evaluator: &rules::Lpt,
    },
    RuleEntry {
        rule: Rule::Wspt,
        name: "WSPT",
        class: RuleClass::Static,
        columns: WEIGHTED_COLUMNS,
        evaluator: &rules::Wspt,
    },
    RuleEntry {
        rule: Rule::Edd,
        name: "EDD",
        class: RuleClass::Static,
        columns: SEQUENCING_COLUMNS,
        evaluator: &rules::Edd,
    },
    RuleEntry {
        rule: Rule::Srpt,
        name: "SRPT",
        class: RuleClass::Preemptive,
        columns: SIMULATION_COLUMNS,
        evaluator: &rules::Srpt,
    },
    RuleEntry {
        rule: Rule::Lst,
        name: "LST",
        class: RuleClass::Preemptive,
        columns: SIMULATION_COLUMNS,
        evaluator: &rules::Lst,
    },
    RuleEntry {
        rule: Rule::Lrpt,
        name: "LRPT",
        class: RuleClass::Preemptive,
        columns: SIMULATION_COLUMNS,
        evaluator: &rules::Lrpt,
    },
];

impl Rule {
    /// All rules, in lookup table order.
    pub const ALL: [Rule; 7] = [
        Rule::Spt,
        Rule::Lpt,
        Rule::Wspt,
        Rule::Edd,
        Rule::Srpt,
        Rule::Lst,
        Rule::Lrpt,
    ];

    fn entry(self) -> &'static RuleEntry {
        &RULE_TABLE[self as usize]
    }

    /// Canonical name (e.g., "SPT").
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Static or preemptive.
    pub fn class(self) -> RuleClass {
        self.entry().class
    }

    /// Whether the rule is simulated with preemption.
    pub fn is_preemptive(self) -> bool {
        self.class() == RuleClass::Preemptive
    }

    /// Columns the job table must provide for this rule.
    pub fn required_columns(self) -> &'static [Column] {
        self.entry().columns
    }

    /// The priority function implementing this rule.
    pub fn evaluator(self) -> &'static dyn DispatchingRule {
        self.entry().evaluator
    }
}

impl FromStr for Rule {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RULE_TABLE
            .iter()
            .find(|entry| entry.name == s)
            .map(|entry| entry.rule)
            .ok_or_else(|| DispatchError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_discriminants() {
        for (i, rule) in Rule::ALL.iter().enumerate() {
            assert_eq!(RULE_TABLE[i].rule, *rule);
            assert_eq!(rule.evaluator().name(), rule.name());
        }
    }

    #[test]
    fn test_parse_names() {
        for rule in Rule::ALL {
            assert_eq!(rule.name().parse::<Rule>().unwrap(), rule);
        }
        assert_eq!(
            "FIFO".parse::<Rule>(),
            Err(DispatchError::UnknownRule("FIFO".into()))
        );
        // Names are matched exactly.
        assert!("spt".parse::<Rule>().is_err());
    }

    #[test]
    fn test_classes() {
        let preemptive: Vec<Rule> = Rule::ALL
            .into_iter()
            .filter(|r| r.is_preemptive())
            .collect();
        assert_eq!(preemptive, vec![Rule::Srpt, Rule::Lst, Rule::Lrpt]);
        assert_eq!(Rule::Edd.class(), RuleClass::Static);
    }

    #[test]
    fn test_required_columns() {
        assert!(Rule::Wspt.required_columns().contains(&Column::Weight));
        assert!(!Rule::Spt.required_columns().contains(&Column::Weight));
        assert!(!Rule::Spt.required_columns().contains(&Column::ReleaseTime));
        assert!(Rule::Lst.required_columns().contains(&Column::ReleaseTime));
    }

    #[test]
    fn test_serialize_as_name() {
        assert_eq!(serde_json::to_string(&Rule::Lrpt).unwrap(), "\"LRPT\"");
    }
}

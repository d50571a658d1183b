//! Single-machine dispatching rules.
//!
//! Schedules a table of jobs under one or more classic priority rules and
//! compares the outcomes. Static rules sort once and run jobs back-to-back;
//! preemptive rules are simulated in unit time steps with release times.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobTable`, `ScheduleEntry`,
//!   `ScheduleResult`, `GanttSegment`, `Measure`
//! - **`dispatching`**: The `Rule` lookup table, rule evaluators and `RuleEngine`
//! - **`scheduler`**: `StaticScheduler`, `PreemptiveScheduler`, rule comparison
//! - **`validation`**: Schema and value checks (missing columns, out-of-domain data)
//! - **`config`**: `DispatchConfig` shared by all rules of a request
//!
//! # Rules
//!
//! | Rule | Class | Priority |
//! |------|-------|----------|
//! | SPT | Static | Shortest processing time |
//! | LPT | Static | Longest processing time |
//! | WSPT | Static | Smallest `p_j / w_j` |
//! | EDD | Static | Earliest due date |
//! | SRPT | Preemptive | Shortest remaining work |
//! | LRPT | Preemptive | Longest remaining work |
//! | LST | Preemptive | Least slack `d_j - t - remaining` |
//!
//! # Example
//!
//! ```
//! use u_dispatch::models::{Job, JobTable};
//! use u_dispatch::{Rule, RuleDispatcher};
//!
//! let table = JobTable::new(vec![
//!     Job::new("A", 4.0).with_due_date(10.0),
//!     Job::new("B", 2.0).with_due_date(5.0),
//!     Job::new("C", 6.0).with_due_date(15.0),
//! ]);
//! let results = RuleDispatcher::default().execute(&table, &["SPT"]).unwrap();
//!
//! let spt = results.get(Rule::Spt).unwrap();
//! assert_eq!(spt.sequence(), vec!["B", "A", "C"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod config;
mod dispatcher;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::{DispatchConfig, IdleAdvance};
pub use dispatcher::{DispatchResponse, Mode, RuleDispatcher, RuleResults};
pub use dispatching::{Rule, RuleClass};
pub use error::{DispatchError, ErrorKind, Result};

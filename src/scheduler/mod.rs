//! Single-machine schedulers and rule comparison.
//!
//! # Algorithm
//!
//! `StaticScheduler` sorts jobs once by a rule's key and runs them
//! back-to-back. `PreemptiveScheduler` re-selects the job to run at every
//! unit of time, so a running job can be interrupted by a better one.
//!
//! # KPI
//!
//! `ComparisonRow` summarizes one rule's schedule: average completion,
//! flow and lateness, plus utilization.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod kpi;
mod preemptive;
mod sequence;

pub use kpi::{compare, ComparisonRow, FormattedComparisonRow};
pub use preemptive::{JobState, PreemptiveScheduler};
pub use sequence::StaticScheduler;

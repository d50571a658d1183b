//! Single-machine scheduling domain models.
//!
//! Input is a [`JobTable`] of [`Job`] rows; each rule produces a
//! [`ScheduleResult`] of [`ScheduleEntry`] rows plus, for preemptive
//! rules, a timeline of [`GanttSegment`]s.
//!
//! # Notation
//!
//! | Field | Symbol | Meaning |
//! |-------|--------|---------|
//! | `processing_time` | p_j | Work required on the machine |
//! | `due_date` | d_j | Target completion time |
//! | `release_time` | r_j | Earliest start time |
//! | `weight` | w_j | Relative importance (WSPT) |

mod job;
mod schedule;

pub use job::{Column, Job, JobRecord, JobTable};
pub use schedule::{GanttSegment, Measure, ScheduleEntry, ScheduleResult, NOT_APPLICABLE};

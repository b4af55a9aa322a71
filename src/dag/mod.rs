// src/dag/mod.rs

//! Task graph construction and scheduling.
//!
//! - [`graph`] infers producer/consumer edges from the file paths declared
//!   by task descriptors, enforces single-producer and acyclicity, and
//!   computes a topological order.
//! - [`scheduler`] contains the per-run state machine that decides which
//!   tasks are eligible, skips up-to-date tasks, and propagates failures.
//! - [`task_info`] provides run states and the scheduled-task type handed
//!   to executors.
//! - [`scheduler_step`] defines the result type for scheduler steps.
//! - [`state_manager`] manages per-run state transitions.

pub mod graph;
pub mod scheduler;
pub mod scheduler_step;
pub mod state_manager;
pub mod task_info;

pub use graph::{PipelineGraph, TaskId};
pub use scheduler::Scheduler;
pub use scheduler_step::SchedulerStep;
pub use task_info::{RunState, ScheduledTask};

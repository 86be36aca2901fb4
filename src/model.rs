/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Static system model: tasks, cores, and their grouping into MCPs.
//!
//! ```text
//! loader ──(YAML)──►  SystemModel  ──(borrow)──►  optimizer  ──►  Solution
//!                      ↑ validated, immutable
//! ```
//!
//! # Ownership model
//! The [`SystemModel`] is built once by the loader, validated at construction,
//! and then only ever borrowed — the optimizer, feasibility checker, and cost
//! function all take `&SystemModel`. There is no mutable global task or
//! platform list anywhere in the crate.

use std::collections::HashMap;

use thiserror::Error;

/// Discrete time unit used for periods, deadlines, and execution times.
pub type TimeUnit = u64;

/// Unique task identifier within a system model.
pub type TaskId = u32;

// ── Task ──────────────────────────────────────────────────────────────────────

/// One periodic real-time task, timed on a reference-speed core.
///
/// All timing fields are strictly positive — [`SystemModel::new`] rejects
/// zero values. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique task id.
    pub id: TaskId,

    /// Activation period.
    pub period: TimeUnit,

    /// Relative deadline.
    pub deadline: TimeUnit,

    /// Worst-case execution time on a reference core. Execution on a concrete
    /// core is `wcet × Core::wcet_factor`.
    pub wcet: TimeUnit,

    /// Rate-monotonic-style priority, `1 / deadline` — a lower deadline means
    /// a higher priority. Auxiliary metadata only; no component orders by it.
    pub priority: f64,
}

impl Task {
    /// Build a task, deriving `priority` from the deadline.
    pub fn new(id: TaskId, period: TimeUnit, deadline: TimeUnit, wcet: TimeUnit) -> Self {
        let priority = if deadline == 0 {
            0.0
        } else {
            1.0 / deadline as f64
        };
        Self {
            id,
            period,
            deadline,
            wcet,
            priority,
        }
    }

    /// Execution time of this task on `core`, scaled by the core's speed
    /// factor.
    pub fn scaled_wcet(&self, core: &Core) -> f64 {
        self.wcet as f64 * core.wcet_factor
    }

    /// Worst-case response time on `core`: the scaled execution time rounded
    /// to the nearest whole time unit.
    pub fn wcrt(&self, core: &Core) -> TimeUnit {
        self.scaled_wcet(core).round() as TimeUnit
    }
}

// ── Core / MCP ────────────────────────────────────────────────────────────────

/// One processing core inside an MCP.
#[derive(Debug, Clone, PartialEq)]
pub struct Core {
    /// Core id, unique within its owning MCP.
    pub id: u32,

    /// WCET scale factor — execution time on this core is the task's
    /// reference WCET multiplied by this value. Strictly positive; a value
    /// above 1.0 models a slower core.
    pub wcet_factor: f64,
}

/// A multi-core platform unit: an ordered, non-empty collection of cores.
///
/// The core order is load order and defines core-index addressing — a core is
/// uniquely named by `(mcp_index, core_index)` across the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Mcp {
    /// MCP id.
    pub id: u32,

    /// Cores in load order.
    pub cores: Vec<Core>,
}

// ── Model validation errors ───────────────────────────────────────────────────

/// Validation failures raised by [`SystemModel::new`].
///
/// Every variant carries the offending identifiers so the loader can log a
/// precise message before aborting the run.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// The task list is empty — there is nothing to map.
    #[error("model contains no tasks")]
    NoTasks,

    /// The platform has no MCPs.
    #[error("platform contains no MCPs")]
    NoMcps,

    /// An MCP with no cores cannot host any binding.
    #[error("MCP {mcp_id} has no cores")]
    EmptyMcp { mcp_id: u32 },

    /// Two tasks share the same id.
    #[error("duplicate task id {id}")]
    DuplicateTaskId { id: TaskId },

    /// A task carries a zero period, deadline, or WCET.
    #[error("task {task_id}: {field} must be positive")]
    NonPositiveTiming {
        task_id: TaskId,
        field: &'static str,
    },

    /// A core carries a non-positive WCET scale factor.
    #[error("core {core_id} of MCP {mcp_id}: wcet_factor must be positive, got {factor}")]
    NonPositiveFactor {
        mcp_id: u32,
        core_id: u32,
        factor: f64,
    },
}

// ── SystemModel ───────────────────────────────────────────────────────────────

/// The validated, immutable aggregate of task list and platform.
///
/// The sum of all task deadlines is computed once here and cached — the laxity
/// cost function reads it on every evaluation and must never re-scan the task
/// list.
#[derive(Debug, Clone)]
pub struct SystemModel {
    tasks: Vec<Task>,
    mcps: Vec<Mcp>,

    /// task id → position in `tasks`, for O(1) binding resolution.
    task_index: HashMap<TaskId, usize>,

    /// Cached Σ of all task deadlines.
    total_deadline: TimeUnit,
}

impl SystemModel {
    /// Validate and assemble a model.
    ///
    /// # Errors
    /// Any structural defect — empty task list or platform, an MCP without
    /// cores, duplicate task ids, zero timing values, or a non-positive core
    /// factor — is rejected here so the optimizer never sees an invalid
    /// model.
    pub fn new(tasks: Vec<Task>, mcps: Vec<Mcp>) -> Result<Self, ModelError> {
        if tasks.is_empty() {
            return Err(ModelError::NoTasks);
        }
        if mcps.is_empty() {
            return Err(ModelError::NoMcps);
        }

        for task in &tasks {
            if task.period == 0 {
                return Err(ModelError::NonPositiveTiming {
                    task_id: task.id,
                    field: "period",
                });
            }
            if task.deadline == 0 {
                return Err(ModelError::NonPositiveTiming {
                    task_id: task.id,
                    field: "deadline",
                });
            }
            if task.wcet == 0 {
                return Err(ModelError::NonPositiveTiming {
                    task_id: task.id,
                    field: "wcet",
                });
            }
        }

        for mcp in &mcps {
            if mcp.cores.is_empty() {
                return Err(ModelError::EmptyMcp { mcp_id: mcp.id });
            }
            for core in &mcp.cores {
                if core.wcet_factor <= 0.0 {
                    return Err(ModelError::NonPositiveFactor {
                        mcp_id: mcp.id,
                        core_id: core.id,
                        factor: core.wcet_factor,
                    });
                }
            }
        }

        let mut task_index = HashMap::with_capacity(tasks.len());
        for (pos, task) in tasks.iter().enumerate() {
            if task_index.insert(task.id, pos).is_some() {
                return Err(ModelError::DuplicateTaskId { id: task.id });
            }
        }

        let total_deadline = tasks.iter().map(|t| t.deadline).sum();

        Ok(Self {
            tasks,
            mcps,
            task_index,
            total_deadline,
        })
    }

    /// All tasks, in load order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All MCPs, in load order.
    pub fn mcps(&self) -> &[Mcp] {
        &self.mcps
    }

    /// Look up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.task_index.get(&id).map(|&pos| &self.tasks[pos])
    }

    /// The core at `(mcp_index, core_index)`, or `None` if either index is
    /// out of range.
    pub fn core(&self, mcp_index: usize, core_index: usize) -> Option<&Core> {
        self.mcps.get(mcp_index)?.cores.get(core_index)
    }

    /// Total number of cores across all MCPs.
    pub fn core_count(&self) -> usize {
        self.mcps.iter().map(|m| m.cores.len()).sum()
    }

    /// Cached Σ of all task deadlines.
    pub fn total_deadline(&self) -> TimeUnit {
        self.total_deadline
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

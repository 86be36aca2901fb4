/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedulability feasibility analysis for task→core assignments.
//!
//! # Theory
//! The per-core test is a coarse utilization proxy, not a response-time
//! analysis. For the tasks bound to one core, the common horizon `H` is the
//! LCM of their relative deadlines; every deadline divides `H`, so each task
//! fits `H / D_i` whole deadline windows into the horizon. The core is
//! accepted iff the accumulated demand stays inside the horizon:
//!
//! $$\sum_{i} \left\lfloor \frac{H}{D_i} \right\rfloor \cdot C_i \leq H$$
//!
//! which is the density condition `Σ C_i / D_i ≤ 1` evaluated in exact
//! integer arithmetic. Demand is deliberately measured in reference-core
//! units — the core's speed factor enters the laxity objective, not the
//! admissibility test.
//!
//! All checks are deterministic and side-effect free; this is the sole
//! admissibility predicate used by the solution generator and the annealing
//! driver.

use crate::horizon::{deadline_horizon, HorizonError};
use crate::model::SystemModel;
use crate::solution::Solution;

/// True iff every `(mcp_index, core_index)` pair in the platform has at least
/// one task bound to it. Empty and partial assignments always fail — this is
/// the loop guard during initial-solution generation.
pub fn is_structurally_complete(model: &SystemModel, solution: &Solution) -> bool {
    model.mcps().iter().enumerate().all(|(mcp_index, mcp)| {
        (0..mcp.cores.len()).all(|core_index| solution.targets_core(mcp_index, core_index))
    })
}

/// Deadline test for the tasks bound to exactly `(mcp_index, core_index)`.
///
/// An empty task set is vacuously schedulable (structural completeness
/// excludes that case separately). Binding ids with no matching task in the
/// model cannot occur for solutions built against the same model; they are
/// skipped under a debug assertion.
///
/// # Errors
/// [`HorizonError::Overflow`] if the LCM of the bound deadlines exceeds
/// `u64`.
pub fn core_deadline_ok(
    model: &SystemModel,
    mcp_index: usize,
    core_index: usize,
    solution: &Solution,
) -> Result<bool, HorizonError> {
    let tasks: Vec<_> = solution
        .tasks_on_core(mcp_index, core_index)
        .filter_map(|id| {
            let task = model.task(id);
            debug_assert!(task.is_some(), "binding references unknown task {id}");
            task
        })
        .collect();

    if tasks.is_empty() {
        return Ok(true);
    }

    let deadlines: Vec<u64> = tasks.iter().map(|t| t.deadline).collect();
    let horizon = deadline_horizon(&deadlines)?;

    // u128 so the windows × WCET products cannot overflow even for horizons
    // near u64::MAX.
    let demand: u128 = tasks
        .iter()
        .map(|t| (horizon / t.deadline) as u128 * t.wcet as u128)
        .sum();

    Ok(demand <= horizon as u128)
}

/// Deadline test over every core in the platform.
///
/// Used by the annealing driver, which guarantees structural completeness
/// through the move operators and only needs the schedulability half of the
/// predicate re-checked.
pub fn deadline_ok_everywhere(
    model: &SystemModel,
    solution: &Solution,
) -> Result<bool, HorizonError> {
    for (mcp_index, mcp) in model.mcps().iter().enumerate() {
        for core_index in 0..mcp.cores.len() {
            if !core_deadline_ok(model, mcp_index, core_index, solution)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// The full admissibility predicate: structurally complete AND every core
/// passes the deadline test.
pub fn is_feasible(model: &SystemModel, solution: &Solution) -> Result<bool, HorizonError> {
    if !is_structurally_complete(model, solution) {
        return Ok(false);
    }
    deadline_ok_everywhere(model, solution)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

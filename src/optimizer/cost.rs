//! Laxity: the optimization objective.
//!
//! Total laxity of an assignment is the aggregate slack between deadlines and
//! scaled execution demand:
//!
//! `laxity = Σ deadlines − Σ (wcet_factor of bound core × task WCET)`
//!
//! The deadline sum is cached in the [`SystemModel`] at load time; only the
//! demand term is recomputed per evaluation. Higher laxity is better — the
//! annealing driver maximizes this value.

use crate::model::SystemModel;
use crate::solution::Solution;

/// Total laxity of `solution` on `model`.
///
/// Bindings whose task id or core address fall outside the model cannot occur
/// for solutions built against the same model; they are skipped under a debug
/// assertion and contribute no demand.
pub fn laxity(model: &SystemModel, solution: &Solution) -> f64 {
    let demand: f64 = solution
        .bindings()
        .iter()
        .filter_map(|b| {
            let task = model.task(b.task_id);
            let core = model.core(b.mcp_index, b.core_index);
            debug_assert!(
                task.is_some() && core.is_some(),
                "binding ({}, {}, {}) does not resolve against the model",
                b.task_id,
                b.mcp_index,
                b.core_index
            );
            Some(task?.scaled_wcet(core?))
        })
        .sum();

    model.total_deadline() as f64 - demand
}

// ── Tests ─────────────────────────────────────────────────────────────────────

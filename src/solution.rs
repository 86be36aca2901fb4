/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Assignment of tasks to cores.
//!
//! A [`Solution`] is a sequence of [`Binding`]s, one per task. Solutions are
//! never mutated in place: the neighborhood operators derive a fresh copy via
//! [`Solution::with_swapped_tasks`] / [`Solution::with_rebound`] and the
//! annealing driver replaces its current solution wholesale on acceptance.

use crate::model::TaskId;

// ── Binding ───────────────────────────────────────────────────────────────────

/// One task bound to one core, addressed by `(mcp_index, core_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Task being placed.
    pub task_id: TaskId,

    /// Index of the owning MCP in platform order.
    pub mcp_index: usize,

    /// Index of the core within that MCP.
    pub core_index: usize,
}

// ── Solution ──────────────────────────────────────────────────────────────────

/// A complete task→core assignment: exactly one binding per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    bindings: Vec<Binding>,
}

impl Solution {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    /// An assignment with no bindings. Never structurally complete on a
    /// platform with at least one core.
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// True if at least one binding targets `(mcp_index, core_index)`.
    pub fn targets_core(&self, mcp_index: usize, core_index: usize) -> bool {
        self.bindings
            .iter()
            .any(|b| b.mcp_index == mcp_index && b.core_index == core_index)
    }

    /// Ids of the tasks bound to exactly `(mcp_index, core_index)`.
    ///
    /// The filter matches on both indices — a binding on core 0 of another
    /// MCP never leaks into the result.
    pub fn tasks_on_core(
        &self,
        mcp_index: usize,
        core_index: usize,
    ) -> impl Iterator<Item = TaskId> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.mcp_index == mcp_index && b.core_index == core_index)
            .map(|b| b.task_id)
    }

    /// Copy of this solution with the task ids of slots `i` and `j`
    /// exchanged. The `(mcp, core)` targets of both slots stay fixed, so the
    /// set of targeted cores is untouched. `i == j` yields an identical copy.
    pub fn with_swapped_tasks(&self, i: usize, j: usize) -> Self {
        let mut bindings = self.bindings.clone();
        let task_i = bindings[i].task_id;
        bindings[i].task_id = bindings[j].task_id;
        bindings[j].task_id = task_i;
        Self { bindings }
    }

    /// Copy of this solution with slot `slot` rebound to
    /// `(mcp_index, core_index)`. May leave the slot's previous core without
    /// any task — the caller re-checks structural completeness.
    pub fn with_rebound(&self, slot: usize, mcp_index: usize, core_index: usize) -> Self {
        let mut bindings = self.bindings.clone();
        bindings[slot].mcp_index = mcp_index;
        bindings[slot].core_index = core_index;
        Self { bindings }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(task_id: TaskId, mcp_index: usize, core_index: usize) -> Binding {
        Binding {
            task_id,
            mcp_index,
            core_index,
        }
    }

    fn two_core_solution() -> Solution {
        Solution::new(vec![binding(0, 0, 0), binding(1, 0, 1)])
    }

    #[test]
    fn targets_core_matches_exact_pair() {
        let sol = two_core_solution();
        assert!(sol.targets_core(0, 0));
        assert!(sol.targets_core(0, 1));
        assert!(!sol.targets_core(1, 0));
    }

    #[test]
    fn tasks_on_core_filters_on_both_indices() {
        // Task 2 sits on core 0 of MCP 1 — it must not show up for (0, 0).
        let sol = Solution::new(vec![binding(0, 0, 0), binding(1, 0, 1), binding(2, 1, 0)]);
        let on_first: Vec<TaskId> = sol.tasks_on_core(0, 0).collect();
        assert_eq!(on_first, vec![0]);
        let on_other_mcp: Vec<TaskId> = sol.tasks_on_core(1, 0).collect();
        assert_eq!(on_other_mcp, vec![2]);
    }

    #[test]
    fn swap_exchanges_only_task_ids() {
        let sol = two_core_solution();
        let swapped = sol.with_swapped_tasks(0, 1);
        assert_eq!(swapped.bindings()[0], binding(1, 0, 0));
        assert_eq!(swapped.bindings()[1], binding(0, 0, 1));
        // the source solution is untouched
        assert_eq!(sol.bindings()[0], binding(0, 0, 0));
    }

    #[test]
    fn swap_with_same_slot_is_identity() {
        let sol = two_core_solution();
        assert_eq!(sol.with_swapped_tasks(1, 1), sol);
    }

    #[test]
    fn rebound_moves_single_slot() {
        let sol = two_core_solution();
        let moved = sol.with_rebound(0, 1, 3);
        assert_eq!(moved.bindings()[0], binding(0, 1, 3));
        assert_eq!(moved.bindings()[1], sol.bindings()[1]);
    }

    #[test]
    fn empty_solution_targets_nothing() {
        assert!(!Solution::empty().targets_core(0, 0));
    }
}

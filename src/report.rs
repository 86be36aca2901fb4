/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Mapping report: the wire-ready view of a finished assignment.
//!
//! Produced from a [`Solution`] once the optimizer is done. Each row resolves
//! the binding's indices back to MCP/core ids and carries the worst-case
//! response time on the chosen core; rows are sorted by (MCP index, core
//! index) with task id as the tie-breaker so the output is deterministic.

use serde::Serialize;

use crate::model::{SystemModel, TimeUnit};
use crate::optimizer::cost;
use crate::solution::Solution;

// ── Report rows ───────────────────────────────────────────────────────────────

/// One task placement in the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMapping {
    /// Task id.
    pub task_id: u32,

    /// Id of the MCP the task was placed on.
    pub mcp_id: u32,

    /// Id of the core within that MCP.
    pub core_id: u32,

    /// Worst-case response time on the chosen core:
    /// `round(wcet × wcet_factor)`.
    pub wcrt: TimeUnit,
}

/// The complete run result handed to the output file.
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    /// Total laxity of the reported assignment.
    pub total_laxity: f64,

    /// Placements sorted by (MCP, core, task id).
    pub mappings: Vec<TaskMapping>,
}

impl MappingReport {
    /// Resolve `solution` against `model` into a sorted report.
    ///
    /// Bindings that do not resolve against the model cannot occur for
    /// solutions the optimizer produced from the same model; they are
    /// skipped under a debug assertion.
    pub fn from_solution(model: &SystemModel, solution: &Solution) -> Self {
        let mut rows: Vec<(usize, usize, TaskMapping)> = solution
            .bindings()
            .iter()
            .filter_map(|b| {
                let task = model.task(b.task_id);
                let mcp = model.mcps().get(b.mcp_index);
                let core = model.core(b.mcp_index, b.core_index);
                debug_assert!(
                    task.is_some() && core.is_some(),
                    "binding ({}, {}, {}) does not resolve against the model",
                    b.task_id,
                    b.mcp_index,
                    b.core_index
                );
                let (task, mcp, core) = (task?, mcp?, core?);
                Some((
                    b.mcp_index,
                    b.core_index,
                    TaskMapping {
                        task_id: task.id,
                        mcp_id: mcp.id,
                        core_id: core.id,
                        wcrt: task.wcrt(core),
                    },
                ))
            })
            .collect();

        rows.sort_by_key(|(mcp_index, core_index, m)| (*mcp_index, *core_index, m.task_id));

        Self {
            total_laxity: cost::laxity(model, solution),
            mappings: rows.into_iter().map(|(_, _, m)| m).collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Core, Mcp, Task};
    use crate::solution::Binding;

    fn binding(task_id: u32, mcp_index: usize, core_index: usize) -> Binding {
        Binding {
            task_id,
            mcp_index,
            core_index,
        }
    }

    fn model() -> SystemModel {
        SystemModel::new(
            vec![
                Task::new(0, 10, 10, 4),
                Task::new(1, 10, 10, 2),
                Task::new(2, 20, 20, 3),
            ],
            vec![
                Mcp {
                    id: 10,
                    cores: vec![
                        Core {
                            id: 0,
                            wcet_factor: 1.0,
                        },
                        Core {
                            id: 1,
                            wcet_factor: 1.5,
                        },
                    ],
                },
                Mcp {
                    id: 20,
                    cores: vec![Core {
                        id: 0,
                        wcet_factor: 2.0,
                    }],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn rows_are_sorted_by_mcp_then_core() {
        let model = model();
        // Bindings deliberately out of order.
        let sol = Solution::new(vec![binding(2, 1, 0), binding(1, 0, 1), binding(0, 0, 0)]);
        let report = MappingReport::from_solution(&model, &sol);

        let order: Vec<(u32, u32, u32)> = report
            .mappings
            .iter()
            .map(|m| (m.mcp_id, m.core_id, m.task_id))
            .collect();
        assert_eq!(order, vec![(10, 0, 0), (10, 1, 1), (20, 0, 2)]);
    }

    #[test]
    fn wcrt_is_rounded_scaled_wcet() {
        let model = model();
        let sol = Solution::new(vec![binding(0, 0, 0), binding(1, 0, 1), binding(2, 1, 0)]);
        let report = MappingReport::from_solution(&model, &sol);

        // 4 × 1.0 = 4; 2 × 1.5 = 3; 3 × 2.0 = 6.
        assert_eq!(report.mappings[0].wcrt, 4);
        assert_eq!(report.mappings[1].wcrt, 3);
        assert_eq!(report.mappings[2].wcrt, 6);
    }

    #[test]
    fn total_laxity_matches_cost_function() {
        let model = model();
        let sol = Solution::new(vec![binding(0, 0, 0), binding(1, 0, 1), binding(2, 1, 0)]);
        let report = MappingReport::from_solution(&model, &sol);
        assert_eq!(report.total_laxity, cost::laxity(&model, &sol));
        // Σ deadlines = 40; demand = 4 + 3 + 6 = 13.
        assert_eq!(report.total_laxity, 27.0);
    }

    #[test]
    fn report_serializes_to_yaml() {
        let model = model();
        let sol = Solution::new(vec![binding(0, 0, 0), binding(1, 0, 1), binding(2, 1, 0)]);
        let report = MappingReport::from_solution(&model, &sol);
        let yaml = serde_yaml::to_string(&report).unwrap();
        assert!(yaml.contains("total_laxity"));
        assert!(yaml.contains("task_id: 0"));
    }
}

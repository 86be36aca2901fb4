//! Neighborhood move operators for the annealing search.
//!
//! Two move kinds perturb a solution, always by producing a fresh copy:
//!
//! * **Swap** — exchange the task ids of two random binding slots. The
//!   targeted core set is untouched, so structural completeness is preserved
//!   unconditionally.
//! * **Relocate** — rebind one random task to a random core. This can strand
//!   a core without tasks, so the draw is retried up to a budget and falls
//!   back to Swap when the budget runs out.
//!
//! Neither operator re-checks the deadline test; the annealing driver does
//! that on the candidate it receives.

use rand::Rng;

use crate::model::SystemModel;
use crate::optimizer::feasibility;
use crate::solution::Solution;

/// Exchange the task ids of two uniformly drawn slots (with replacement —
/// drawing the same slot twice is an accepted no-op).
pub fn swap<R: Rng>(solution: &Solution, rng: &mut R) -> Solution {
    let n = solution.len();
    let i = rng.gen_range(0..n);
    let j = rng.gen_range(0..n);
    solution.with_swapped_tasks(i, j)
}

/// Rebind one uniformly drawn task to a uniformly drawn `(mcp, core)`
/// destination (two-level draw: MCP first, then a core within it).
///
/// Retries with fresh draws up to `retry_budget` times if the result is not
/// structurally complete; on exhaustion falls back to [`swap`], which cannot
/// break completeness, so the move always terminates with a complete
/// solution when the input was complete.
pub fn relocate<R: Rng>(
    model: &SystemModel,
    solution: &Solution,
    retry_budget: u32,
    rng: &mut R,
) -> Solution {
    for _ in 0..retry_budget {
        let slot = rng.gen_range(0..solution.len());
        let mcp_index = rng.gen_range(0..model.mcps().len());
        let core_index = rng.gen_range(0..model.mcps()[mcp_index].cores.len());

        let candidate = solution.with_rebound(slot, mcp_index, core_index);
        if feasibility::is_structurally_complete(model, &candidate) {
            return candidate;
        }
    }

    swap(solution, rng)
}

/// Produce the next candidate: even iterations Relocate, odd iterations Swap.
///
/// The alternation is deterministic by iteration parity; only the content of
/// each move is random.
pub fn select_neighbor<R: Rng>(
    model: &SystemModel,
    iteration: u64,
    solution: &Solution,
    retry_budget: u32,
    rng: &mut R,
) -> Solution {
    if iteration % 2 == 0 {
        relocate(model, solution, retry_budget, rng)
    } else {
        swap(solution, rng)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Laxity-driven simulated annealing over task→core assignments.
//!
//! [`Annealer`] owns the whole search: it draws a feasible initial
//! assignment, then runs a Metropolis cooling loop that perturbs the current
//! solution through the neighborhood operators, re-checks schedulability, and
//! conditionally accepts each candidate until the temperature decays to the
//! configured floor.
//!
//! | Topic | Behavior |
//! |---|---|
//! | Objective | Total laxity, maximized (`cost::laxity`) |
//! | Admissibility | `feasibility::is_feasible` — the single predicate everywhere |
//! | Moves | Relocate on even iterations, Swap on odd (`neighbor::select_neighbor`) |
//! | Acceptance | `delta = current − candidate`; always if `delta < 0`, else `exp(-delta/T) ≥ p` |
//! | Termination | `T` decays geometrically; loop ends when `T` reaches the floor |
//! | Randomness | Injected `rand::Rng` — seeded runs are fully reproducible |
//! | Retry bounds | Draw budgets in [`AnnealConfig`]; exhaustion is a typed error |
//!
//! # Example
//! ```rust,ignore
//! let mut annealer = Annealer::new(&model, AnnealConfig::default(), rng)?;
//! let outcome = annealer.run()?;
//! println!("best laxity: {}", outcome.best_laxity);
//! ```

pub mod cost;
pub mod error;
pub mod feasibility;
pub mod neighbor;

pub use error::OptimizerError;

use rand::Rng;
use tracing::{debug, info};

use crate::model::SystemModel;
use crate::solution::{Binding, Solution};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Tunable parameters of the annealing run.
///
/// All fields have documented defaults; the CLI exposes overrides for the
/// temperature schedule.
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Starting temperature. Default `100.0` — high enough that early
    /// cost-increasing moves are accepted freely.
    pub initial_temperature: f64,

    /// Geometric cooling factor applied once per iteration, in `(0, 1)`.
    /// Default `0.95`.
    pub cooling_factor: f64,

    /// The run ends when the temperature decays to this floor.
    /// Default `0.01`.
    pub temperature_floor: f64,

    /// How many fresh draws a Relocate move may attempt before falling back
    /// to Swap. Default `50`.
    pub relocation_retries: u32,

    /// Budget of full random draws for the initial solution; exhaustion
    /// yields [`OptimizerError::InitialDrawsExhausted`]. Default `10_000`.
    pub max_initial_draws: u64,

    /// Budget of candidate regenerations per iteration; exhaustion yields
    /// [`OptimizerError::CandidateDrawsExhausted`]. Default `10_000`.
    pub max_candidate_draws: u64,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_factor: 0.95,
            temperature_floor: 0.01,
            relocation_retries: 50,
            max_initial_draws: 10_000,
            max_candidate_draws: 10_000,
        }
    }
}

impl AnnealConfig {
    /// Reject schedules that cannot terminate or make no sense.
    fn validate(&self) -> Result<(), OptimizerError> {
        if !(self.initial_temperature > 0.0) {
            return Err(OptimizerError::InvalidInitialTemperature(
                self.initial_temperature,
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(OptimizerError::InvalidCoolingFactor(self.cooling_factor));
        }
        if !(self.temperature_floor > 0.0) {
            return Err(OptimizerError::InvalidTemperatureFloor(
                self.temperature_floor,
            ));
        }
        Ok(())
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Result of one annealing run.
///
/// `solution` is the current solution at loop exit — the classic annealing
/// result, which may be worse than an intermediate optimum. `best_solution`
/// records the highest-laxity solution accepted at any point of the run; the
/// tracking is an observer only and never alters the search trajectory.
#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    /// Current solution when the temperature reached the floor.
    pub solution: Solution,

    /// Laxity of `solution`.
    pub laxity: f64,

    /// Best solution accepted across the whole run.
    pub best_solution: Solution,

    /// Laxity of `best_solution`.
    pub best_laxity: f64,

    /// Number of cooling iterations executed.
    pub iterations: u64,

    /// Number of accepted candidates (including Metropolis acceptances of
    /// worse solutions).
    pub accepted: u64,
}

// ── Annealer ──────────────────────────────────────────────────────────────────

/// The annealing driver.
///
/// Borrows the immutable [`SystemModel`] and owns the random generator; all
/// per-run state (current solution, temperature) is local to [`run`], so one
/// `Annealer` can execute several runs back to back.
///
/// [`run`]: Annealer::run
pub struct Annealer<'m, R: Rng> {
    model: &'m SystemModel,
    config: AnnealConfig,
    rng: R,
}

impl<'m, R: Rng> Annealer<'m, R> {
    /// Create an annealer over `model` with the given parameters.
    ///
    /// # Errors
    /// Returns a config-validation variant of [`OptimizerError`] when the
    /// temperature schedule cannot terminate.
    pub fn new(model: &'m SystemModel, config: AnnealConfig, rng: R) -> Result<Self, OptimizerError> {
        config.validate()?;
        Ok(Self { model, config, rng })
    }

    // ── Initial solution ──────────────────────────────────────────────────────

    /// Draw a feasible initial assignment by pure reject-and-retry: bind
    /// every task to a uniformly random `(mcp, core)`, test the full draw
    /// with `is_feasible`, and redraw from scratch on failure.
    ///
    /// The redraw-everything design trades efficiency for simplicity; for
    /// the platform sizes this tool targets, rejected draws are cheap.
    ///
    /// # Errors
    /// [`OptimizerError::InitialDrawsExhausted`] after `max_initial_draws`
    /// rejected draws — the instance most likely admits no feasible
    /// assignment.
    pub fn initial_solution(&mut self) -> Result<Solution, OptimizerError> {
        for attempt in 1..=self.config.max_initial_draws {
            let candidate = self.random_draw();
            if feasibility::is_feasible(self.model, &candidate)? {
                info!(
                    attempt,
                    laxity = cost::laxity(self.model, &candidate),
                    "initial solution found"
                );
                return Ok(candidate);
            }
        }

        Err(OptimizerError::InitialDrawsExhausted {
            attempts: self.config.max_initial_draws,
        })
    }

    /// One full random draw: every task bound to a random MCP, then a random
    /// core within it.
    fn random_draw(&mut self) -> Solution {
        let model = self.model;
        let rng = &mut self.rng;

        let bindings: Vec<Binding> = model
            .tasks()
            .iter()
            .map(|task| {
                let mcp_index = rng.gen_range(0..model.mcps().len());
                let core_index = rng.gen_range(0..model.mcps()[mcp_index].cores.len());
                Binding {
                    task_id: task.id,
                    mcp_index,
                    core_index,
                }
            })
            .collect();

        Solution::new(bindings)
    }

    // ── Cooling loop ──────────────────────────────────────────────────────────

    /// Execute the full annealing run and return the outcome.
    ///
    /// # Errors
    /// Propagates draw-budget exhaustion and horizon overflow; neither
    /// occurs on instances that admit feasible solutions with sane timing
    /// values.
    pub fn run(&mut self) -> Result<AnnealOutcome, OptimizerError> {
        let mut current = self.initial_solution()?;
        let mut current_laxity = cost::laxity(self.model, &current);

        let mut best = current.clone();
        let mut best_laxity = current_laxity;

        let mut temperature = self.config.initial_temperature;
        let mut iteration: u64 = 0;
        let mut accepted: u64 = 0;

        while temperature > self.config.temperature_floor {
            iteration += 1;

            let candidate = self.feasible_candidate(iteration, &current)?;
            let candidate_laxity = cost::laxity(self.model, &candidate);

            // Higher laxity is better: delta < 0 means the candidate improves
            // on the current solution.
            let delta = current_laxity - candidate_laxity;
            let accept = if delta < 0.0 {
                true
            } else {
                let p: f64 = self.rng.gen();
                (-delta / temperature).exp() >= p
            };

            if accept {
                current = candidate;
                current_laxity = candidate_laxity;
                accepted += 1;

                if current_laxity > best_laxity {
                    best = current.clone();
                    best_laxity = current_laxity;
                    debug!(iteration, temperature, laxity = best_laxity, "new best");
                }
            }

            temperature *= self.config.cooling_factor;
        }

        info!(
            iterations = iteration,
            accepted,
            final_laxity = current_laxity,
            best_laxity,
            "annealing complete"
        );

        Ok(AnnealOutcome {
            solution: current,
            laxity: current_laxity,
            best_solution: best,
            best_laxity,
            iterations: iteration,
            accepted,
        })
    }

    /// Generate neighbors of `current` until one passes the deadline test.
    ///
    /// Structural completeness is already guaranteed by the move operators;
    /// this retry layer exists purely for the per-core schedulability check.
    fn feasible_candidate(
        &mut self,
        iteration: u64,
        current: &Solution,
    ) -> Result<Solution, OptimizerError> {
        let model = self.model;
        let retries = self.config.relocation_retries;

        for _ in 0..self.config.max_candidate_draws {
            let candidate =
                neighbor::select_neighbor(model, iteration, current, retries, &mut self.rng);
            if feasibility::deadline_ok_everywhere(model, &candidate)? {
                return Ok(candidate);
            }
        }

        Err(OptimizerError::CandidateDrawsExhausted {
            iteration,
            attempts: self.config.max_candidate_draws,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Core, Mcp, Task};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn mcp(id: u32, factors: &[f64]) -> Mcp {
        Mcp {
            id,
            cores: factors
                .iter()
                .enumerate()
                .map(|(i, &f)| Core {
                    id: i as u32,
                    wcet_factor: f,
                })
                .collect(),
        }
    }

    /// 1 MCP, 2 cores (factors 1.0 / 2.0); tasks C = 4 and C = 2, D = P = 10.
    fn reference_model() -> SystemModel {
        SystemModel::new(
            vec![Task::new(0, 10, 10, 4), Task::new(1, 10, 10, 2)],
            vec![mcp(0, &[1.0, 2.0])],
        )
        .unwrap()
    }

    fn annealer(model: &SystemModel, seed: u64) -> Annealer<'_, SmallRng> {
        Annealer::new(model, AnnealConfig::default(), SmallRng::seed_from_u64(seed)).unwrap()
    }

    // ── Config validation ─────────────────────────────────────────────────────

    #[test]
    fn cooling_factor_of_one_is_rejected() {
        let model = reference_model();
        let config = AnnealConfig {
            cooling_factor: 1.0,
            ..Default::default()
        };
        let err = Annealer::new(&model, config, SmallRng::seed_from_u64(0)).err();
        assert!(matches!(
            err,
            Some(OptimizerError::InvalidCoolingFactor(_))
        ));
    }

    #[test]
    fn zero_initial_temperature_is_rejected() {
        let model = reference_model();
        let config = AnnealConfig {
            initial_temperature: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Annealer::new(&model, config, SmallRng::seed_from_u64(0)).err(),
            Some(OptimizerError::InvalidInitialTemperature(_))
        ));
    }

    #[test]
    fn zero_temperature_floor_is_rejected() {
        let model = reference_model();
        let config = AnnealConfig {
            temperature_floor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Annealer::new(&model, config, SmallRng::seed_from_u64(0)).err(),
            Some(OptimizerError::InvalidTemperatureFloor(_))
        ));
    }

    // ── Initial solution ──────────────────────────────────────────────────────

    #[test]
    fn initial_solution_is_always_feasible() {
        let model = reference_model();
        for seed in 0..20 {
            let mut a = annealer(&model, seed);
            let sol = a.initial_solution().unwrap();
            assert!(feasibility::is_feasible(&model, &sol).unwrap());
        }
    }

    #[test]
    fn single_core_platform_binds_everything_to_that_core() {
        // The first draw has only one possible target, so the generator must
        // succeed immediately.
        let model = SystemModel::new(
            vec![
                Task::new(0, 100, 100, 5),
                Task::new(1, 100, 100, 5),
                Task::new(2, 100, 100, 5),
            ],
            vec![mcp(0, &[1.0])],
        )
        .unwrap();
        let mut a = annealer(&model, 1);
        let sol = a.initial_solution().unwrap();
        assert!(sol
            .bindings()
            .iter()
            .all(|b| b.mcp_index == 0 && b.core_index == 0));
    }

    #[test]
    fn structurally_impossible_instance_exhausts_draw_budget() {
        // One task, two cores: no assignment can cover both cores.
        let model = SystemModel::new(
            vec![Task::new(0, 10, 10, 1)],
            vec![mcp(0, &[1.0, 1.0])],
        )
        .unwrap();
        let config = AnnealConfig {
            max_initial_draws: 25,
            ..Default::default()
        };
        let mut a =
            Annealer::new(&model, config, SmallRng::seed_from_u64(3)).unwrap();
        let err = a.initial_solution().unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::InitialDrawsExhausted { attempts: 25 }
        ));
    }

    // ── Cooling loop ──────────────────────────────────────────────────────────

    #[test]
    fn run_terminates_and_returns_feasible_solutions() {
        let model = reference_model();
        let mut a = annealer(&model, 42);
        let outcome = a.run().unwrap();

        assert!(outcome.iterations > 0);
        assert!(feasibility::is_feasible(&model, &outcome.solution).unwrap());
        assert!(feasibility::is_feasible(&model, &outcome.best_solution).unwrap());
        // Both pairings of the reference model score 10 or 12.
        assert!(outcome.best_laxity >= 10.0);
        assert!(outcome.best_laxity >= outcome.laxity);
    }

    #[test]
    fn iteration_count_follows_the_temperature_schedule() {
        // Powers of two keep the decay float-exact: 1.0 → 0.5 → … → 0.03125,
        // five iterations run before the temperature reaches 0.06.
        let model = reference_model();
        let config = AnnealConfig {
            initial_temperature: 1.0,
            cooling_factor: 0.5,
            temperature_floor: 0.06,
            ..Default::default()
        };
        let mut a = Annealer::new(&model, config, SmallRng::seed_from_u64(9)).unwrap();
        let outcome = a.run().unwrap();
        assert_eq!(outcome.iterations, 5);
    }

    #[test]
    fn floor_above_initial_temperature_skips_the_loop() {
        let model = reference_model();
        let config = AnnealConfig {
            initial_temperature: 0.05,
            temperature_floor: 0.1,
            ..Default::default()
        };
        let mut a = Annealer::new(&model, config, SmallRng::seed_from_u64(4)).unwrap();
        let outcome = a.run().unwrap();
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.accepted, 0);
        // With zero iterations, current and best are the initial draw.
        assert_eq!(outcome.solution, outcome.best_solution);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let model = reference_model();
        let first = annealer(&model, 1234).run().unwrap();
        let second = annealer(&model, 1234).run().unwrap();
        assert_eq!(first.solution, second.solution);
        assert_eq!(first.best_solution, second.best_solution);
        assert_eq!(first.accepted, second.accepted);
    }

    #[test]
    fn best_tracking_never_loses_to_the_final_state() {
        let model = SystemModel::new(
            vec![
                Task::new(0, 40, 40, 8),
                Task::new(1, 40, 40, 4),
                Task::new(2, 40, 40, 2),
                Task::new(3, 40, 40, 1),
            ],
            vec![mcp(0, &[1.0, 1.5]), mcp(1, &[2.0, 3.0])],
        )
        .unwrap();
        for seed in [7u64, 21, 99] {
            let outcome = annealer(&model, seed).run().unwrap();
            assert!(outcome.best_laxity >= outcome.laxity);
        }
    }
}

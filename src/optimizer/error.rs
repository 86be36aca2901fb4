/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the annealing optimizer.
//!
//! Infeasible random draws are recovered locally by discard-and-retry and
//! never surface here. What does surface is the boundary of that recovery:
//! an exhausted draw budget means the problem instance most likely admits no
//! feasible assignment at all, and the caller gets a typed error instead of
//! a run that spins forever.

use thiserror::Error;

use crate::horizon::HorizonError;

/// Top-level error type returned by the optimizer entry points.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// The initial-solution generator exhausted its draw budget without
    /// producing a feasible assignment.
    ///
    /// Either the platform/task combination admits no feasible solution, or
    /// feasible draws are so rare that `max_initial_draws` should be raised.
    #[error("no feasible initial assignment after {attempts} random draws")]
    InitialDrawsExhausted { attempts: u64 },

    /// The per-iteration candidate loop exhausted its attempt budget without
    /// a candidate that passes the deadline test.
    #[error("no feasible candidate at iteration {iteration} after {attempts} attempts")]
    CandidateDrawsExhausted { iteration: u64, attempts: u64 },

    /// LCM overflow while computing a core's deadline horizon.
    #[error("deadline horizon computation failed: {0}")]
    Horizon(#[from] HorizonError),

    /// `initial_temperature` must be positive.
    #[error("initial temperature must be positive, got {0}")]
    InvalidInitialTemperature(f64),

    /// `cooling_factor` must lie strictly between 0 and 1 — at 1.0 the loop
    /// never terminates, at 0 it degenerates to a single iteration.
    #[error("cooling factor must be in (0, 1), got {0}")]
    InvalidCoolingFactor(f64),

    /// `temperature_floor` must be positive; a zero floor never terminates
    /// under geometric cooling.
    #[error("temperature floor must be positive, got {0}")]
    InvalidTemperatureFloor(f64),
}

/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Marimba – MCP task-mapping optimizer
//!
//! Maps periodic real-time tasks onto the cores of a heterogeneous
//! multi-MCP platform and refines the mapping with laxity-driven simulated
//! annealing.
//!
//! ```text
//! lib.rs
//! ├── config/     – YAML system-model loading
//! ├── model       – tasks, cores, MCPs, validated SystemModel
//! ├── solution    – task→core bindings, copy-on-perturb
//! ├── horizon/    – LCM / GCD helpers, deadline horizon
//! ├── optimizer/  – feasibility test, laxity cost, moves, annealing driver
//! └── report      – sorted mapping report with per-task WCRT
//! ```

pub mod config;
pub mod horizon;
pub mod model;
pub mod optimizer;
pub mod report;
pub mod solution;

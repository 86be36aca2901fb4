//! System-model loading.
//!
//! Reads the YAML description of the application (tasks) and the platform
//! (MCPs with their cores), validates it, and hands the optimizer an
//! immutable [`SystemModel`]. The expected structure is:
//!
//! ```yaml
//! application:
//!   tasks:
//!     - { id: 0, period: 100, deadline: 100, wcet: 20 }
//!     - { id: 1, period: 200, deadline: 150, wcet: 40 }
//! platform:
//!   mcps:
//!     - id: 0
//!       cores:
//!         - { id: 0, wcet_factor: 1.0 }
//!         - { id: 1, wcet_factor: 2.5 }
//! ```
//!
//! Any I/O, parse, or validation failure is a hard error — the optimizer
//! never runs against a partial or invalid model.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::model::{Core, Mcp, SystemModel, Task};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private – callers work with [`SystemModel`] instead.
#[derive(Debug, Deserialize)]
struct ModelFile {
    application: ApplicationSection,
    platform: PlatformSection,
}

#[derive(Debug, Deserialize)]
struct ApplicationSection {
    tasks: Vec<TaskEntry>,
}

#[derive(Debug, Deserialize)]
struct TaskEntry {
    id: u32,
    period: u64,
    deadline: u64,
    wcet: u64,
}

#[derive(Debug, Deserialize)]
struct PlatformSection {
    mcps: Vec<McpEntry>,
}

#[derive(Debug, Deserialize)]
struct McpEntry {
    id: u32,
    cores: Vec<CoreEntry>,
}

#[derive(Debug, Deserialize)]
struct CoreEntry {
    id: u32,
    wcet_factor: f64,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Parse `path` into a validated [`SystemModel`].
///
/// # Errors
/// Returns an error if the file cannot be opened, if the YAML is
/// structurally invalid, or if the model fails validation (empty sections,
/// duplicate task ids, zero timing values, non-positive core factors).
pub fn load_model(path: &Path) -> Result<SystemModel> {
    info!("Loading system model from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open model file: {}", path.display()))?;

    let file: ModelFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

    let tasks: Vec<Task> = file
        .application
        .tasks
        .iter()
        .map(|t| Task::new(t.id, t.period, t.deadline, t.wcet))
        .collect();

    let mcps: Vec<Mcp> = file
        .platform
        .mcps
        .into_iter()
        .map(|m| Mcp {
            id: m.id,
            cores: m
                .cores
                .into_iter()
                .map(|c| Core {
                    id: c.id,
                    wcet_factor: c.wcet_factor,
                })
                .collect(),
        })
        .collect();

    for task in &tasks {
        debug!(
            "  Task: {} | T={} D={} C={}",
            task.id, task.period, task.deadline, task.wcet
        );
    }
    for mcp in &mcps {
        debug!("  MCP: {} | cores: {}", mcp.id, mcp.cores.len());
    }

    let model = SystemModel::new(tasks, mcps)
        .with_context(|| format!("Model failed validation: {}", path.display()))?;

    info!(
        tasks = model.tasks().len(),
        mcps = model.mcps().len(),
        cores = model.core_count(),
        "System model loaded"
    );

    Ok(model)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

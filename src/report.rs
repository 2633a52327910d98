//! JSON resource map written alongside the generated files.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::emit::Allocation;
use crate::error::{ResError, Result};
use crate::transpile::TranspileOutcome;

/// Summary of one transpiler run.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceMap<'a> {
    pub input: String,
    pub declarations: usize,
    pub first_id: Option<u32>,
    pub last_id: Option<u32>,
    pub resources: &'a [Allocation],
}

impl<'a> ResourceMap<'a> {
    pub fn new(input: &Path, outcome: &'a TranspileOutcome) -> Self {
        Self {
            input: input.display().to_string(),
            declarations: outcome.declarations,
            first_id: outcome.allocations.first().map(|a| a.id),
            last_id: outcome.allocations.last().map(|a| a.id),
            resources: &outcome.allocations,
        }
    }
}

/// Write the resource map as pretty JSON.
pub fn write_report(map: &ResourceMap<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(map).map_err(|e| ResError::Output {
        path: path.to_path_buf(),
        message: format!("Failed to serialize report: {}", e),
        help: None,
    })?;

    fs::write(path, json + "\n").map_err(|e| ResError::Output {
        path: path.to_path_buf(),
        message: format!("Failed to write report: {}", e),
        help: None,
    })
}

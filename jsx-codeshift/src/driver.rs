//! Runs the engine over many files and persists the results.
//!
//! Files are independent: each is read, transformed and written on its own
//! rayon worker, and a failure in one never affects another.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::config::TransformConfig;
use crate::error::{Result, TransformError};
use crate::passes::PassReport;
use crate::transform_source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Nothing matched; the file was not written.
    Unchanged,
    Rewritten(PassReport),
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<FileStatus>,
}

/// Totals over a batch of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rewritten: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(outcomes: &[FileOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut s, o| {
            match o.result {
                Ok(FileStatus::Rewritten(_)) => s.rewritten += 1,
                Ok(FileStatus::Unchanged) => s.unchanged += 1,
                Err(_) => s.failed += 1,
            }
            s
        })
    }
}

/// Transforms one file in place. The file is only written when the
/// transform succeeded and changed something.
pub fn transform_file(path: &Path, config: &TransformConfig) -> Result<FileStatus> {
    let source = std::fs::read_to_string(path).map_err(|e| TransformError::io(path, e))?;
    let output = transform_source(&path.display().to_string(), &source, config)?;
    if !output.changed() {
        return Ok(FileStatus::Unchanged);
    }
    std::fs::write(path, &output.code).map_err(|e| TransformError::io(path, e))?;
    Ok(FileStatus::Rewritten(output.report))
}

/// Transforms `paths` in parallel. Outcomes come back in input order.
pub fn transform_files(paths: &[PathBuf], config: &TransformConfig) -> Vec<FileOutcome> {
    info!(count = paths.len(), "running codeshifts");
    let outcomes: Vec<FileOutcome> = paths
        .par_iter()
        .map(|path| {
            let result = transform_file(path, config);
            match &result {
                Ok(FileStatus::Rewritten(report)) => {
                    debug!(path = %path.display(), rewrites = report.rewrites(), "rewritten")
                }
                Ok(FileStatus::Unchanged) => debug!(path = %path.display(), "unchanged"),
                // The input parsed but cannot be rewritten safely.
                Err(e) if e.is_rewrite_error() => warn!(path = %path.display(), "left unchanged: {e}"),
                Err(e) => error!(path = %path.display(), "{e}"),
            }
            FileOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect();

    let summary = Summary::of(&outcomes);
    info!(
        rewritten = summary.rewritten,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "codeshifts complete"
    );
    outcomes
}

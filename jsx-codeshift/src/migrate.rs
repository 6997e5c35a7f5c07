//! File-tree steps around the transform: finding files, patching hard-coded
//! `.coffee` references, and deleting the CoffeeScript sources once their
//! JavaScript counterparts exist.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, TransformError};

static COFFEE_EXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.coffee").expect("valid regex"));

/// Lines mentioning this marker keep their `.coffee` reference.
const KEEP_MARKER: &str = "isCoffee";

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

pub fn is_coffee_file(path: &Path) -> bool {
    has_extension(path, "coffee")
}

pub fn is_js_file(path: &Path) -> bool {
    has_extension(path, "js")
}

/// Files whose text may reference `.coffee` modules.
pub fn is_patch_candidate(path: &Path) -> bool {
    is_coffee_file(path) || has_extension(path, "md")
}

/// Lists every file under `root`, sorted. A `root` that is itself a file is
/// returned on its own. With `skip_subdirectories` only the top level is read.
pub fn discover_files(root: &Path, skip_subdirectories: bool) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if skip_subdirectories {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            TransformError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered files");
    Ok(files)
}

/// Drops the first `.coffee` on every line that does not mention `isCoffee`.
pub fn patch_coffee_references(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.contains(KEEP_MARKER) {
                line.into()
            } else {
                COFFEE_EXT_RE.replace(line, "")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites `.coffee` references in every candidate file. Returns the number
/// of files whose text changed.
pub fn patch_files(files: &[PathBuf]) -> Result<usize> {
    let candidates: Vec<&PathBuf> = files.iter().filter(|p| is_patch_candidate(p)).collect();
    info!(count = candidates.len(), "patching .coffee references");

    let mut patched = 0;
    for path in candidates {
        let text = std::fs::read_to_string(path).map_err(|e| TransformError::io(path, e))?;
        let updated = patch_coffee_references(&text);
        if updated != text {
            std::fs::write(path, updated).map_err(|e| TransformError::io(path, e))?;
            patched += 1;
        }
    }
    info!(patched, "patching complete");
    Ok(patched)
}

/// Deletes every `.coffee` file in `files`. Returns how many were removed.
pub fn remove_coffee_files(files: &[PathBuf]) -> Result<usize> {
    let coffee: Vec<&PathBuf> = files.iter().filter(|p| is_coffee_file(p)).collect();
    info!(count = coffee.len(), "removing .coffee files");
    for path in &coffee {
        std::fs::remove_file(path).map_err(|e| TransformError::io(*path, e))?;
    }
    Ok(coffee.len())
}

//! External checker sources.
//!
//! A user-supplied path is either a single definition file (`.yml`/`.yaml`)
//! or a directory that is scanned recursively for definition files. Any
//! other path, including one that does not exist, is rejected.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::definition::CheckerFile;
use super::{Checker, CheckerOrigin};
use crate::error::{Result, RulebookError};

/// Whether `path` names a checker definition file by extension.
pub fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

/// Resolve an external path into the definition files it stands for.
pub fn expand_path(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files = Vec::new();
        collect_definitions(path, &mut files)?;
        files.sort();
        debug!(
            "Found {} checker file(s) in {}",
            files.len(),
            path.display()
        );
        return Ok(files);
    }

    if path.is_file() && is_definition_file(path) {
        return Ok(vec![path.to_path_buf()]);
    }

    let message = if path.exists() {
        "not a checker definition file (expected .yml or .yaml)"
    } else {
        "no such file or directory"
    };
    Err(load_error(path, message))
}

fn collect_definitions(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| load_error(dir, e))?;

    for entry in entries {
        let path = entry.map_err(|e| load_error(dir, e))?.path();
        if path.is_dir() {
            collect_definitions(&path, files)?;
        } else if is_definition_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Import the checkers declared in one definition file.
pub fn load_file(path: &Path) -> Result<Vec<Checker>> {
    let content = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
    let definition = CheckerFile::parse(&content).map_err(|e| load_error(path, e))?;
    let checkers = definition
        .into_checkers(&CheckerOrigin::External(path.to_path_buf()))
        .map_err(|e| RulebookError::ExternalRule {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    debug!(
        "Imported {} checker(s) from {}",
        checkers.len(),
        path.display()
    );
    Ok(checkers)
}

fn load_error(path: &Path, message: impl std::fmt::Display) -> RulebookError {
    RulebookError::InvalidExternalChecker {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

//! Built-in checkers embedded at compile time.

use std::path::Path;

use include_dir::{include_dir, Dir, File};
use tracing::debug;

use super::definition::CheckerFile;
use super::{Checker, CheckerOrigin};
use crate::error::{Result, RulebookError};

/// Embedded checker definitions.
static CHECKERS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/checkers");

/// Load all built-in checkers, ordered by definition file name.
pub fn load_checkers() -> Result<Vec<Checker>> {
    let mut files: Vec<&File<'_>> = CHECKERS_DIR
        .files()
        .filter(|f| is_definition(f.path()))
        .collect();
    files.sort_by(|a, b| a.path().cmp(b.path()));

    let mut checkers = Vec::new();
    for file in files {
        let path = Path::new("checkers").join(file.path());
        let content = file
            .contents_utf8()
            .ok_or_else(|| RulebookError::ConfigParseError {
                path: path.clone(),
                message: "Invalid UTF-8".to_string(),
            })?;

        let definition =
            CheckerFile::parse(content).map_err(|e| RulebookError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let loaded = definition.into_checkers(&CheckerOrigin::Builtin)?;
        debug!("Loaded {} built-in checker(s) from {}", loaded.len(), path.display());
        checkers.extend(loaded);
    }

    Ok(checkers)
}

fn is_definition(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

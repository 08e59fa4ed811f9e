//! Environment-driven layers: the environment-selected override file and the
//! variable-to-field table.
//!
//! Variable lookup goes through [`Input`] so tests can pass synthetic data
//! instead of `std::env::vars()`.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::file;
use crate::index::PathIndex;
use crate::overrides;
use crate::record::Target;
use crate::resolve::Input;
use crate::types::Layer;

/// Extensions tried for each candidate name, in order. The empty entry is the
/// bare name.
///
/// A bare name carries no recognized extension, so when it exists and is the
/// first hit, loading it fails with [`SettingsError::FileType`]. It is tried
/// last and is not skipped.
pub const CANDIDATE_EXTENSIONS: [&str; 4] = [".yml", ".yaml", ".json", ""];

/// Expand the file stem for environment `name` through `pattern`.
///
/// `%s` in the pattern is replaced by the name; with no pattern the name is
/// used as-is.
pub fn candidate_stem(pattern: Option<&str>, name: &str) -> String {
    match pattern {
        Some(p) => p.replace("%s", name),
        None => name.to_string(),
    }
}

/// Every candidate file for environment `name` in `dir`, in search order.
pub fn candidates(dir: &Path, pattern: Option<&str>, name: &str) -> Vec<PathBuf> {
    let stem = candidate_stem(pattern, name);
    CANDIDATE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}{ext}")))
        .collect()
}

/// Whether `path` names an existing regular file.
///
/// Misses (including directories) are `Ok(false)`; any other stat failure is
/// a read error.
fn is_present(path: &Path) -> Result<bool, SettingsError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(!meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SettingsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Search for and load at most one environment-selected override file.
///
/// Triggers are read in order; the first non-empty one names the environment.
/// The whole search ends at the first file loaded, so later triggers and
/// directories are never consulted after a hit. Returns the loaded path.
pub fn load_env_override<T: Target>(
    triggers: &[String],
    dirs: &[PathBuf],
    pattern: Option<&str>,
    input: &Input,
    target: &mut T,
) -> Result<Option<PathBuf>, SettingsError> {
    for trigger in triggers {
        let Some(name) = input.var(trigger).filter(|v| !v.is_empty()) else {
            continue;
        };

        for dir in dirs {
            for candidate in candidates(dir, pattern, name) {
                if !is_present(&candidate)? {
                    tracing::trace!(path = %candidate.display(), "no override file");
                    continue;
                }
                tracing::debug!(
                    trigger = %trigger,
                    env = name,
                    path = %candidate.display(),
                    "environment override file selected"
                );
                file::load_file(&candidate, target)?;
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}

/// Apply the variable table: each non-empty variable is coerced and written to
/// its mapped path.
pub fn apply_vars_map<T: Target>(
    vars_map: &BTreeMap<String, String>,
    input: &Input,
    index: &PathIndex,
    target: &mut T,
) -> Result<(), SettingsError> {
    overrides::ensure_known(Layer::Vars, vars_map.values(), index)?;

    for (name, path) in vars_map {
        if let Some(raw) = input.var(name).filter(|v| !v.is_empty()) {
            overrides::set_from_str(Layer::Vars, target, index, path, raw)?;
        }
    }
    Ok(())
}

//! Core gather pipeline: apply every layer to the target in fixed order.
//!
//! Process arguments and environment variables arrive through [`Input`], so the
//! full pipeline is testable with synthetic inputs. Steps:
//!
//! 1. Build the path index
//! 2. Load the base file, if one is configured
//! 3. Apply the defaults table
//! 4. Load files named by command-line triggers
//! 5. Load at most one environment-selected file
//! 6. Apply the switch table
//! 7. Apply the variable table
//!
//! The first failure stops the run. Layers already applied stay applied.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::args;
use crate::env;
use crate::error::SettingsError;
use crate::file;
use crate::index::PathIndex;
use crate::overrides;
use crate::record::Target;
use crate::types::{DefaultsTable, SearchPath};

/// Process arguments and environment variables, as seen by one gather.
#[derive(Debug, Clone, Default)]
pub struct Input {
    args: Vec<String>,
    vars: HashMap<String, String>,
}

impl Input {
    pub fn new(
        args: impl IntoIterator<Item = String>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            args: args.into_iter().collect(),
            vars: vars.into_iter().collect(),
        }
    }

    /// Snapshot of the live process arguments and environment.
    ///
    /// Arguments that are not valid unicode are converted lossily, so every
    /// switch keeps its position. Variables that are not valid unicode are
    /// left out.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::new(std::env::args_os().map(lossy_arg), vars)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Everything a gather needs besides the target and the process input.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub app_name: Option<String>,
    pub base_path: Option<PathBuf>,
    pub defaults: DefaultsTable,
    pub args_file_override: Vec<String>,
    pub env_override: Vec<String>,
    pub env_search_paths: Vec<SearchPath>,
    pub env_search_pattern: Option<String>,
    pub args_map: BTreeMap<String, String>,
    pub vars_map: BTreeMap<String, String>,
}

/// Run every layer against `target`.
pub fn gather<T: Target>(plan: &Plan, input: &Input, target: &mut T) -> Result<(), SettingsError> {
    let index = PathIndex::build(&*target)?;
    tracing::debug!(leaves = index.len(), "path index built");

    if let Some(base) = &plan.base_path {
        file::load_file(base, target)?;
    }

    overrides::apply_defaults(&plan.defaults, &index, target)?;

    args::load_file_overrides(&plan.args_file_override, input.args(), target)?;

    let dirs = file::expand_search_paths(&plan.env_search_paths, plan.app_name.as_deref());
    env::load_env_override(
        &plan.env_override,
        &dirs,
        plan.env_search_pattern.as_deref(),
        input,
        target,
    )?;

    args::apply_args_map(&plan.args_map, input.args(), &index, target)?;
    env::apply_vars_map(&plan.vars_map, input, &index, target)?;

    tracing::debug!("gather complete");
    Ok(())
}

fn lossy_arg(arg: OsString) -> String {
    arg.into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

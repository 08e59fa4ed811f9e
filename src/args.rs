//! Command-line scanning for file overrides and switch-mapped fields.
//!
//! Both `--switch value` and `--switch=value` are recognized. Values are
//! cleaned by [`clean_value`] before use.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SettingsError;
use crate::file;
use crate::index::PathIndex;
use crate::overrides;
use crate::record::Target;
use crate::types::Layer;

/// Strip a single leading `=`, then one matching pair of outer quotes.
pub fn clean_value(raw: &str) -> &str {
    let value = raw.strip_prefix('=').unwrap_or(raw);
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Find the value given for `switch`, scanning `args` once.
///
/// The first occurrence wins. A trailing switch with nothing after it does
/// not count as a match.
pub fn find_switch<'a>(args: &'a [String], switch: &str) -> Option<&'a str> {
    for (i, arg) in args.iter().enumerate() {
        if arg == switch {
            match args.get(i + 1) {
                Some(next) => return Some(clean_value(next)),
                None => {
                    tracing::debug!(switch, "switch has no trailing value, skipping");
                    continue;
                }
            }
        }
        if let Some(rest) = arg.strip_prefix(switch)
            && rest.starts_with('=')
        {
            return Some(clean_value(rest));
        }
    }
    None
}

/// Load every override file named by a trigger switch, in trigger order.
pub fn load_file_overrides<T: Target>(
    triggers: &[String],
    args: &[String],
    target: &mut T,
) -> Result<(), SettingsError> {
    for trigger in triggers {
        if let Some(path) = find_switch(args, trigger) {
            tracing::debug!(switch = %trigger, path, "override file named on command line");
            file::load_file(Path::new(path), target)?;
        }
    }
    Ok(())
}

/// Apply the switch table: each matched switch value is coerced and written
/// to its mapped path.
pub fn apply_args_map<T: Target>(
    args_map: &BTreeMap<String, String>,
    args: &[String],
    index: &PathIndex,
    target: &mut T,
) -> Result<(), SettingsError> {
    overrides::ensure_known(Layer::Args, args_map.values(), index)?;

    for (switch, path) in args_map {
        if let Some(raw) = find_switch(args, switch) {
            overrides::set_from_str(Layer::Args, target, index, path, raw)?;
        }
    }
    Ok(())
}

//! Keyed overrides: the defaults table, plus the shared lookup-coerce-write
//! step used by the argument and variable tables.

use crate::coerce::coerce;
use crate::error::SettingsError;
use crate::index::PathIndex;
use crate::record::Node;
use crate::types::{DefaultsTable, Layer, LeafType};
use crate::writer;

/// Apply every entry of `defaults` to `target`, or none of them.
///
/// All entries are checked against the index and the target before the first
/// write, so a bad entry leaves the target as it was.
pub fn apply_defaults(
    defaults: &DefaultsTable,
    index: &PathIndex,
    target: &mut dyn Node,
) -> Result<(), SettingsError> {
    for (path, value) in defaults {
        let declared = lookup(Layer::Defaults, index, path)?;
        let got = value.leaf_type();
        if got != *declared {
            return Err(SettingsError::FieldTypeMismatch {
                path: path.clone(),
                expected: declared.clone(),
                got,
            });
        }
        writer::ensure_writable(target, path, declared)?;
    }

    for (path, value) in defaults {
        let declared = lookup(Layer::Defaults, index, path)?;
        writer::write(target, path, declared, value.clone())?;
    }
    tracing::debug!(entries = defaults.len(), "defaults applied");
    Ok(())
}

/// Fail on the first path that is not in the index.
pub fn ensure_known<'a>(
    layer: Layer,
    paths: impl IntoIterator<Item = &'a String>,
    index: &PathIndex,
) -> Result<(), SettingsError> {
    for path in paths {
        lookup(layer, index, path)?;
    }
    Ok(())
}

/// Coerce `raw` to the declared type of `path` and write it.
///
/// An empty `raw` leaves the field untouched.
pub fn set_from_str(
    layer: Layer,
    target: &mut dyn Node,
    index: &PathIndex,
    path: &str,
    raw: &str,
) -> Result<(), SettingsError> {
    let declared = lookup(layer, index, path)?;

    let value = coerce(declared, raw).map_err(|cause| SettingsError::FieldSet {
        path: path.to_string(),
        kind: declared.clone(),
        cause: Some(cause),
    })?;

    match value {
        Some(value) => writer::write(target, path, declared, value),
        None => {
            tracing::debug!(path, "empty value, leaving field unchanged");
            Ok(())
        }
    }
}

fn lookup<'a>(
    layer: Layer,
    index: &'a PathIndex,
    path: &str,
) -> Result<&'a LeafType, SettingsError> {
    index
        .get(path)
        .ok_or_else(|| SettingsError::FieldDoesNotExist {
            layer,
            path: path.to_string(),
        })
}

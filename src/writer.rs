//! Locating a field by dotted path and writing a value into it.

use crate::error::SettingsError;
use crate::record::{FieldMut, Node};
use crate::types::{LeafType, Value};

/// Follow `path` from `root`, one field per segment.
///
/// Returns `None` if a segment names no field or a leaf is reached before the
/// last segment.
pub fn locate<'a>(root: &'a mut dyn Node, path: &str) -> Option<FieldMut<'a>> {
    let mut current = FieldMut::Node(root);
    for segment in path.split('.') {
        current = match current {
            FieldMut::Node(node) => node.child_mut(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Fail unless `path` resolves to a writable leaf.
pub fn ensure_writable(
    root: &mut dyn Node,
    path: &str,
    kind: &LeafType,
) -> Result<(), SettingsError> {
    match locate(root, path) {
        Some(FieldMut::Leaf(_)) => Ok(()),
        _ => Err(unwritable(path, kind)),
    }
}

/// Assign `value` to the leaf at `path`.
pub fn write(
    root: &mut dyn Node,
    path: &str,
    kind: &LeafType,
    value: Value,
) -> Result<(), SettingsError> {
    let Some(FieldMut::Leaf(slot)) = locate(root, path) else {
        return Err(unwritable(path, kind));
    };
    let expected = slot.leaf_type();
    slot.assign(value)
        .map_err(|rejected| SettingsError::FieldTypeMismatch {
            path: path.to_string(),
            expected,
            got: rejected.leaf_type(),
        })
}

fn unwritable(path: &str, kind: &LeafType) -> SettingsError {
    SettingsError::FieldSet {
        path: path.to_string(),
        kind: kind.clone(),
        cause: None,
    }
}

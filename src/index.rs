//! The path index: every writable leaf of a target, keyed by dotted path.

use std::collections::BTreeMap;

use crate::error::SettingsError;
use crate::leaf::{Leaf, type_of};
use crate::record::Node;
use crate::types::{Kind, LeafType};

/// Mapping from dotted path (`"data.port"`) to the leaf's declared type.
///
/// Composite fields are traversed, never indexed. Built once per gather and
/// not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathIndex {
    leaves: BTreeMap<String, LeafType>,
}

impl PathIndex {
    /// Walk `root` and index every leaf below it.
    ///
    /// The root must be a record, or a map whose values are all records.
    pub fn build(root: &dyn Node) -> Result<Self, SettingsError> {
        match root.kind() {
            Kind::Nil => return Err(SettingsError::OutCannotBeNil),
            Kind::Record | Kind::Map => {}
            other => return Err(SettingsError::TypeDiscovery(other)),
        }

        let mut index = PathIndex::default();
        root.describe("", &mut index)?;
        Ok(index)
    }

    /// Join a child name onto a parent path. Root-level fields have no prefix.
    pub fn child_path(prefix: &str, name: &str) -> String {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        }
    }

    /// Record `field` as a leaf named `name` under `prefix`.
    pub fn register_leaf<T: Leaf>(&mut self, prefix: &str, name: &str, field: &T) {
        self.leaves
            .insert(Self::child_path(prefix, name), type_of(field));
    }

    pub fn get(&self, path: &str) -> Option<&LeafType> {
        self.leaves.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.leaves.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LeafType)> {
        self.leaves.iter().map(|(k, v)| (k.as_str(), v))
    }
}

//! Describing a target record to the engine.
//!
//! Rust has no runtime reflection, so a target describes itself through
//! [`Node`]: what kind of value it is, which leaves it contains, and how to
//! hand out a writable reference to one named field. The [`record!`](crate::record!)
//! macro writes the impl for a plain struct from a list of its fields:
//!
//! ```ignore
//! #[derive(Default, Serialize, Deserialize)]
//! struct Config {
//!     name: String,
//!     port: i32,
//!     data: Data,
//!     version: String,
//! }
//!
//! layered_settings::record!(Config {
//!     name,
//!     port,
//!     data: nested,
//!     version: readonly,
//! });
//! ```
//!
//! Fields are leaves by default and must implement [`Leaf`](crate::Leaf).
//! `nested` fields are traversed rather than indexed. `readonly` fields are
//! indexed but refuse writes. Fields left out of the list are invisible to
//! keyed overrides but still take part in file decoding.
//!
//! An optional nested record (`Option<Box<Inner>>`) is indexed by its type,
//! not its value: a `None` field still contributes its paths, described from
//! `Inner::default()`. Keyed writes do not create the record, so a write
//! below a `None` fails with [`SettingsError::FieldSet`] until a file layer
//! has filled it in.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SettingsError;
use crate::index::PathIndex;
use crate::leaf::{Leaf, Slot, type_of};
use crate::types::{Kind, LeafType};

/// A value the engine can walk: a record, a map of records, or a leaf.
pub trait Node {
    fn kind(&self) -> Kind;

    /// Register every leaf below this node, prefixing paths with `prefix`.
    fn describe(&self, _prefix: &str, _index: &mut PathIndex) -> Result<(), SettingsError> {
        Ok(())
    }

    /// Writable reference to the direct child called `name`.
    fn child_mut(&mut self, _name: &str) -> Option<FieldMut<'_>> {
        None
    }
}

/// A located field, ready to be written.
pub enum FieldMut<'a> {
    /// A composite field; only useful as an intermediate path step.
    Node(&'a mut dyn Node),
    Leaf(&'a mut dyn Slot),
    /// Indexed but not writable.
    ReadOnly(LeafType),
}

impl FieldMut<'_> {
    pub fn read_only<T: Leaf>(field: &T) -> Self {
        FieldMut::ReadOnly(type_of(field))
    }
}

/// Anything that can be gathered into: walkable for keyed overrides,
/// serde-capable for file layers.
pub trait Target: Node + Serialize + DeserializeOwned {}

impl<T: Node + Serialize + DeserializeOwned> Target for T {}

impl<T: Node + Default> Node for Option<T> {
    fn kind(&self) -> Kind {
        match self {
            Some(inner) => inner.kind(),
            None => Kind::Nil,
        }
    }

    fn describe(&self, prefix: &str, index: &mut PathIndex) -> Result<(), SettingsError> {
        match self {
            Some(inner) => inner.describe(prefix, index),
            None => T::default().describe(prefix, index),
        }
    }

    fn child_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        self.as_mut()?.child_mut(name)
    }
}

impl<T: Node> Node for Box<T> {
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn describe(&self, prefix: &str, index: &mut PathIndex) -> Result<(), SettingsError> {
        (**self).describe(prefix, index)
    }

    fn child_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        (**self).child_mut(name)
    }
}

/// Entries of a map of records are addressed as `<key>.<field>`.
fn describe_entries<'a, V: Node + 'a>(
    entries: impl Iterator<Item = (&'a String, &'a V)>,
    prefix: &str,
    index: &mut PathIndex,
) -> Result<(), SettingsError> {
    for (key, value) in entries {
        if value.kind() != Kind::Record {
            return Err(SettingsError::TypeDiscovery(Kind::Map));
        }
        value.describe(&PathIndex::child_path(prefix, key), index)?;
    }
    Ok(())
}

impl<V: Node> Node for BTreeMap<String, V> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn describe(&self, prefix: &str, index: &mut PathIndex) -> Result<(), SettingsError> {
        describe_entries(self.iter(), prefix, index)
    }

    fn child_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let value: &mut dyn Node = self.get_mut(name)?;
        Some(FieldMut::Node(value))
    }
}

impl<V: Node> Node for HashMap<String, V> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn describe(&self, prefix: &str, index: &mut PathIndex) -> Result<(), SettingsError> {
        describe_entries(self.iter(), prefix, index)
    }

    fn child_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let value: &mut dyn Node = self.get_mut(name)?;
        Some(FieldMut::Node(value))
    }
}

/// Implement [`Node`] for a struct from a list of its fields.
///
/// See the [module docs](crate::record) for the field syntax.
#[macro_export]
macro_rules! record {
    (@describe $self:ident, $prefix:ident, $index:ident, $field:ident) => {
        $index.register_leaf($prefix, stringify!($field), &$self.$field)
    };
    (@describe $self:ident, $prefix:ident, $index:ident, $field:ident : readonly) => {
        $index.register_leaf($prefix, stringify!($field), &$self.$field)
    };
    (@describe $self:ident, $prefix:ident, $index:ident, $field:ident : nested) => {
        $crate::Node::describe(
            &$self.$field,
            &$crate::PathIndex::child_path($prefix, stringify!($field)),
            $index,
        )?
    };
    (@child $self:ident, $field:ident) => {
        $crate::FieldMut::Leaf(&mut $self.$field)
    };
    (@child $self:ident, $field:ident : readonly) => {
        $crate::FieldMut::read_only(&$self.$field)
    };
    (@child $self:ident, $field:ident : nested) => {
        $crate::FieldMut::Node(&mut $self.$field)
    };
    ($ty:ty { $($field:ident $(: $mode:ident)?),* $(,)? }) => {
        impl $crate::Node for $ty {
            fn kind(&self) -> $crate::Kind {
                $crate::Kind::Record
            }

            fn describe(
                &self,
                prefix: &str,
                index: &mut $crate::PathIndex,
            ) -> ::std::result::Result<(), $crate::SettingsError> {
                $( $crate::record!(@describe self, prefix, index, $field $(: $mode)?); )*
                Ok(())
            }

            fn child_mut(&mut self, name: &str) -> ::std::option::Option<$crate::FieldMut<'_>> {
                match name {
                    $( stringify!($field) => Some($crate::record!(@child self, $field $(: $mode)?)), )*
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{DataConfig, InnerConfig, OuterConfig, TestConfig};

    #[test]
    fn record_reports_record_kind() {
        assert_eq!(TestConfig::default().kind(), Kind::Record);
    }

    #[test]
    fn none_root_is_nil() {
        let target: Option<Box<TestConfig>> = None;
        assert_eq!(target.kind(), Kind::Nil);
    }

    #[test]
    fn indirection_is_transparent() {
        let target = Some(Box::new(TestConfig::default()));
        assert_eq!(target.kind(), Kind::Record);
    }

    #[test]
    fn absent_optional_record_still_describes_its_fields() {
        let outer = OuterConfig::default();
        assert!(outer.inner.is_none());
        let mut index = PathIndex::default();
        outer.describe("", &mut index).unwrap();
        assert_eq!(index.get("inner.port"), Some(&LeafType::I32));
        assert_eq!(index.get("name"), Some(&LeafType::String));
    }

    #[test]
    fn absent_optional_record_has_no_writable_children() {
        let mut outer = OuterConfig::default();
        match outer.child_mut("inner") {
            Some(FieldMut::Node(inner)) => assert!(inner.child_mut("port").is_none()),
            _ => panic!("expected a nested node"),
        }
        assert!(outer.inner.is_none());

        outer.inner = Some(Box::new(InnerConfig::default()));
        match outer.child_mut("inner") {
            Some(FieldMut::Node(inner)) => {
                assert!(matches!(inner.child_mut("port"), Some(FieldMut::Leaf(_))))
            }
            _ => panic!("expected a nested node"),
        }
    }

    #[test]
    fn child_mut_finds_leaf() {
        let mut config = TestConfig::default();
        match config.child_mut("port") {
            Some(FieldMut::Leaf(slot)) => assert_eq!(slot.leaf_type(), LeafType::I32),
            _ => panic!("expected a leaf"),
        }
    }

    #[test]
    fn child_mut_finds_nested_record() {
        let mut config = TestConfig::default();
        assert!(matches!(config.child_mut("data"), Some(FieldMut::Node(_))));
    }

    #[test]
    fn readonly_field_is_not_writable() {
        let mut config = TestConfig::default();
        assert!(matches!(
            config.child_mut("version"),
            Some(FieldMut::ReadOnly(LeafType::String))
        ));
    }

    #[test]
    fn unknown_child_is_none() {
        let mut config = TestConfig::default();
        assert!(config.child_mut("nope").is_none());
    }

    #[test]
    fn map_child_is_entry() {
        let mut map = BTreeMap::new();
        map.insert("primary".to_string(), DataConfig::default());
        assert!(matches!(map.child_mut("primary"), Some(FieldMut::Node(_))));
        assert!(map.child_mut("secondary").is_none());
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

/// Declared type of a leaf field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
    /// RFC 3339 timestamp with offset.
    Timestamp,
    /// Homogeneous sequence of the element type.
    Seq(Box<LeafType>),
}

impl LeafType {
    /// Whether string coercion knows how to produce this type.
    ///
    /// Sequences are supported only one level deep.
    pub fn is_supported(&self) -> bool {
        match self {
            LeafType::Seq(elem) => !matches!(**elem, LeafType::Seq(_)),
            _ => true,
        }
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeafType::Bool => "bool",
            LeafType::I8 => "i8",
            LeafType::I16 => "i16",
            LeafType::I32 => "i32",
            LeafType::I64 => "i64",
            LeafType::Isize => "isize",
            LeafType::U8 => "u8",
            LeafType::U16 => "u16",
            LeafType::U32 => "u32",
            LeafType::U64 => "u64",
            LeafType::Usize => "usize",
            LeafType::F32 => "f32",
            LeafType::F64 => "f64",
            LeafType::String => "string",
            LeafType::Timestamp => "timestamp",
            LeafType::Seq(elem) => return write!(f, "[{elem}]"),
        };
        f.write_str(name)
    }
}

/// Shape of a value once `Option`/`Box` indirection is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// An empty `Option` where a value was required.
    Nil,
    Record,
    Map,
    Leaf(LeafType),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Nil => f.write_str("nil"),
            Kind::Record => f.write_str("record"),
            Kind::Map => f.write_str("map"),
            Kind::Leaf(ty) => write!(f, "{ty}"),
        }
    }
}

/// An already-typed value, as supplied through the defaults table or
/// produced by string coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    Timestamp(DateTime<FixedOffset>),
    /// Sequence items, tagged with the element type so that an empty
    /// sequence still has a definite kind.
    Seq { elem: LeafType, items: Vec<Value> },
}

impl Value {
    /// The dynamic type of this value.
    pub fn leaf_type(&self) -> LeafType {
        match self {
            Value::Bool(_) => LeafType::Bool,
            Value::I8(_) => LeafType::I8,
            Value::I16(_) => LeafType::I16,
            Value::I32(_) => LeafType::I32,
            Value::I64(_) => LeafType::I64,
            Value::Isize(_) => LeafType::Isize,
            Value::U8(_) => LeafType::U8,
            Value::U16(_) => LeafType::U16,
            Value::U32(_) => LeafType::U32,
            Value::U64(_) => LeafType::U64,
            Value::Usize(_) => LeafType::Usize,
            Value::F32(_) => LeafType::F32,
            Value::F64(_) => LeafType::F64,
            Value::String(_) => LeafType::String,
            Value::Timestamp(_) => LeafType::Timestamp,
            Value::Seq { elem, .. } => LeafType::Seq(Box::new(elem.clone())),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// Which keyed table an override came from. Used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Defaults,
    Args,
    Vars,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Defaults => f.write_str("defaults"),
            Layer::Args => f.write_str("args"),
            Layer::Vars => f.write_str("vars"),
        }
    }
}

/// Where to search for environment-selected override files.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    /// Requires an app name on the options.
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit path, relative or absolute.
    Path(PathBuf),
}

impl From<&str> for SearchPath {
    fn from(p: &str) -> Self {
        SearchPath::Path(PathBuf::from(p))
    }
}

impl From<PathBuf> for SearchPath {
    fn from(p: PathBuf) -> Self {
        SearchPath::Path(p)
    }
}

/// Keyed by dotted path; ordered so that table application is deterministic.
pub type DefaultsTable = BTreeMap<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_type_displays_element() {
        let ty = LeafType::Seq(Box::new(LeafType::I32));
        assert_eq!(ty.to_string(), "[i32]");
    }

    #[test]
    fn nested_seq_is_unsupported() {
        let nested = LeafType::Seq(Box::new(LeafType::Seq(Box::new(LeafType::U8))));
        assert!(!nested.is_supported());
        assert!(LeafType::Seq(Box::new(LeafType::String)).is_supported());
        assert!(LeafType::Timestamp.is_supported());
    }

    #[test]
    fn empty_seq_value_keeps_element_type() {
        let v = Value::Seq {
            elem: LeafType::String,
            items: vec![],
        };
        assert_eq!(v.leaf_type(), LeafType::Seq(Box::new(LeafType::String)));
    }

    #[test]
    fn str_converts_to_search_path() {
        assert_eq!(
            SearchPath::from("./config"),
            SearchPath::Path(PathBuf::from("./config"))
        );
    }
}

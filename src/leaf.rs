//! Leaf field types: what a field declares and how a dynamic [`Value`] is
//! moved into it.

use chrono::{DateTime, FixedOffset};

use crate::record::Node;
use crate::types::{Kind, LeafType, Value};

/// A non-composite field type.
pub trait Leaf: Sized {
    /// The declared type recorded in the path index.
    fn leaf_type() -> LeafType;

    /// Take the value if it has exactly this type, otherwise hand it back.
    fn from_value(value: Value) -> Result<Self, Value>;
}

/// Object-safe writable view of a leaf field.
pub trait Slot {
    fn leaf_type(&self) -> LeafType;

    /// Assign in place. A value of the wrong type is returned untouched.
    fn assign(&mut self, value: Value) -> Result<(), Value>;
}

impl<T: Leaf> Slot for T {
    fn leaf_type(&self) -> LeafType {
        <T as Leaf>::leaf_type()
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        *self = <T as Leaf>::from_value(value)?;
        Ok(())
    }
}

/// The declared type of a field, inferred from a reference to it.
pub fn type_of<T: Leaf>(_: &T) -> LeafType {
    <T as Leaf>::leaf_type()
}

macro_rules! scalar_leaf {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl Leaf for $ty {
            fn leaf_type() -> LeafType {
                LeafType::$variant
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }

        impl Node for $ty {
            fn kind(&self) -> Kind {
                Kind::Leaf(LeafType::$variant)
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    )*};
}

scalar_leaf! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    DateTime<FixedOffset> => Timestamp,
}

impl<T: Leaf> Leaf for Vec<T> {
    fn leaf_type() -> LeafType {
        LeafType::Seq(Box::new(<T as Leaf>::leaf_type()))
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Seq { elem, items } if elem == <T as Leaf>::leaf_type() => {
                items.into_iter().map(<T as Leaf>::from_value).collect()
            }
            other => Err(other),
        }
    }
}

impl<T: Leaf> Node for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Leaf(<Self as Leaf>::leaf_type())
    }
}

impl<T: Leaf + Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq {
            elem: <T as Leaf>::leaf_type(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// An optional leaf declares its inner type; assignment always stores `Some`.
impl<T: Leaf> Leaf for Option<T> {
    fn leaf_type() -> LeafType {
        <T as Leaf>::leaf_type()
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        <T as Leaf>::from_value(value).map(Some)
    }
}

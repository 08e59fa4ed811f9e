//! String-to-value coercion for argument and environment sources.
//!
//! Dispatches on the declared [`LeafType`]:
//!
//! | Declared type | Accepted text |
//! |---------------|---------------|
//! | `bool` | `1 t T TRUE true True 0 f F FALSE false False` |
//! | integers | decimal, `0x`/`0o`/`0b` prefixes, leading `0` octal, `_` digit separators |
//! | floats | decimal or exponent notation, `inf`, `NaN` |
//! | `string` | anything |
//! | timestamp | RFC 3339, e.g. `2024-01-02T03:04:05+01:00` |
//! | sequence | comma-separated items, each coerced as the element type |
//!
//! An empty string coerces to `None`: there is nothing to set, and the
//! existing field value must survive.

use chrono::DateTime;

use crate::error::CoerceError;
use crate::types::{LeafType, Value};

const INVALID_SYNTAX: &str = "invalid syntax";
const OUT_OF_RANGE: &str = "value out of range";

/// Coerce `raw` into a value of type `ty`.
///
/// Returns `Ok(None)` when `raw` is empty and the write should be skipped.
pub fn coerce(ty: &LeafType, raw: &str) -> Result<Option<Value>, CoerceError> {
    if !ty.is_supported() {
        return Err(CoerceError::Unsupported(ty.clone()));
    }
    if raw.is_empty() {
        return Ok(None);
    }

    match ty {
        LeafType::Seq(elem) => {
            let items = split_items(raw)
                .map(|item| coerce_scalar(elem, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Value::Seq {
                elem: (**elem).clone(),
                items,
            }))
        }
        scalar => coerce_scalar(scalar, raw).map(Some),
    }
}

/// Split on a comma optionally followed by whitespace.
fn split_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .enumerate()
        .map(|(i, item)| if i == 0 { item } else { item.trim_start() })
}

fn coerce_scalar(ty: &LeafType, raw: &str) -> Result<Value, CoerceError> {
    let invalid = |reason: &str| CoerceError::Invalid {
        kind: ty.clone(),
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let value = match ty {
        LeafType::Bool => Value::Bool(parse_bool(raw).ok_or_else(|| invalid(INVALID_SYNTAX))?),
        LeafType::I8 => Value::I8(signed(raw).map_err(invalid)?),
        LeafType::I16 => Value::I16(signed(raw).map_err(invalid)?),
        LeafType::I32 => Value::I32(signed(raw).map_err(invalid)?),
        LeafType::I64 => Value::I64(signed(raw).map_err(invalid)?),
        LeafType::Isize => Value::Isize(signed(raw).map_err(invalid)?),
        LeafType::U8 => Value::U8(unsigned(raw).map_err(invalid)?),
        LeafType::U16 => Value::U16(unsigned(raw).map_err(invalid)?),
        LeafType::U32 => Value::U32(unsigned(raw).map_err(invalid)?),
        LeafType::U64 => Value::U64(unsigned(raw).map_err(invalid)?),
        LeafType::Usize => Value::Usize(unsigned(raw).map_err(invalid)?),
        LeafType::F32 => {
            let v: f32 = raw.parse().map_err(|_| invalid(INVALID_SYNTAX))?;
            Value::F32(finite_or_literal(v, raw).ok_or_else(|| invalid(OUT_OF_RANGE))?)
        }
        LeafType::F64 => {
            let v: f64 = raw.parse().map_err(|_| invalid(INVALID_SYNTAX))?;
            Value::F64(finite_or_literal(v, raw).ok_or_else(|| invalid(OUT_OF_RANGE))?)
        }
        LeafType::String => Value::String(raw.to_string()),
        LeafType::Timestamp => Value::Timestamp(
            DateTime::parse_from_rfc3339(raw).map_err(|e| invalid(&e.to_string()))?,
        ),
        LeafType::Seq(_) => return Err(CoerceError::Unsupported(ty.clone())),
    };
    Ok(value)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parsing overflows to infinity; only an explicit infinity literal may.
fn finite_or_literal<F: Into<f64> + Copy>(v: F, raw: &str) -> Option<F> {
    if v.into().is_infinite() && !raw.to_ascii_lowercase().contains("inf") {
        None
    } else {
        Some(v)
    }
}

fn signed<T: TryFrom<i128>>(raw: &str) -> Result<T, &'static str> {
    let n = parse_int_literal(raw, true)?;
    T::try_from(n).map_err(|_| OUT_OF_RANGE)
}

fn unsigned<T: TryFrom<i128>>(raw: &str) -> Result<T, &'static str> {
    let n = parse_int_literal(raw, false)?;
    T::try_from(n).map_err(|_| OUT_OF_RANGE)
}

/// Parse an integer literal whose base is given by its prefix.
///
/// Signs are only accepted when `signed` is set.
fn parse_int_literal(raw: &str, signed: bool) -> Result<i128, &'static str> {
    let (negative, body) = match raw.as_bytes().first() {
        Some(b'-') if signed => (true, &raw[1..]),
        Some(b'+') if signed => (false, &raw[1..]),
        _ => (false, raw),
    };

    let lower = body.to_ascii_lowercase();
    let (radix, digits, prefixed) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest, true)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest, true)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest, true)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..], true)
    } else {
        (10, lower.as_str(), false)
    };

    let digits = strip_separators(digits, prefixed).ok_or(INVALID_SYNTAX)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(INVALID_SYNTAX);
    }

    let magnitude = u128::from_str_radix(&digits, radix).map_err(|_| OUT_OF_RANGE)?;
    let magnitude = i128::try_from(magnitude).map_err(|_| OUT_OF_RANGE)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Remove `_` separators. Each must sit between two digits, or directly
/// after a base prefix.
fn strip_separators(digits: &str, prefixed: bool) -> Option<String> {
    if !digits.contains('_') {
        return Some(digits.to_string());
    }
    if digits.ends_with('_') || digits.contains("__") || (digits.starts_with('_') && !prefixed) {
        return None;
    }
    Some(digits.replace('_', ""))
}

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{Kind, Layer, LeafType};

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum SettingsError {
    #[error("Settings target cannot be nil")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(settings::out_nil), help("pass a populated value, not `None`"))
    )]
    OutCannotBeNil,

    #[error("Unable to detect fields for non-record type: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::type_discovery)))]
    TypeDiscovery(Kind),

    #[error("Field specified in {layer} overrides does not exist in the target: {path}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::unknown_field)))]
    FieldDoesNotExist { layer: Layer, path: String },

    #[error("Type mismatch for field {path}: expected {expected} but value is {got}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::type_mismatch)))]
    FieldTypeMismatch {
        path: String,
        expected: LeafType,
        got: LeafType,
    },

    #[error(
        "Unable to set field {path} (type: {kind}){}",
        .cause.as_ref().map(|c| format!(": {c}")).unwrap_or_default()
    )]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::field_set)))]
    FieldSet {
        path: String,
        kind: LeafType,
        #[source]
        cause: Option<CoerceError>,
    },

    #[error("Unrecognized settings file extension for {path}: '{ext}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(settings::file_type), help("use .yml, .yaml or .json"))
    )]
    FileType { path: PathBuf, ext: String },

    #[error("Failed to read {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::file_read)))]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::file_parse)))]
    FileParse { path: PathBuf, detail: String },

    #[error("Settings file not found: {path}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(settings::not_found)))]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Why a raw string could not become a value of the declared type.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum CoerceError {
    #[error("parsing {raw:?} as {kind}: {reason}")]
    Invalid {
        kind: LeafType,
        raw: String,
        reason: String,
    },

    #[error("unsupported field type {0}")]
    Unsupported(LeafType),
}

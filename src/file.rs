//! Settings file loading: format detection, decoding, and search-path resolution.
//!
//! A file layer decodes onto the **whole** target rather than through the path
//! index. The current target is serialized to a YAML value tree, the decoded
//! document is deep-merged over it, and the merged tree is deserialized back.
//! Keys the file does not mention keep their current values. YAML values carry
//! `.inf` and `.nan`, so non-finite floats on the target survive the trip.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::SettingsError;
use crate::merge::deep_merge;
use crate::record::Target;
use crate::types::SearchPath;

/// Structured document formats, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext {
            "yml" | "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(SettingsError::FileType {
                path: path.to_path_buf(),
                ext: other.to_string(),
            }),
        }
    }

    fn parse(self, bytes: &[u8]) -> Result<Value, String> {
        match self {
            Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_slice::<Value>(bytes).map_err(|e| e.to_string()),
        }
    }
}

/// Load the file at `path` onto `target`.
///
/// A missing file is reported as [`SettingsError::NotFound`], distinct from a
/// file that exists but cannot be read.
pub fn load_file<T: Target>(path: &Path, target: &mut T) -> Result<(), SettingsError> {
    if let Err(e) = std::fs::metadata(path) {
        if e.kind() == std::io::ErrorKind::NotFound {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
                source: e,
            });
        }
        return Err(SettingsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        });
    }

    let format = Format::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| SettingsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), ?format, "loading settings file");
    decode_onto(target, path, format, &bytes)
}

/// Decode `bytes` and merge the document over the current state of `target`.
pub fn decode_onto<T: Target>(
    target: &mut T,
    path: &Path,
    format: Format,
    bytes: &[u8],
) -> Result<(), SettingsError> {
    let parse_error = |detail: String| SettingsError::FileParse {
        path: path.to_path_buf(),
        detail,
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let overlay = format.parse(bytes).map_err(parse_error)?;
    let base = serde_yaml::to_value(&*target).map_err(|e| parse_error(e.to_string()))?;
    let merged = deep_merge(base, overlay);
    *target = serde_yaml::from_value(merged).map_err(|e| parse_error(e.to_string()))?;
    Ok(())
}

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (no app name, no home directory).
pub fn resolve_search_path(sp: &SearchPath, app_name: Option<&str>) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name?)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Resolve every search path, dropping the ones that cannot be resolved.
pub fn expand_search_paths(search_paths: &[SearchPath], app_name: Option<&str>) -> Vec<PathBuf> {
    search_paths
        .iter()
        .filter_map(|sp| {
            let dir = resolve_search_path(sp, app_name);
            if dir.is_none() {
                tracing::debug!(search_path = ?sp, "search path could not be resolved, skipping");
            }
            dir
        })
        .collect()
}

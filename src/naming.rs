//! Centralized naming for preview modules and export artifacts.
//!
//! A preview module's identifier is its path under `previews/` with the
//! `.toml` extension dropped, always `/`-separated:
//!
//! - `previews/AccountCreated.toml` → `AccountCreated`
//! - `previews/billing/Invoice.toml` → `billing/Invoice`
//!
//! Each variant lands at `<out>/<module id>/<variant>.html`. The module
//! identifier is always a segment of the path, so two modules may declare
//! variants with the same name without colliding. Only the exact lowercase
//! `.toml` extension marks a module, so `A.toml` and `A.TOML` can never both
//! claim the id `A`.
//!
//! Variant names, and each segment of a module identifier, are restricted to
//! ASCII letters, digits, `-`, `_` and `.`, which keeps them valid as both
//! file names and URL path segments.

use std::path::{Component, Path, PathBuf};

/// Extension of preview module files.
pub const MODULE_EXTENSION: &str = "toml";

/// Derive a module identifier from a module file path relative to the
/// previews directory. Returns `None` for non-module files.
pub fn module_id(relative: &Path) -> Option<String> {
    if relative.extension()? != MODULE_EXTENSION {
        return None;
    }
    let stem = relative.with_extension("");
    let segments: Vec<String> = stem
        .components()
        .map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

/// Why a variant name cannot be used as a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidName {
    Empty,
    PathSeparator,
    Relative,
    Character(char),
}

impl std::fmt::Display for InvalidName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidName::Empty => write!(f, "name is empty"),
            InvalidName::PathSeparator => write!(f, "name contains a path separator"),
            InvalidName::Relative => write!(f, "name is a relative path component"),
            InvalidName::Character(c) => write!(
                f,
                "name contains {c:?}; use letters, digits, '-', '_' or '.'"
            ),
        }
    }
}

/// Check that a variant name is usable as a single path segment.
pub fn check_variant_name(name: &str) -> Result<(), InvalidName> {
    if name.trim().is_empty() {
        return Err(InvalidName::Empty);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(InvalidName::PathSeparator);
    }
    if name == "." || name == ".." {
        return Err(InvalidName::Relative);
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(InvalidName::Character(c));
    }
    Ok(())
}

/// Destination of a variant inside `out_dir`.
///
/// Pure: the same inputs always give the same path, and nothing is checked
/// against the filesystem.
pub fn artifact_path(out_dir: &Path, module_id: &str, variant: &str) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    for segment in module_id.split('/') {
        path.push(segment);
    }
    path.push(format!("{variant}.html"));
    path
}

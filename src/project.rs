//! Read-only inspection of the host project.
//!
//! Answers two questions before anything is generated: is there already an
//! emails directory, and does the project look like TypeScript. Nothing in
//! here writes to disk.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The host project's manifest file.
pub const MANIFEST_FILE: &str = "package.json";

/// TypeScript project marker.
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Conventional emails directory locations, in priority order.
pub const EMAILS_DIR_CANDIDATES: &[&str] = &["emails", "src/emails"];

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed {MANIFEST_FILE}: {0}")]
    Json(#[from] serde_json::Error),
}

/// The parts of `package.json` this tool cares about.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl ProjectManifest {
    pub fn load(root: &Path) -> Result<Self, ProjectError> {
        let content = fs::read_to_string(root.join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// True if `name` is a runtime or development dependency.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

pub fn has_manifest(root: &Path) -> bool {
    root.join(MANIFEST_FILE).is_file()
}

/// Return the first conventional emails directory that exists under `root`.
pub fn find_emails_dir(root: &Path) -> Option<PathBuf> {
    EMAILS_DIR_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_dir())
}

/// Heuristic default for the TypeScript prompt.
///
/// A `tsconfig.json` or a `typescript` dependency in either group counts.
/// An unreadable or malformed manifest counts as "no".
pub fn looks_like_typescript(root: &Path) -> bool {
    if root.join(TSCONFIG_FILE).exists() {
        return true;
    }
    match ProjectManifest::load(root) {
        Ok(manifest) => manifest.depends_on("typescript"),
        Err(e) => {
            tracing::debug!("typescript detection skipped manifest: {e}");
            false
        }
    }
}

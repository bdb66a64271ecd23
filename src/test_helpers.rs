//! Shared test utilities for the mailshot test suite.
//!
//! Fixture builders for host projects and emails directories, plus a few
//! extractors over exported output.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = scaffolded_project(false);
//! write_file(&tmp.path().join("emails"), "previews/Extra.toml", &module_with(&["a"], "T.html"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::scaffold::{self, ScaffoldOptions};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project root with a minimal `package.json` and nothing else.
pub fn js_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "package.json", r#"{"name": "app"}"#);
    tmp
}

/// A project whose `emails/` directory holds the starter templates
/// (3 modules, 4 previews).
pub fn scaffolded_project(typescript: bool) -> TempDir {
    let tmp = js_project();
    scaffold::generate_emails_directory(
        tmp.path(),
        &ScaffoldOptions {
            typescript,
            emails_dir: None,
        },
    )
    .unwrap();
    tmp
}

/// Source of a preview module declaring `names`, all rendering `template`.
pub fn module_with(names: &[&str], template: &str) -> String {
    names
        .iter()
        .map(|n| format!("[[preview]]\nname = \"{n}\"\ntemplate = \"{template}\"\n\n"))
        .collect()
}

// =========================================================================
// Output extractors
// =========================================================================

/// Every `.html` file under `dir`, relative to it, sorted.
pub fn html_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|x| x == "html"))
        .filter_map(|e| e.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}

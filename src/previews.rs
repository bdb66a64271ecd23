//! Preview module discovery and rendering.
//!
//! Preview modules live under `<emails>/previews/`. Each one is a TOML file
//! declaring the variants to render:
//!
//! ```text
//! emails/
//! ├── layout.html
//! ├── Reservation.html
//! └── previews/
//!     ├── Reservation.toml        # module `Reservation`
//!     └── billing/
//!         └── Invoice.toml        # module `billing/Invoice`
//! ```
//!
//! ```toml
//! [[preview]]
//! name = "reservation_confirmed"
//! template = "Reservation.html"
//!
//! [preview.props]
//! guest = "Ada"
//! ```
//!
//! Discovery walks the directory in file-name order, so the module list is
//! the same on every run over the same tree.

use crate::naming::{self, InvalidName};
use crate::render::{RenderError, Renderer};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Subdirectory of the emails directory that holds preview modules.
pub const PREVIEWS_DIR: &str = "previews";

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid preview module: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid preview name {name:?}: {reason}")]
    InvalidName { name: String, reason: InvalidName },
    #[error("Preview {0:?} is declared more than once")]
    DuplicateVariant(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A discovered preview module file.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewModule {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleFile {
    #[serde(default)]
    preview: Vec<PreviewSpec>,
}

/// One `[[preview]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewSpec {
    pub name: String,
    /// Template path relative to the emails directory.
    pub template: String,
    #[serde(default)]
    pub props: toml::Table,
}

/// A named rendering of a module.
#[derive(Debug, Clone)]
pub struct RenderedVariant {
    pub name: String,
    pub html: String,
}

/// Find every preview module under `<emails_dir>/previews`.
///
/// A missing previews directory means no modules. Unreadable entries, and
/// files whose path segments are not valid names, are logged and skipped.
pub fn discover_modules(emails_dir: &Path) -> Vec<PreviewModule> {
    let root = emails_dir.join(PREVIEWS_DIR);
    if !root.is_dir() {
        tracing::debug!("no previews directory at {}", root.display());
        return Vec::new();
    }

    let mut modules = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable preview entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        let Some(id) = naming::module_id(relative) else {
            continue;
        };
        if let Err(reason) = id.split('/').try_for_each(naming::check_variant_name) {
            tracing::warn!("skipping preview module {id:?}: {reason}");
            continue;
        }
        modules.push(PreviewModule {
            id,
            path: entry.path().to_path_buf(),
        });
    }
    modules
}

/// Parse a module file into its variant declarations.
///
/// Names are checked here: each must be a valid file name and unique
/// within the module.
pub fn load_specs(module: &PreviewModule) -> Result<Vec<PreviewSpec>, ModuleError> {
    let content = fs::read_to_string(&module.path)?;
    let file: ModuleFile = toml::from_str(&content)?;

    let mut seen = HashSet::new();
    for spec in &file.preview {
        naming::check_variant_name(&spec.name).map_err(|reason| ModuleError::InvalidName {
            name: spec.name.clone(),
            reason,
        })?;
        if !seen.insert(spec.name.as_str()) {
            return Err(ModuleError::DuplicateVariant(spec.name.clone()));
        }
    }
    Ok(file.preview)
}

/// Render every variant of a module. Fails as a whole if any variant fails,
/// so a module never contributes a partial set.
pub fn render_module(
    module: &PreviewModule,
    renderer: &impl Renderer,
) -> Result<Vec<RenderedVariant>, ModuleError> {
    load_specs(module)?
        .into_iter()
        .map(|spec| -> Result<RenderedVariant, ModuleError> {
            let html = renderer.render(&spec.template, &spec.props)?;
            Ok(RenderedVariant {
                name: spec.name,
                html,
            })
        })
        .collect()
}

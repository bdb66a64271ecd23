//! Static preview export.
//!
//! Renders every preview variant of every module under the emails directory
//! and writes each one to `<out>/<module id>/<variant>.html`.
//!
//! ## Output Structure
//!
//! ```text
//! previews_html/
//! ├── AccountCreated/
//! │   └── account_created.html
//! ├── NewSignIn/
//! │   └── new_sign_in.html
//! └── Reservation/
//!     ├── reservation_changed.html
//!     └── reservation_confirmed.html
//! ```
//!
//! ## Failure Scope
//!
//! A missing emails directory stops the export before anything is written.
//! Everything else is contained per module: a module that fails to parse or
//! render is recorded in its [`ModuleOutcome`] and the export moves on.
//! Modules are handled one at a time; a module's files are written before
//! the next module renders. Existing files at a destination are replaced,
//! unrelated files in the output directory are left alone.

use crate::naming;
use crate::previews::{self, ModuleError, PreviewModule, RenderedVariant};
use crate::render::Renderer;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shown when the emails directory does not resolve.
pub const MISSING_EMAILS_DIR: &str =
    "Could not find emails directory. Have you initialized the project with the init command?";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{}", MISSING_EMAILS_DIR)]
    EmailsDirNotFound(PathBuf),
    #[error("Cannot create output directory {0}: {1}")]
    OutputDir(PathBuf, std::io::Error),
}

/// A variant written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub module_id: String,
    pub variant: String,
    pub path: PathBuf,
}

/// What happened to one module.
#[derive(Debug)]
pub struct ModuleOutcome {
    pub module: PreviewModule,
    /// Artifacts actually written, in declaration order.
    pub artifacts: Vec<Artifact>,
    pub error: Option<ModuleError>,
}

#[derive(Debug)]
pub struct ExportReport {
    pub out_dir: PathBuf,
    pub modules: Vec<ModuleOutcome>,
}

impl ExportReport {
    /// Number of files written across all modules.
    pub fn artifact_count(&self) -> usize {
        self.modules.iter().map(|m| m.artifacts.len()).sum()
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.modules.iter().flat_map(|m| m.artifacts.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PreviewModule, &ModuleError)> {
        self.modules
            .iter()
            .filter_map(|m| m.error.as_ref().map(|e| (&m.module, e)))
    }
}

pub fn export_previews(
    emails_dir: &Path,
    out_dir: &Path,
    renderer: &impl Renderer,
) -> Result<ExportReport, ExportError> {
    if !emails_dir.is_dir() {
        return Err(ExportError::EmailsDirNotFound(emails_dir.to_path_buf()));
    }
    fs::create_dir_all(out_dir).map_err(|e| ExportError::OutputDir(out_dir.to_path_buf(), e))?;

    let modules = previews::discover_modules(emails_dir);
    tracing::debug!(
        "exporting {} preview modules from {}",
        modules.len(),
        emails_dir.display()
    );

    let mut outcomes = Vec::with_capacity(modules.len());
    for module in modules {
        let mut artifacts = Vec::new();
        let error = match previews::render_module(&module, renderer) {
            Ok(variants) => write_variants(out_dir, &module, variants, &mut artifacts).err(),
            Err(e) => Some(e),
        };
        if let Some(e) = &error {
            tracing::warn!("preview module {} failed: {e}", module.id);
        }
        outcomes.push(ModuleOutcome {
            module,
            artifacts,
            error,
        });
    }

    Ok(ExportReport {
        out_dir: out_dir.to_path_buf(),
        modules: outcomes,
    })
}

/// Write a module's variants, recording each file as it lands.
fn write_variants(
    out_dir: &Path,
    module: &PreviewModule,
    variants: Vec<RenderedVariant>,
    written: &mut Vec<Artifact>,
) -> Result<(), ModuleError> {
    for variant in variants {
        let path = naming::artifact_path(out_dir, &module.id, &variant.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, variant.html)?;
        tracing::info!("wrote {}", path.display());
        written.push(Artifact {
            module_id: module.id.clone(),
            variant: variant.name,
            path,
        });
    }
    Ok(())
}

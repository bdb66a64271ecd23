//! The `preview` launch path.
//!
//! Exports every preview into the configured preview directory and writes an
//! `index.html` next to them that links each rendered variant, grouped by
//! module. Modules that failed are listed with their error so the page shows
//! the whole picture. The index is a plain file; nothing is served.

use crate::config::ToolConfig;
use crate::export::{self, ExportError, ExportReport};
use crate::project;
use crate::render::JinjaRenderer;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const INDEX_FILE: &str = "index.html";

const INDEX_CSS: &str = "\
body{font-family:system-ui,sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem;color:#111}\
h2{font-size:1rem;margin:1.5rem 0 .5rem}\
ul{margin:0;padding-left:1.25rem}\
.error{color:#b00020;font-family:monospace}\
.count{margin-top:2rem;color:#666}";

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Cannot write preview index: {0}")]
    Index(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct PreviewReport {
    pub export: ExportReport,
    pub index: PathBuf,
}

/// Resolve the emails directory: an explicit path (relative to `root`
/// unless absolute), else the first conventional location that exists.
pub fn resolve_emails_dir(root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(root.join(path)),
        None => project::find_emails_dir(root),
    }
}

pub fn launch(
    root: &Path,
    config: &ToolConfig,
    emails_dir: Option<&Path>,
) -> Result<PreviewReport, PreviewError> {
    launch_with(root, config, emails_dir, |_| {})
}

/// [`launch`], calling `on_start` with the output directory once the emails
/// directory is known to exist and before anything is rendered.
pub fn launch_with(
    root: &Path,
    config: &ToolConfig,
    emails_dir: Option<&Path>,
    on_start: impl FnOnce(&Path),
) -> Result<PreviewReport, PreviewError> {
    let emails_dir = resolve_emails_dir(root, emails_dir)
        .filter(|dir| dir.is_dir())
        .ok_or_else(|| ExportError::EmailsDirNotFound(root.join("emails")))?;
    let out_dir = root.join(&config.preview.out_dir);
    on_start(&out_dir);

    let renderer = JinjaRenderer::new(&emails_dir);
    let report = export::export_previews(&emails_dir, &out_dir, &renderer)?;
    let index = write_index(&report)?;
    Ok(PreviewReport {
        export: report,
        index,
    })
}

/// Write `index.html` into the report's output directory.
pub fn write_index(report: &ExportReport) -> std::io::Result<PathBuf> {
    let path = report.out_dir.join(INDEX_FILE);
    fs::write(&path, render_index(report).into_string())?;
    Ok(path)
}

fn render_index(report: &ExportReport) -> Markup {
    let count = report.artifact_count();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Email previews" }
                style { (INDEX_CSS) }
            }
            body {
                h1 { "Email previews" }
                @for outcome in &report.modules {
                    section {
                        h2 { (outcome.module.id) }
                        @if let Some(err) = &outcome.error {
                            p.error { (err.to_string()) }
                        }
                        @if !outcome.artifacts.is_empty() {
                            ul {
                                @for artifact in &outcome.artifacts {
                                    @let (module, name) = (&artifact.module_id, &artifact.variant);
                                    li { a href=(format!("{module}/{name}.html")) { (name) } }
                                }
                            }
                        }
                    }
                }
                p.count { (count) @if count == 1 { " preview" } @else { " previews" } }
            }
        }
    }
}

//! CLI output formatting for every command.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout or stderr.
//! Format functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Export
//!
//! ```text
//! Exporting preview html to previews_html
//! AccountCreated
//!     account_created → previews_html/AccountCreated/account_created.html
//! Reservation
//!     reservation_changed → previews_html/Reservation/reservation_changed.html
//!     reservation_confirmed → previews_html/Reservation/reservation_confirmed.html
//! ✅ Processed 3 previews
//! ```
//!
//! Module failures go to stderr:
//!
//! ```text
//! ✗ Broken: Template not found: Missing.html
//! ```
//!
//! ## Init
//!
//! ```text
//! Created emails (8 files)
//!     layout.html
//!     ...
//! ```

use crate::export::ExportReport;
use crate::notify::NotifyOutcome;
use crate::scaffold::ScaffoldReport;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Show `path` relative to `root` when it lives under it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

// ============================================================================
// Export
// ============================================================================

pub fn format_export_header(out_dir: &Path, root: &Path) -> String {
    format!("Exporting preview html to {}", display_path(out_dir, root))
}

/// The closing line. `count` is the number of files actually written.
pub fn format_processed(count: usize) -> String {
    format!("✅ Processed {count} previews")
}

/// Module-by-module listing of written artifacts, then the summary line.
pub fn format_export_output(report: &ExportReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in report.modules.iter().filter(|m| !m.artifacts.is_empty()) {
        lines.push(outcome.module.id.clone());
        for artifact in &outcome.artifacts {
            lines.push(format!(
                "{}{} → {}",
                indent(1),
                artifact.variant,
                display_path(&artifact.path, root)
            ));
        }
    }
    lines.push(format_processed(report.artifact_count()));
    lines
}

pub fn format_export_failures(report: &ExportReport) -> Vec<String> {
    report
        .failures()
        .map(|(module, err)| format!("✗ {}: {}", module.id, err))
        .collect()
}

pub fn print_export_output(report: &ExportReport, root: &Path) {
    for line in format_export_failures(report) {
        eprintln!("{line}");
    }
    for line in format_export_output(report, root) {
        println!("{line}");
    }
}

pub fn format_preview_index(index: &Path) -> String {
    format!("Preview index: file://{}", index.display())
}

// ============================================================================
// Init
// ============================================================================

pub fn format_scaffold_output(report: &ScaffoldReport, root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Created {} ({} files)",
        display_path(&report.emails_dir, root),
        report.files.len()
    )];
    lines.extend(
        report
            .files
            .iter()
            .map(|f| format!("{}{}", indent(1), f.to_string_lossy())),
    );
    lines
}

pub fn print_scaffold_output(report: &ScaffoldReport, root: &Path) {
    for line in format_scaffold_output(report, root) {
        println!("{line}");
    }
}

pub fn format_existing_emails_dir(emails_dir: &Path, root: &Path) -> String {
    format!("Found {}, skipping setup", display_path(emails_dir, root))
}

/// Non-fatal notification result; `None` when there is nothing to say.
pub fn format_notify_outcome(outcome: &NotifyOutcome) -> Option<String> {
    match outcome {
        NotifyOutcome::Sent => None,
        NotifyOutcome::Failed(reason) => Some(format!(
            "Could not register for updates ({reason}). Continuing."
        )),
    }
}

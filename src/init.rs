//! The `init` command.
//!
//! ```text
//! package.json? ──no──▶ NoManifest (nothing written)
//!      │yes
//! emails dir? ──yes──────────────────────────────┐
//!      │no                                       │
//! language mode (flag, else prompt)              │
//! scaffold starter templates                     │
//! optional contact address → best-effort POST    │
//!      │                                         │
//!      └──────────────▶ hand off to preview ◀────┘
//! ```
//!
//! Running `init` on a project that already has an emails directory only
//! does the hand-off, so repeated runs are safe.

use crate::notify::{Notifier, NotifyOutcome};
use crate::output;
use crate::preview::PreviewError;
use crate::project;
use crate::prompt::{PromptError, Prompter};
use crate::scaffold::{self, EmailsDirChoice, ScaffoldError, ScaffoldOptions, ScaffoldReport};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TYPESCRIPT_QUESTION: &str = "Are you using typescript?";
pub const CONTACT_QUESTION: &str = "Enter your email for occasional updates (optional)";

#[derive(Error, Debug)]
pub enum InitError {
    #[error("No package.json found in {0}. Please run from the project root.")]
    NoManifest(PathBuf),
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

/// Flags accepted by `init`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitArgs {
    /// `Some(false)` forces JavaScript, `Some(true)` TypeScript, `None` asks.
    pub typescript: Option<bool>,
    pub emails_dir: Option<EmailsDirChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Scaffolding was skipped, so the question never came up.
    NotAsked,
    Declined,
    Notified(NotifyOutcome),
}

#[derive(Debug)]
pub struct InitReport<T> {
    pub scaffolded: Option<ScaffoldReport>,
    pub contact: ContactOutcome,
    pub preview: T,
}

/// Run `init` for the project at `root`.
///
/// `handoff` is the preview launch path; it runs whether or not anything
/// was scaffolded.
pub fn run_init<T>(
    root: &Path,
    args: &InitArgs,
    prompter: &impl Prompter,
    notifier: &impl Notifier,
    handoff: impl FnOnce(&Path) -> Result<T, PreviewError>,
) -> Result<InitReport<T>, InitError> {
    if !project::has_manifest(root) {
        return Err(InitError::NoManifest(root.to_path_buf()));
    }

    let (scaffolded, contact) = match project::find_emails_dir(root) {
        Some(existing) => {
            println!("{}", output::format_existing_emails_dir(&existing, root));
            (None, ContactOutcome::NotAsked)
        }
        None => {
            let typescript = resolve_typescript(root, args.typescript, prompter)?;
            let report = scaffold::generate_emails_directory(
                root,
                &ScaffoldOptions {
                    typescript,
                    emails_dir: args.emails_dir,
                },
            )?;
            output::print_scaffold_output(&report, root);
            let contact = capture_contact(prompter, notifier);
            (Some(report), contact)
        }
    };

    let preview = handoff(root)?;
    Ok(InitReport {
        scaffolded,
        contact,
        preview,
    })
}

/// An explicit flag wins; otherwise ask, suggesting what the project looks like.
pub fn resolve_typescript(
    root: &Path,
    flag: Option<bool>,
    prompter: &impl Prompter,
) -> Result<bool, PromptError> {
    match flag {
        Some(typescript) => Ok(typescript),
        None => prompter.confirm(TYPESCRIPT_QUESTION, project::looks_like_typescript(root)),
    }
}

/// Ask for an address and, if one is given, try to register it. Never fails.
fn capture_contact(prompter: &impl Prompter, notifier: &impl Notifier) -> ContactOutcome {
    let email = match prompter.ask(CONTACT_QUESTION) {
        Ok(email) => email.trim().to_string(),
        Err(e) => {
            tracing::warn!("contact prompt skipped: {e}");
            String::new()
        }
    };
    if email.is_empty() {
        println!("OK, no problem!");
        return ContactOutcome::Declined;
    }

    println!("Great, talk soon.");
    let outcome = notifier.notify(&email);
    if let Some(message) = output::format_notify_outcome(&outcome) {
        tracing::warn!("signup notification failed: {message}");
        eprintln!("{message}");
    }
    ContactOutcome::Notified(outcome)
}

//! # mailshot
//!
//! Scaffolds a directory of email templates into a project and exports
//! every declared preview of those templates as static HTML.
//!
//! # Architecture: Two Flows
//!
//! ```text
//! init             package.json → detect → (scaffold) → preview
//! export-previews  emails/      → discover → render → <out>/<module>/<variant>.html
//! ```
//!
//! `init` is idempotent: once an emails directory exists it only hands off
//! to `preview`. `preview` is `export-previews` into the configured preview
//! directory plus an `index.html` linking the results.
//!
//! Every component takes the project root explicitly. Only `main` looks at
//! the process working directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`project`] | Read-only detection: emails directory location, TypeScript heuristic |
//! | [`scaffold`] | Writes the starter emails directory, never over an existing one |
//! | [`init`] | The `init` flow: detection, language prompt, scaffold, signup, hand-off |
//! | [`previews`] | Discovers preview modules and renders their variants |
//! | [`render`] | `Renderer` seam and the MiniJinja implementation |
//! | [`export`] | Writes one HTML file per variant, contains per-module failures |
//! | [`preview`] | Export into the preview directory plus an index page (maud) |
//! | [`naming`] | Module identifiers and artifact paths |
//! | [`notify`] | Best-effort signup POST with a timeout |
//! | [`prompt`] | `Prompter` seam: inquire prompts and scripted answers |
//! | [`config`] | `mailshot.toml` loading, layering and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Preview Modules Are Data
//!
//! A preview module is a TOML file listing named variants, each naming a
//! template and the props to render it with. Adding a preview means adding
//! a `[[preview]]` table; no code runs at discovery time, and a broken
//! module is just a parse error contained to that module.
//!
//! ## Failures Stay Small
//!
//! Only two conditions stop a command: no `package.json` for `init`, and no
//! emails directory for an export. A module that fails to render is reported
//! and skipped. The signup POST returns an outcome value rather than an
//! error, so it cannot fail `init` even by accident.

pub mod config;
pub mod export;
pub mod init;
pub mod naming;
pub mod notify;
pub mod output;
pub mod preview;
pub mod previews;
pub mod project;
pub mod prompt;
pub mod render;
pub mod scaffold;

#[cfg(test)]
pub(crate) mod test_helpers;

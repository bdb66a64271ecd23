//! Starter emails directory generation.
//!
//! Writes a layout, three templates, their preview modules and an index
//! module into a new emails directory. The starter files are embedded at
//! compile time from `starter/`.
//!
//! ```text
//! emails/
//! ├── layout.html
//! ├── AccountCreated.html
//! ├── NewSignIn.html
//! ├── Reservation.html
//! ├── index.ts | index.js      # depends on the language mode
//! └── previews/
//!     ├── AccountCreated.toml  # 1 preview
//!     ├── NewSignIn.toml       # 1 preview
//!     └── Reservation.toml     # 2 previews
//! ```
//!
//! An existing target directory is never touched.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const COMMON_FILES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../starter/layout.html")),
    ("AccountCreated.html", include_str!("../starter/AccountCreated.html")),
    ("NewSignIn.html", include_str!("../starter/NewSignIn.html")),
    ("Reservation.html", include_str!("../starter/Reservation.html")),
    (
        "previews/AccountCreated.toml",
        include_str!("../starter/previews/AccountCreated.toml"),
    ),
    (
        "previews/NewSignIn.toml",
        include_str!("../starter/previews/NewSignIn.toml"),
    ),
    (
        "previews/Reservation.toml",
        include_str!("../starter/previews/Reservation.toml"),
    ),
];

const INDEX_TS: (&str, &str) = ("index.ts", include_str!("../starter/index.ts"));
const INDEX_JS: (&str, &str) = ("index.js", include_str!("../starter/index.js"));

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} already exists, refusing to overwrite it")]
    AlreadyExists(PathBuf),
}

/// The two accepted emails directory locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailsDirChoice {
    /// `./emails`
    Root,
    /// `./src/emails`
    Src,
}

impl EmailsDirChoice {
    pub fn relative_path(self) -> &'static str {
        match self {
            EmailsDirChoice::Root => "emails",
            EmailsDirChoice::Src => "src/emails",
        }
    }

    /// Location used when none was chosen: `src/emails` if the project has
    /// a `src/` directory, `emails` otherwise.
    pub fn default_for(root: &Path) -> Self {
        if root.join("src").is_dir() {
            EmailsDirChoice::Src
        } else {
            EmailsDirChoice::Root
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub typescript: bool,
    pub emails_dir: Option<EmailsDirChoice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldReport {
    pub emails_dir: PathBuf,
    /// Files written, relative to `emails_dir`.
    pub files: Vec<PathBuf>,
}

pub fn generate_emails_directory(
    root: &Path,
    options: &ScaffoldOptions,
) -> Result<ScaffoldReport, ScaffoldError> {
    let choice = options
        .emails_dir
        .unwrap_or_else(|| EmailsDirChoice::default_for(root));
    let emails_dir = root.join(choice.relative_path());
    if emails_dir.exists() {
        return Err(ScaffoldError::AlreadyExists(emails_dir));
    }

    let index = if options.typescript { INDEX_TS } else { INDEX_JS };
    let mut files = Vec::new();
    for &(rel, content) in COMMON_FILES.iter().chain(std::iter::once(&index)) {
        let path = emails_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        files.push(PathBuf::from(rel));
    }
    tracing::debug!(
        "scaffolded {} files into {}",
        files.len(),
        emails_dir.display()
    );

    Ok(ScaffoldReport { emails_dir, files })
}

use clap::{Parser, Subcommand, ValueEnum};
use mailshot::config::{self, ConfigError, ToolConfig};
use mailshot::export::{self, ExportError};
use mailshot::init::{self, InitArgs, InitError};
use mailshot::notify::HttpNotifier;
use mailshot::output;
use mailshot::preview::{self, PreviewError, PreviewReport};
use mailshot::prompt::TerminalPrompter;
use mailshot::render::JinjaRenderer;
use mailshot::scaffold::EmailsDirChoice;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Not run from a project root (no package.json).
const EXIT_NOT_PROJECT_ROOT: u8 = 3;
/// The emails directory could not be found.
const EXIT_NO_EMAILS_DIR: u8 = 4;

fn version_string() -> &'static str {
    if env!("MAILSHOT_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("MAILSHOT_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "mailshot")]
#[command(about = "Email templates for your app, previewed as static HTML")]
#[command(long_about = "\
Email templates for your app, previewed as static HTML

Run `mailshot` (or `mailshot init`) from the project root, next to
package.json. The first run creates an emails directory with starter
templates; every run renders all previews.

Emails directory layout:

  emails/
  ├── layout.html                  # Shared layout (MiniJinja)
  ├── Reservation.html             # Template
  └── previews/
      └── Reservation.toml         # [[preview]] tables: name, template, props

Each preview renders to <out>/<module>/<name>.html.

Run 'mailshot gen-config' to print a documented mailshot.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root (where package.json lives)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Set up an emails directory (if missing), then preview it
    Init(InitCommand),
    /// Render every preview into an output directory
    ExportPreviews {
        /// Output directory [default: preview.out_dir from mailshot.toml]
        #[arg(long = "out-dir", alias = "outDir")]
        out_dir: Option<PathBuf>,
        /// Emails directory [default: ./emails or ./src/emails, whichever exists]
        #[arg(long = "emails-dir", alias = "emailsDir")]
        emails_dir: Option<PathBuf>,
    },
    /// Export previews into the preview directory and write an index page
    Preview {
        /// Emails directory [default: ./emails or ./src/emails, whichever exists]
        #[arg(long = "emails-dir", alias = "emailsDir")]
        emails_dir: Option<PathBuf>,
    },
    /// Print a stock mailshot.toml with all options documented
    GenConfig,
}

#[derive(clap::Args, Default)]
struct InitCommand {
    /// Use TypeScript; `--typescript=false` forces JavaScript. Asks when omitted.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    typescript: Option<bool>,

    /// Where to create the emails directory
    #[arg(long, value_enum)]
    emails_dir: Option<EmailsDirArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmailsDirArg {
    #[value(name = "./emails", alias = "emails")]
    Emails,
    #[value(name = "./src/emails", alias = "src/emails")]
    SrcEmails,
}

impl From<&InitCommand> for InitArgs {
    fn from(cmd: &InitCommand) -> Self {
        InitArgs {
            typescript: cmd.typescript,
            emails_dir: cmd.emails_dir.map(|d| match d {
                EmailsDirArg::Emails => EmailsDirChoice::Root,
                EmailsDirArg::SrcEmails => EmailsDirChoice::Src,
            }),
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        let missing_emails = |e: &ExportError| matches!(e, ExportError::EmailsDirNotFound(_));
        match self {
            CliError::Init(InitError::NoManifest(_)) => ExitCode::from(EXIT_NOT_PROJECT_ROOT),
            CliError::Export(e)
            | CliError::Preview(PreviewError::Export(e))
            | CliError::Init(InitError::Preview(PreviewError::Export(e)))
                if missing_emails(e) =>
            {
                ExitCode::from(EXIT_NO_EMAILS_DIR)
            }
            _ => ExitCode::FAILURE,
        }
    }
}

/// Initialize tracing on stderr; stdout carries the command output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "mailshot=debug" } else { "mailshot=warn" };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let root = cli.root;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Init(InitCommand::default()));

    match command {
        Command::Init(cmd) => {
            let config = config::load_config(&root)?;
            let notifier = HttpNotifier::new(&config.api.base_url, config.api.timeout());
            init::run_init(
                &root,
                &InitArgs::from(&cmd),
                &TerminalPrompter,
                &notifier,
                |root| run_preview(root, &config, None),
            )?;
        }
        Command::ExportPreviews {
            out_dir,
            emails_dir,
        } => {
            let config = config::load_config(&root)?;
            let emails_dir = preview::resolve_emails_dir(&root, emails_dir.as_deref())
                .filter(|dir| dir.is_dir())
                .ok_or_else(|| ExportError::EmailsDirNotFound(root.join("emails")))?;
            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(config.preview.out_dir));
            let out_dir = root.join(out_dir);

            println!("{}", output::format_export_header(&out_dir, &root));
            let renderer = JinjaRenderer::new(&emails_dir);
            let report = export::export_previews(&emails_dir, &out_dir, &renderer)?;
            output::print_export_output(&report, &root);
        }
        Command::Preview { emails_dir } => {
            let config = config::load_config(&root)?;
            run_preview(&root, &config, emails_dir.as_deref())?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_preview(
    root: &Path,
    config: &ToolConfig,
    emails_dir: Option<&Path>,
) -> Result<PreviewReport, PreviewError> {
    let report = preview::launch_with(root, config, emails_dir, |out_dir| {
        println!("{}", output::format_export_header(out_dir, root));
    })?;
    output::print_export_output(&report.export, root);
    println!("{}", output::format_preview_index(&report.index));
    Ok(report)
}

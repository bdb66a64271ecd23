//! The `init` flow wired to the real preview hand-off.
//!
//! Prompts are scripted and the signup notifier is either recorded locally
//! or pointed at an address nothing listens on.
//!
//! Run with: cargo test --test init_flow

use mailshot::config::ToolConfig;
use mailshot::init::{self, ContactOutcome, InitArgs, InitError, TYPESCRIPT_QUESTION};
use mailshot::notify::{HttpNotifier, Notifier, NotifyOutcome};
use mailshot::preview;
use mailshot::project;
use mailshot::prompt::{Answer, ScriptedPrompter};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<String>>,
}

impl Notifier for Recorder {
    fn notify(&self, email: &str) -> NotifyOutcome {
        self.sent.borrow_mut().push(email.to_string());
        NotifyOutcome::Sent
    }
}

fn project_with(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("package.json"), manifest).unwrap();
    tmp
}

fn launch(root: &Path) -> Result<preview::PreviewReport, preview::PreviewError> {
    preview::launch(root, &ToolConfig::default(), None)
}

#[test]
fn init_twice_scaffolds_once_and_previews_both_times() {
    let tmp = project_with(r#"{"name": "app"}"#);
    let notifier = Recorder::default();

    let first = init::run_init(
        tmp.path(),
        &InitArgs::default(),
        &ScriptedPrompter::new([
            Answer::Confirm(false),
            Answer::Text("dev@example.com".into()),
        ]),
        &notifier,
        launch,
    )
    .unwrap();
    assert!(first.scaffolded.is_some());
    assert_eq!(first.preview.export.artifact_count(), 4);
    assert!(tmp.path().join("emails/index.js").is_file());

    let layout = fs::read_to_string(tmp.path().join("emails/layout.html")).unwrap();
    fs::write(tmp.path().join("emails/layout.html"), format!("{layout}\n")).unwrap();

    let prompter = ScriptedPrompter::default();
    let second = init::run_init(
        tmp.path(),
        &InitArgs::default(),
        &prompter,
        &notifier,
        launch,
    )
    .unwrap();

    assert!(second.scaffolded.is_none());
    assert_eq!(second.contact, ContactOutcome::NotAsked);
    assert!(prompter.questions().is_empty());
    assert_eq!(second.preview.export.artifact_count(), 4);
    assert!(second.preview.index.is_file());
    // The second run left the user's edit alone.
    assert_eq!(
        fs::read_to_string(tmp.path().join("emails/layout.html")).unwrap(),
        format!("{layout}\n")
    );
    assert_eq!(*notifier.sent.borrow(), vec!["dev@example.com"]);
}

#[test]
fn no_manifest_exits_before_any_prompt() {
    let tmp = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::default();

    let err = init::run_init(
        tmp.path(),
        &InitArgs::default(),
        &prompter,
        &Recorder::default(),
        launch,
    )
    .unwrap_err();

    assert!(matches!(err, InitError::NoManifest(_)));
    assert!(prompter.questions().is_empty());
    assert!(!tmp.path().join("emails").exists());
    assert!(!tmp.path().join("previews_html").exists());
}

#[test]
fn typescript_heuristic_seeds_the_prompt_default() {
    let with_tsconfig = project_with(r#"{"name": "app"}"#);
    fs::write(with_tsconfig.path().join("tsconfig.json"), "{}").unwrap();
    let with_dev_dep = project_with(r#"{"devDependencies": {"typescript": "^5.4.0"}}"#);
    let plain = project_with(r#"{"dependencies": {"express": "^4.0.0"}}"#);

    assert!(project::looks_like_typescript(with_tsconfig.path()));
    assert!(project::looks_like_typescript(with_dev_dep.path()));
    assert!(!project::looks_like_typescript(plain.path()));

    // An unanswered prompt takes the suggested default.
    let prompter = ScriptedPrompter::default();
    let report = init::run_init(
        with_dev_dep.path(),
        &InitArgs::default(),
        &prompter,
        &Recorder::default(),
        launch,
    )
    .unwrap();
    assert_eq!(prompter.questions()[0], TYPESCRIPT_QUESTION);
    assert!(
        report
            .scaffolded
            .unwrap()
            .emails_dir
            .join("index.ts")
            .is_file()
    );
}

#[test]
fn unreachable_signup_endpoint_does_not_fail_init() {
    let tmp = project_with(r#"{"name": "app"}"#);
    let notifier = HttpNotifier::new("http://127.0.0.1:9", Duration::from_secs(2));

    let report = init::run_init(
        tmp.path(),
        &InitArgs {
            typescript: Some(false),
            emails_dir: None,
        },
        &ScriptedPrompter::new([Answer::Text("dev@example.com".into())]),
        &notifier,
        launch,
    )
    .unwrap();

    assert!(matches!(
        report.contact,
        ContactOutcome::Notified(NotifyOutcome::Failed(_))
    ));
    assert_eq!(report.preview.export.artifact_count(), 4);
}

//! Interactive prompts behind a trait.
//!
//! `init` asks at most two questions. [`TerminalPrompter`] asks them with
//! inquire; [`ScriptedPrompter`] replays prepared answers, which is what
//! tests and non-interactive callers use.

use std::collections::VecDeque;
use std::io::IsTerminal;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt cancelled")]
    Cancelled,
    #[error("Prompt failed: {0}")]
    Failed(String),
}

pub trait Prompter {
    /// Yes/no question with a suggested default.
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PromptError>;

    /// Free text question. An empty string means "no answer".
    fn ask(&self, question: &str) -> Result<String, PromptError>;
}

/// Real terminal prompts.
///
/// When stdin is not a terminal nothing is asked: `confirm` returns the
/// default and `ask` returns an empty answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

fn map_inquire_error(e: inquire::InquireError) -> PromptError {
    match e {
        inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted => {
            PromptError::Cancelled
        }
        other => PromptError::Failed(other.to_string()),
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PromptError> {
        if !std::io::stdin().is_terminal() {
            return Ok(default);
        }
        inquire::Confirm::new(question)
            .with_default(default)
            .prompt()
            .map_err(map_inquire_error)
    }

    fn ask(&self, question: &str) -> Result<String, PromptError> {
        if !std::io::stdin().is_terminal() {
            return Ok(String::new());
        }
        inquire::Text::new(question)
            .prompt()
            .map(|answer| answer.trim().to_string())
            .map_err(map_inquire_error)
    }
}

/// A prepared answer for [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Confirm(bool),
    Text(String),
}

/// Replays answers in order and records every question asked.
///
/// Once the script runs out, `confirm` takes the default and `ask` gets an
/// empty answer. An answer of the wrong kind is a [`PromptError::Failed`].
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().map(|q| q.clone()).unwrap_or_default()
    }

    fn next(&self, question: &str) -> Option<Answer> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.to_string());
        }
        self.answers.lock().ok().and_then(|mut a| a.pop_front())
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PromptError> {
        match self.next(question) {
            None => Ok(default),
            Some(Answer::Confirm(value)) => Ok(value),
            Some(other) => Err(PromptError::Failed(format!(
                "expected a yes/no answer for {question:?}, got {other:?}"
            ))),
        }
    }

    fn ask(&self, question: &str) -> Result<String, PromptError> {
        match self.next(question) {
            None => Ok(String::new()),
            Some(Answer::Text(text)) => Ok(text),
            Some(other) => Err(PromptError::Failed(format!(
                "expected a text answer for {question:?}, got {other:?}"
            ))),
        }
    }
}

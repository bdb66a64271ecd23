//! Best-effort signup notification.
//!
//! The address entered during `init` is POSTed as `{"email": ...}` to
//! `<base_url>/api/users`. The result is a [`NotifyOutcome`] value rather
//! than a `Result`: callers report it and carry on, a failure here can never
//! fail a command.

use serde::Serialize;
use std::time::Duration;

/// Path appended to the configured API base URL.
pub const USERS_PATH: &str = "/api/users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Failed(String),
}

impl NotifyOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotifyOutcome::Sent)
    }
}

pub trait Notifier {
    fn notify(&self, email: &str) -> NotifyOutcome;
}

#[derive(Serialize)]
struct SignupBody<'a> {
    email: &'a str,
}

/// Notifier backed by a blocking HTTP client with a hard timeout.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    endpoint: String,
    timeout: Duration,
}

impl HttpNotifier {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint(base_url),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `<base_url>/api/users`, tolerating a trailing slash on the base.
pub fn endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), USERS_PATH)
}

impl Notifier for HttpNotifier {
    fn notify(&self, email: &str) -> NotifyOutcome {
        let client = match reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => return NotifyOutcome::Failed(format!("HTTP client unavailable: {e}")),
        };

        tracing::debug!("POST {}", self.endpoint);
        match client
            .post(&self.endpoint)
            .json(&SignupBody { email })
            .send()
        {
            Ok(response) if response.status().is_success() => NotifyOutcome::Sent,
            Ok(response) => NotifyOutcome::Failed(format!(
                "{} responded {}",
                self.endpoint,
                response.status()
            )),
            Err(e) if e.is_timeout() => NotifyOutcome::Failed(format!(
                "{} timed out after {}s",
                self.endpoint,
                self.timeout.as_secs()
            )),
            Err(e) => NotifyOutcome::Failed(format!("HTTP request failed: {e}")),
        }
    }
}

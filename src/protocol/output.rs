use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::Action;
use crate::invoke::InvokeError;
use crate::product::{Outcome, UpdateError};

/// The output written to stdout after a hook invocation.
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    pub outcome: Status,
    /// crop's JSON on success, `{}` otherwise.
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// How the invocation ended, from the host's point of view.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// crop ran and printed JSON.
    Succeeded,
    /// crop ran and reported failure; the deploy may continue.
    Failed,
    /// The event is not the one this hook is configured for.
    Skipped,
    /// crop could not be run or broke its output contract.
    Error,
}

impl Status {
    /// Process exit code for the hook binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Error => 1,
            Status::Succeeded | Status::Failed | Status::Skipped => 0,
        }
    }
}

/// Structured diagnostics for a failed invocation.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
}

impl ErrorReport {
    /// A report with only a kind and message, for errors outside crop itself.
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        ErrorReport {
            kind: kind.to_string(),
            message: message.into(),
            ..Default::default()
        }
    }
}

impl From<&InvokeError> for ErrorReport {
    fn from(err: &InvokeError) -> Self {
        let mut report = ErrorReport::new(err.kind(), err.to_string());
        match err {
            InvokeError::Launch { .. } => {}
            InvokeError::NonZeroExit {
                code,
                command,
                stderr,
                stdout,
            } => {
                report.exit_code = *code;
                report.command = Some(command.clone());
                report.stderr = Some(stderr.clone());
                report.stdout = Some(stdout.clone());
            }
            InvokeError::MalformedOutput {
                command, stdout, ..
            } => {
                report.exit_code = Some(0);
                report.command = Some(command.clone());
                report.stdout = Some(stdout.clone());
            }
            InvokeError::TimedOut { command, .. } => {
                report.command = Some(command.clone());
            }
        }
        report
    }
}

impl From<&UpdateError> for ErrorReport {
    fn from(err: &UpdateError) -> Self {
        match err {
            UpdateError::Invoke(e) => e.into(),
            UpdateError::ConfigValue(_) => ErrorReport::new(err.kind(), err.to_string()),
        }
    }
}

impl HookOutput {
    /// Output for a finished updater run.
    pub fn from_run(action: Action, run: &Result<Outcome, UpdateError>) -> Self {
        let (outcome, result, error) = match run {
            Ok(outcome) => match outcome {
                Outcome::Succeeded(_) => (Status::Succeeded, outcome.result(), None),
                Outcome::Failed(e) => {
                    (Status::Failed, outcome.result(), Some(ErrorReport::from(e)))
                }
            },
            Err(e) => (Status::Error, empty(), Some(ErrorReport::from(e))),
        };
        HookOutput {
            event: None,
            action: Some(action),
            outcome,
            result,
            error,
        }
    }

    /// Output for an event this hook does not handle.
    pub fn skipped(event: &str) -> Self {
        HookOutput {
            event: Some(event.to_string()),
            action: None,
            outcome: Status::Skipped,
            result: empty(),
            error: None,
        }
    }

    /// Output for a failure before crop could be considered at all.
    pub fn error(kind: &str, message: impl Into<String>) -> Self {
        HookOutput {
            event: None,
            action: None,
            outcome: Status::Error,
            result: empty(),
            error: Some(ErrorReport::new(kind, message)),
        }
    }

    pub fn with_event(mut self, event: &str) -> Self {
        self.event = Some(event.to_string());
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}

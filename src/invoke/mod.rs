//! Running the crop executable.
//!
//! [`CropRunner`] is the seam between the product updater and the operating
//! system. [`DuctRunner`] spawns the real process; tests substitute canned
//! runners so the updater can be exercised without a crop binary.

mod duct_runner;

use std::time::Duration;

pub use duct_runner::DuctRunner;

use crate::domain::CropArgs;

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "crop";

/// Captured result of a finished crop process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CropOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<&std::process::Output> for CropOutput {
    fn from(output: &std::process::Output) -> Self {
        CropOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs crop with a prepared argument list and waits for it to exit.
pub trait CropRunner {
    /// Executable name or path, used in diagnostics.
    fn program(&self) -> &str;

    /// Spawn crop and block until it exits.
    ///
    /// A non-zero exit is a normal `Ok` return; only failures to start or
    /// finish the process are errors.
    fn run(&self, args: &CropArgs) -> Result<CropOutput, InvokeError>;
}

/// Errors from invoking crop and interpreting its output.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InvokeError {
    #[error("failed to start '{program}': {source}")]
    #[diagnostic(
        code(crop::launch),
        help("install crop or point CROP_PROGRAM / the `program` setting at it")
    )]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command to crop exited {}", exit_label(*.code))]
    #[diagnostic(code(crop::non_zero_exit))]
    NonZeroExit {
        code: Option<i32>,
        command: String,
        stderr: String,
        stdout: String,
    },

    #[error("crop exited 0 but printed invalid JSON: {source}")]
    #[diagnostic(
        code(crop::malformed_output),
        help("crop must print a single JSON value on stdout when it succeeds")
    )]
    MalformedOutput {
        command: String,
        stdout: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("crop did not exit within {timeout:?}")]
    #[diagnostic(code(crop::timed_out), help("raise `timeout-secs` or set it to 0"))]
    TimedOut { command: String, timeout: Duration },
}

impl InvokeError {
    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            InvokeError::Launch { .. } => "launch",
            InvokeError::NonZeroExit { .. } => "non-zero-exit",
            InvokeError::MalformedOutput { .. } => "malformed-output",
            InvokeError::TimedOut { .. } => "timed-out",
        }
    }

    /// Whether the failure is reported by crop itself and may be swallowed.
    ///
    /// Everything else means crop could not be run or broke its output contract.
    pub fn is_soft(&self) -> bool {
        matches!(self, InvokeError::NonZeroExit { .. })
    }
}

/// Render an exit code for log lines.
pub(crate) fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_only_for_zero() {
        let out = |code| CropOutput {
            code,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(out(Some(0)).success());
        assert!(!out(Some(1)).success());
        assert!(!out(None).success());
    }

    #[test]
    fn non_zero_exit_message_includes_code() {
        let err = InvokeError::NonZeroExit {
            code: Some(3),
            command: "crop update-product".into(),
            stderr: String::new(),
            stdout: String::new(),
        };
        assert_eq!(err.to_string(), "command to crop exited 3");
        assert!(err.is_soft());
        assert_eq!(err.kind(), "non-zero-exit");
    }

    #[test]
    fn signal_exit_is_labelled() {
        assert_eq!(exit_label(None), "by signal");
        assert_eq!(exit_label(Some(137)), "137");
    }

    #[test]
    fn launch_and_malformed_are_hard() {
        let launch = InvokeError::Launch {
            program: "crop".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!launch.is_soft());
        assert!(launch.to_string().starts_with("failed to start 'crop'"));

        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let malformed = InvokeError::MalformedOutput {
            command: "crop upload-project".into(),
            stdout: "nope".into(),
            source,
        };
        assert!(!malformed.is_soft());
        assert_eq!(malformed.kind(), "malformed-output");
    }

    #[test]
    fn timed_out_reports_seconds() {
        let err = InvokeError::TimedOut {
            command: "crop upload-project".into(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "crop did not exit within 5s");
    }

    #[test]
    fn sub_second_timeout_keeps_its_precision() {
        let err = InvokeError::TimedOut {
            command: "crop upload-project".into(),
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "crop did not exit within 250ms");
    }
}

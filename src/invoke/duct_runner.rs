use std::time::Duration;

use super::{CropOutput, CropRunner, InvokeError, DEFAULT_PROGRAM};
use crate::domain::CropArgs;

/// Spawns crop as a child process through `duct`.
///
/// Stdout and stderr are captured, stdin is closed, and a non-zero exit is
/// returned as output rather than an error. With a timeout set, a child that
/// outlives it is killed.
#[derive(Debug, Clone)]
pub struct DuctRunner {
    program: String,
    timeout: Option<Duration>,
}

impl DuctRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Bound the wait. `None` (or a zero duration) waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    #[cfg(test)]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for DuctRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CropRunner for DuctRunner {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &CropArgs) -> Result<CropOutput, InvokeError> {
        let launch_error = |source| InvokeError::Launch {
            program: self.program.clone(),
            source,
        };

        tracing::debug!(
            program = %self.program,
            args = ?args.as_slice(),
            timeout_secs = self.timeout.map(|t| t.as_secs()),
            "spawning crop"
        );

        let handle = duct::cmd(&self.program, args.as_slice())
            .stdin_null()
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .start()
            .map_err(launch_error)?;

        let Some(timeout) = self.timeout else {
            let output = handle.wait().map_err(launch_error)?;
            return Ok(CropOutput::from(output));
        };

        match handle.wait_timeout(timeout).map_err(launch_error)? {
            Some(output) => Ok(CropOutput::from(output)),
            None => {
                if let Err(e) = handle.kill() {
                    tracing::warn!(error = %e, "failed to kill timed-out crop process");
                }
                Err(InvokeError::TimedOut {
                    command: args.command_line(&self.program),
                    timeout,
                })
            }
        }
    }
}

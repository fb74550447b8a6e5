//! The product updater: build crop arguments from host state, run crop, log
//! what happened.

use serde_json::{Map, Value};

use crate::domain::{crop_config_value, Action, ConfigValueError, CropArgs, InvocationOptions};
use crate::invoke::{exit_label, CropOutput, CropRunner, InvokeError};
use crate::logger::Logger;

/// How a crop invocation ended when it did not fail hard.
#[derive(Debug)]
pub enum Outcome {
    /// crop exited 0; the parsed JSON it printed.
    Succeeded(Value),
    /// crop reported failure. Always an [`InvokeError::NonZeroExit`].
    Failed(InvokeError),
}

impl Outcome {
    /// The nominal result: crop's JSON on success, an empty mapping otherwise.
    pub fn result(&self) -> Value {
        match self {
            Outcome::Succeeded(value) => value.clone(),
            Outcome::Failed(_) => Value::Object(Map::new()),
        }
    }

    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Failures that stop the updater before or while talking to crop.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum UpdateError {
    #[error(transparent)]
    #[diagnostic(code(crop::config_value))]
    ConfigValue(#[from] ConfigValueError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invoke(#[from] InvokeError),
}

impl UpdateError {
    pub fn kind(&self) -> &'static str {
        match self {
            UpdateError::ConfigValue(_) => "config-value",
            UpdateError::Invoke(e) => e.kind(),
        }
    }
}

/// Runs crop for one deploy.
///
/// Holds only the capabilities it uses: a way to run crop and a place to log.
pub struct ProductUpdater<R, L> {
    runner: R,
    logger: L,
}

impl<R: CropRunner, L: Logger> ProductUpdater<R, L> {
    pub fn new(runner: R, logger: L) -> Self {
        Self { runner, logger }
    }

    /// `crop update-product`, passing config, version and description.
    pub fn update_product(
        &self,
        config_tree: &Value,
        options: &InvocationOptions,
    ) -> Result<Outcome, UpdateError> {
        self.run(Action::UpdateProduct, config_tree, options)
    }

    /// `crop upload-project`, passing config and version only.
    pub fn upload_project(
        &self,
        config_tree: &Value,
        options: &InvocationOptions,
    ) -> Result<Outcome, UpdateError> {
        self.run(Action::UploadProject, config_tree, options)
    }

    /// Build the argument list for `action` and run crop with it.
    ///
    /// A non-zero exit from crop is logged and returned as
    /// [`Outcome::Failed`]. Launch failures, timeouts and unparseable output
    /// are logged and returned as errors.
    pub fn run(
        &self,
        action: Action,
        config_tree: &Value,
        options: &InvocationOptions,
    ) -> Result<Outcome, UpdateError> {
        let args = self.args_for(action, config_tree, options)?;
        let outcome = self.invoke(&args)?;
        self.logger.log(&format!("RESULT {}", outcome.result()));
        Ok(outcome)
    }

    /// The argument list `run` would pass to crop.
    pub fn args_for(
        &self,
        action: Action,
        config_tree: &Value,
        options: &InvocationOptions,
    ) -> Result<CropArgs, UpdateError> {
        let config = crop_config_value(config_tree).inspect_err(|e| {
            self.logger.log(&format!("Invalid crop config: {e}"));
        })?;
        Ok(CropArgs::build(action, config.as_deref(), options))
    }

    /// Run crop with a prepared argument list and interpret its output.
    pub fn invoke(&self, args: &CropArgs) -> Result<Outcome, InvokeError> {
        let command = args.command_line(self.runner.program());
        let output = self.runner.run(args).inspect_err(|e| self.report_hard(e))?;

        if !output.success() {
            let CropOutput {
                code,
                stdout,
                stderr,
            } = output;
            self.logger
                .log(&format!("Command to CROP exited {}", exit_label(code)));
            self.logger.log(&format!("Command was: {command}"));
            self.logger.log(&format!("STDERR: {stderr}"));
            self.logger.log(&format!("STDOUT: {stdout}"));
            return Ok(Outcome::Failed(InvokeError::NonZeroExit {
                code,
                command,
                stderr,
                stdout,
            }));
        }

        match serde_json::from_str(&output.stdout) {
            Ok(value) => Ok(Outcome::Succeeded(value)),
            Err(source) => {
                let err = InvokeError::MalformedOutput {
                    command,
                    stdout: output.stdout,
                    source,
                };
                self.report_hard(&err);
                Err(err)
            }
        }
    }

    fn report_hard(&self, err: &InvokeError) {
        match err {
            InvokeError::Launch { program, source } => {
                self.logger.log(&format!("Could not start {program}: {source}"));
            }
            InvokeError::MalformedOutput {
                command,
                stdout,
                source,
            } => {
                self.logger
                    .log(&format!("CROP exited 0 but its output is not JSON: {source}"));
                self.logger.log(&format!("Command was: {command}"));
                self.logger.log(&format!("STDOUT: {stdout}"));
            }
            InvokeError::TimedOut { command, timeout } => {
                self.logger
                    .log(&format!("CROP did not exit within {timeout:?} and was killed"));
                self.logger.log(&format!("Command was: {command}"));
            }
            InvokeError::NonZeroExit { .. } => return,
        }
        tracing::error!(kind = err.kind(), error = %err, "crop invocation failed");
    }
}

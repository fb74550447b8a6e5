use std::io::Read;
use std::path::Path;

use crate::logger::TracingLogger;
use crate::product::ProductUpdater;
use crate::protocol::{HookInput, HookOutput};

use super::{emit, finish, load_settings, report_fatal, runner_for};

/// Failure to obtain a lifecycle event from stdin.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InputError {
    #[error("failed to read hook input: {0}")]
    #[diagnostic(code(hook::read))]
    Read(#[from] std::io::Error),
    #[error("invalid hook input JSON: {0}")]
    #[diagnostic(
        code(hook::json),
        help("expected {{\"event\": ..., \"variables\": {{...}}, \"options\": {{...}}}}")
    )]
    Json(#[from] serde_json::Error),
}

/// Execute the hook subcommand: read an event from stdin, run crop if the
/// event matches, write JSON to stdout. Returns the process exit code.
///
/// A crop run that reports failure still exits 0 so the deploy continues.
/// Bad settings, bad input, or a crop that cannot be run or answers with
/// invalid JSON exit 1.
pub fn run(config_path: Option<&Path>, program: Option<&str>) -> i32 {
    let settings = match load_settings(config_path, program) {
        Ok(settings) => settings,
        Err(e) => {
            let code = emit(&HookOutput::error("config", format!("Config error: {e}")));
            report_fatal(e);
            return code;
        }
    };

    let input = match read_input(std::io::stdin().lock()) {
        Ok(input) => input,
        Err(e) => {
            let code = emit(&HookOutput::error("input", format!("Error: {e}")));
            report_fatal(e);
            return code;
        }
    };

    if input.event != settings.event {
        tracing::debug!(event = %input.event, expected = %settings.event, "ignoring event");
        return emit(&HookOutput::skipped(&input.event));
    }

    tracing::info!(event = %input.event, action = %settings.action, "running crop");
    let updater = ProductUpdater::new(runner_for(&settings), TracingLogger);
    let run = updater.run(settings.action, &input.variables, &input.options);
    let output = HookOutput::from_run(settings.action, &run).with_event(&input.event);
    finish(output, run)
}

fn read_input(mut reader: impl Read) -> Result<HookInput, InputError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(serde_json::from_str(&input)?)
}

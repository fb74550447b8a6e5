pub mod action;
pub mod hook;

use std::path::Path;

use crate::config::{ConfigError, Settings};
use crate::invoke::DuctRunner;
use crate::product::{Outcome, UpdateError};
use crate::protocol::HookOutput;

/// Load settings and apply the `--program` / `CROP_PROGRAM` override.
fn load_settings(
    config_path: Option<&Path>,
    program: Option<&str>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::load_optional(config_path)?;
    if let Some(program) = program.filter(|p| !p.is_empty()) {
        settings.program = program.to_string();
    }
    Ok(settings)
}

fn runner_for(settings: &Settings) -> DuctRunner {
    DuctRunner::new(settings.program.clone()).with_timeout(settings.timeout)
}

/// Print a fatal error to stderr as a miette diagnostic.
fn report_fatal<E>(err: E)
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    eprintln!("{:?}", miette::Report::new(err));
}

/// Emit the output for an updater run; hard failures also go to stderr.
fn finish(output: HookOutput, run: Result<Outcome, UpdateError>) -> i32 {
    let code = emit(&output);
    if let Err(e) = run {
        report_fatal(e);
    }
    code
}

/// Serialize a HookOutput to JSON, print it to stdout, and return its exit code.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen with the derived
/// `Serialize` impls on strings, enums and `serde_json::Value`.
fn emit(output: &HookOutput) -> i32 {
    let json = serde_json::to_string(output).expect("HookOutput serialization cannot fail");
    println!("{json}");
    output.exit_code()
}

use std::path::Path;

use serde_json::{json, Value};

use crate::domain::{Action, InvocationOptions};
use crate::logger::TracingLogger;
use crate::product::ProductUpdater;
use crate::protocol::HookOutput;

use super::{emit, finish, load_settings, report_fatal, runner_for};

/// Arguments for running one crop action directly, outside a lifecycle event.
#[derive(Debug, Default)]
pub struct ActionRequest<'a> {
    pub config_path: Option<&'a Path>,
    pub program: Option<&'a str>,
    /// Value for `--config`, as the host would place it in its tree.
    pub crop_config: Option<&'a str>,
    pub options: InvocationOptions,
    /// Print the crop invocation instead of running it.
    pub dry_run: bool,
}

/// Run `action` once and write the same JSON output the hook writes.
pub fn run(action: Action, request: ActionRequest<'_>) -> i32 {
    let settings = match load_settings(request.config_path, request.program) {
        Ok(settings) => settings,
        Err(e) => {
            let code = emit(&HookOutput::error("config", format!("Config error: {e}")));
            report_fatal(e);
            return code;
        }
    };

    let tree = config_tree(request.crop_config);
    let updater = ProductUpdater::new(runner_for(&settings), TracingLogger);

    if request.dry_run {
        let args = match updater.args_for(action, &tree, &request.options) {
            Ok(args) => args,
            Err(e) => {
                let run = Err(e);
                return finish(HookOutput::from_run(action, &run), run);
            }
        };
        println!(
            "{}",
            json!({"program": settings.program, "args": args.as_slice()})
        );
        return 0;
    }

    let run = updater.run(action, &tree, &request.options);
    finish(HookOutput::from_run(action, &run), run)
}

/// A minimal host configuration tree carrying only the crop config value.
fn config_tree(crop_config: Option<&str>) -> Value {
    match crop_config {
        Some(config) => json!({"service": {"custom": {"crop": {"config": config}}}}),
        None => Value::Null,
    }
}

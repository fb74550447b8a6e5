pub mod config;
pub mod domain;
pub mod invoke;
pub mod logger;
pub mod product;
pub mod protocol;

pub(crate) mod cli;

pub use cli::action::ActionRequest;

/// Run the hook subcommand: read a lifecycle event from stdin, run crop if
/// it is the configured event, write JSON to stdout. Returns the exit code.
///
/// This is the binary entry point. Library callers should use
/// [`product::ProductUpdater`] directly.
pub fn run_hook(config_path: Option<&std::path::Path>, program: Option<&str>) -> i32 {
    cli::hook::run(config_path, program)
}

/// Run one crop action directly and write JSON to stdout. Returns the exit code.
pub fn run_action(action: domain::Action, request: ActionRequest<'_>) -> i32 {
    cli::action::run(action, request)
}

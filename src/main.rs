use clap::{Args, Parser, Subcommand};
use crop_deploy_hook::domain::{Action, InvocationOptions};
use crop_deploy_hook::ActionRequest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Deploy lifecycle hook that registers products with the crop CLI.
#[derive(Debug, Parser)]
#[command(name = "crop-deploy-hook", version, about)]
struct Cli {
    /// Path to the KDL settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// crop executable to run (overrides the settings file)
    #[arg(long, global = true, env = "CROP_PROGRAM")]
    program: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run as a deploy lifecycle hook (reads the event from stdin, writes stdout)
    Hook,
    /// Run `crop update-product` once
    UpdateProduct {
        #[command(flatten)]
        common: ActionArgs,
        /// Description of this product version
        #[arg(long)]
        description: Option<String>,
    },
    /// Run `crop upload-project` once
    UploadProject {
        #[command(flatten)]
        common: ActionArgs,
    },
}

#[derive(Debug, Args)]
struct ActionArgs {
    /// Value passed to crop as `--config`
    #[arg(long = "crop-config")]
    crop_config: Option<String>,
    /// Product version passed to crop as `--version`
    #[arg(long = "product-version")]
    product_version: Option<String>,
    /// Print the crop invocation as JSON instead of running it
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let program = cli.program.as_deref();

    let code = match cli.command {
        Commands::Hook => crop_deploy_hook::run_hook(config, program),
        Commands::UpdateProduct {
            common,
            description,
        } => run_action(Action::UpdateProduct, config, program, common, description),
        Commands::UploadProject { common } => {
            run_action(Action::UploadProject, config, program, common, None)
        }
    };
    std::process::exit(code);
}

fn run_action(
    action: Action,
    config: Option<&std::path::Path>,
    program: Option<&str>,
    args: ActionArgs,
    description: Option<String>,
) -> i32 {
    crop_deploy_hook::run_action(
        action,
        ActionRequest {
            config_path: config,
            program,
            crop_config: args.crop_config.as_deref(),
            options: InvocationOptions {
                version: args.product_version,
                description,
            },
            dry_run: args.dry_run,
        },
    )
}

/// Logs go to stderr; stdout carries the JSON result.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CROP_HOOK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

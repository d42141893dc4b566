use anyhow::Result;
use ncdrecon::cli::{parse_args, Cli, Commands};
use ncdrecon::commands::{diff, init, reconcile, validate};
use ncdrecon::config::{self, NcdreconConfig};

fn main() {
    env_logger::init();

    match run(parse_args()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let settings = resolve_settings(&cli)?;

    match cli.command {
        Commands::Reconcile {
            adjusted,
            adjustments,
            format,
            output,
            strict,
        } => reconcile::run(reconcile::ReconcileOptions {
            adjusted,
            adjustments,
            format: format.into(),
            output,
            strict,
            settings,
        }),
        Commands::Diff {
            baseline,
            proposed,
            format,
            output,
            deny_empty,
        } => diff::run(diff::DiffOptions {
            baseline,
            proposed,
            format: format.into(),
            output,
            deny_empty,
            settings,
        }),
        Commands::Validate {
            record,
            format,
            output,
            strict,
        } => validate::run(validate::ValidateOptions {
            record,
            format: format.into(),
            output,
            strict,
            settings,
        }),
        Commands::Init { force } => {
            init::init_config(force)?;
            Ok(true)
        }
    }
}

/// An explicit `--config` wins; otherwise the nearest discovered file.
fn resolve_settings(cli: &Cli) -> Result<NcdreconConfig> {
    match &cli.config {
        Some(path) => config::load_from_path(path),
        None => Ok(config::get_config().clone()),
    }
}

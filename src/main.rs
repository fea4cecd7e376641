use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, error, info};

use rusty_reel::cli::Args;
use rusty_reel::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};

fn main() -> ExitCode {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    debug!("Arguments: {args:?}");

    let outcome = if args.init_config {
        init_config()
    } else {
        run(&args)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Handle --init-config: write a default rusty-reel.toml.
fn init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("{DEFAULT_CONFIG_FILE} already exists; remove it first or edit it manually");
    }
    std::fs::write(path, Config::default_toml()?)
        .with_context(|| format!("writing {DEFAULT_CONFIG_FILE}"))?;
    info!("created {DEFAULT_CONFIG_FILE}");
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = Config::resolve(args)?;
    info!(
        "analysing {} in {}",
        config.analysis.actor, config.source.location
    );

    let report = rusty_reel::run(&config)?;
    let rendered = match config.report.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => report.to_json().context("serialising report")? + "\n",
    };

    match &config.report.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

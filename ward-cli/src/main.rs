mod cli;
mod commands;
mod logger;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use commands::CommandOutcome;
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing::debug;
use ward_core::{Config, Ward};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(cli) {
        Ok(CommandOutcome::Done) => ExitCode::SUCCESS,
        Ok(CommandOutcome::Rejected) => ExitCode::from(2),
        Err(e) => {
            eprintln!("ward: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<CommandOutcome> {
    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let ward = Ward::with_config(config)?;
    debug!(
        data_dir = %ward.config.data_dir.display(),
        reference_time = %ward.config.reference_time,
        "ward opened"
    );

    let renderer = Renderer::new(Some(RenderOptions {
        datetime_format: ward.config.display_datetime_format.clone(),
        use_color: cli.color.use_color(),
    }));

    commands::run(cli.command, &ward, &renderer)
}

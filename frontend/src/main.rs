use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

mod app;
mod boot;
mod cli;
mod config;
mod error;
mod input;
mod logging;
mod overlay;
mod screenshot;
mod video;

use cli::Cli;
use config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_deref()).and_then(|mut loaded| {
        loaded.config.apply_cli(&cli);
        loaded.config.validate()?;
        Ok(loaded)
    });

    // Logging comes up even when the config is broken, so the failure is
    // reported the same way as everything else.
    let level = match &loaded {
        Ok(loaded) => loaded.config.debug.log_level.clone(),
        Err(_) => cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
    };
    if let Err(e) = logging::init(&level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(source = %loaded.source, "configuration loaded");

    match app::run(&loaded.config, cli.frames) {
        Ok(frames) => {
            info!(frames, "shut down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "startup failed");
            ExitCode::FAILURE
        }
    }
}

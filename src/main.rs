mod app;
mod cli;
mod config;
mod consts;
mod data;
mod error;
mod failure;
mod output;
mod state;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::CommandContext;
use cli::{Cli, Commands};
use config::Config;
use failure::{Failure, normalize};
use utils::Timezone;

fn init_logging(debug: bool, ansi: bool) {
    let default = if debug { "semplan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SEMPLAN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .try_init();
}

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);
    init_logging(cli.debug, cli.use_color());
    if let Some(path) = &config.source {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let timezone = match Timezone::parse(cli.timezone.as_deref()) {
        Ok(tz) => tz,
        Err(e) => {
            eprintln!("{}", normalize(&Failure::native(e)));
            std::process::exit(2);
        }
    };

    let ctx = CommandContext {
        cli: &cli,
        timezone,
        data_dir: config.data_dir(),
    };

    let command = cli
        .command
        .clone()
        .unwrap_or(Commands::Week { action: None });
    let action = command.action();
    if let Err(e) = app::run(command, &ctx) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Failed to {action}: {}", normalize(&Failure::native(e)));
        std::process::exit(1);
    }
}

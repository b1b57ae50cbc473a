mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("updog_cli=warn,updog_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(&args.config, args.data_dir.as_deref());

    match args.command {
        Command::Games => commands::games::run(),
        Command::Import { game, file } => commands::import::run(&config, game, &file),
        Command::Score { game } => commands::score::run(&config, game),
        Command::Export {
            game,
            format,
            output,
            template,
        } => commands::export::run(
            &config,
            game,
            format,
            output.as_deref(),
            template.as_deref(),
        ),
        Command::Status { game, json } => commands::status::run(&config, game, json),
        Command::Clear { game } => commands::clear::run(&config, game),
    }
}

//! `tasklist` binary: parse flags, load settings, start logging, run the UI.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use tasklist::cli::{Cli, Commands};
use tasklist::config::Config;
use tasklist::logging::init_logging;
use tasklist::state::TodoState;
use tasklist::tui::run::run_tui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(cli.config.as_deref()).context("load settings")?;
    cli.apply_overrides(&mut config);
    config.validate().context("validate settings")?;

    // Held until exit so buffered log lines are flushed.
    let _log_guard = match &config.log_dir {
        Some(dir) => Some(init_logging(&config.log_level, dir).context("initialise logging")?),
        None => None,
    };

    run_tui(TodoState::new(&config)).context("run terminal ui")?;
    Ok(())
}

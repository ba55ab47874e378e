mod cli;
mod commands;
mod config;
mod exec;
mod observability;
mod venv;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Venv) => commands::venv::cmd_venv(&cli.venv_dir),
        Some(Commands::Install) => commands::install::cmd_install(&cli.venv_dir),
        None => commands::menu::cmd_menu(&cli.venv_dir),
    }
}

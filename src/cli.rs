use clap::{Parser, Subcommand};

use crate::config::env_keys;
use crate::venv::DEFAULT_VENV_DIR;

/// pysetup - bootstrap a Python project environment
#[derive(Parser, Debug)]
#[command(name = "pysetup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Virtual environment directory (default: .venv)
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = env_keys::PYSETUP_VENV_DIR,
        default_value = DEFAULT_VENV_DIR
    )]
    pub venv_dir: String,

    /// Without a subcommand, the interactive menu is shown
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the virtual environment if it does not exist
    ///
    /// Skips creation when the directory is already present and prints
    /// activation instructions either way.
    Venv,

    /// Compile and install pinned requirements
    ///
    /// Ensures pip-compile (pip-tools) is available — installing it when
    /// missing — then compiles requirements.in into requirements.txt and
    /// installs the resulting lockfile.
    Install,
}

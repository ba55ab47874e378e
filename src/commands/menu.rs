//! Interactive menu shown when pysetup is invoked without a subcommand.

use std::io::BufRead;

use anyhow::Result;

use crate::commands::{install, venv};

/// Menu loop: dispatch to the same command functions as the subcommands.
/// A failed command is reported and the menu continues; EOF on stdin exits.
pub fn cmd_menu(venv_dir: &str) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        eprintln!();
        eprintln!("{}", "=".repeat(50));
        eprintln!("🤖 Python Project Setup Assistant");
        eprintln!("{}", "=".repeat(50));
        eprintln!("1. 📁 Create the virtual environment ({})", venv_dir);
        eprintln!("2. 📦 Compile and install requirements");
        eprintln!("3. 🚪 Exit");
        eprintln!("{}", "-".repeat(50));
        eprint!("Choose an option (1-3): ");

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()), // EOF
        };

        match line.trim() {
            "1" => {
                if let Err(e) = venv::cmd_venv(venv_dir) {
                    eprintln!("❌ {:#}", e);
                }
            }
            "2" => {
                if let Err(e) = install::cmd_install(venv_dir) {
                    eprintln!("❌ {:#}", e);
                }
            }
            "3" => {
                eprintln!();
                eprintln!("👋 Happy coding!");
                return Ok(());
            }
            _ => eprintln!("🚨 Invalid option. Please select 1, 2, or 3."),
        }
    }
}

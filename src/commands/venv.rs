//! `pysetup venv` — create the virtual environment if absent.
//!
//! Flow:
//!   1. Inspect the venv directory (missing / valid / broken)
//!   2. When missing, spawn the system interpreter: `python3 -m venv <dir>`
//!   3. On success, upgrade pip and setuptools inside the new venv
//!
//! Failures are reported, not corrected; no retries.

use anyhow::Result;

use crate::exec;
use crate::venv::{self, VenvPaths, VenvState};

/// `pysetup venv`
pub fn cmd_venv(venv_dir: &str) -> Result<()> {
    let paths = VenvPaths::new(venv_dir);

    match venv::inspect(&paths) {
        VenvState::Valid => {
            eprintln!("⚠️ Directory '{}' already exists. Skipping creation.", venv_dir);
            eprintln!("   Activate it with: {}", paths.activate_hint());
            return Ok(());
        }
        VenvState::Broken => {
            anyhow::bail!(
                "existing '{}' looks broken ({} is missing). Delete it and re-run.",
                venv_dir,
                paths.python().display()
            );
        }
        VenvState::Missing => {}
    }

    let python = venv::which_python()?;
    eprintln!(
        "🚀 Creating virtual environment '{}' with {} ...",
        venv_dir,
        python.display()
    );

    if let Err(e) = exec::run_step(&python, &["-m", "venv", venv_dir]) {
        exec::report_failure(
            &format!("Could not create the virtual environment '{}'.", venv_dir),
            &e,
        );
        return Err(e.into());
    }

    eprintln!("✅ Virtual environment '{}' created successfully.", venv_dir);
    eprintln!("   Activate it with: {}", paths.activate_hint());

    upgrade_venv_tooling(&paths);
    Ok(())
}

/// Upgrade pip and setuptools inside a freshly created venv.
/// A failure here is reported but does not undo the created venv.
fn upgrade_venv_tooling(paths: &VenvPaths) {
    eprintln!("🛠 Upgrading pip and setuptools inside {} ...", paths.dir().display());
    let venv_python = paths.python();
    match exec::run_step(
        &venv_python,
        &["-m", "pip", "install", "--upgrade", "pip", "setuptools"],
    ) {
        Ok(_) => eprintln!("✅ pip and setuptools upgraded."),
        Err(e) => eprintln!("⚠️ Could not upgrade pip/setuptools: {}", e),
    }
}

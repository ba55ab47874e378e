//! `pysetup install` — compile and install pinned requirements.
//!
//! Flow:
//!   1. Require the venv to exist (everything installs into it, never into
//!      the system interpreter)
//!   2. Resolve pip-compile (venv script dir first, then PATH);
//!      install pip-tools via pip when missing
//!   3. Compile requirements.in → requirements.txt (unconditionally)
//!   4. Install packages from the generated lockfile
//!
//! Step 2 failures are reported with a message; step 3/4 failures propagate
//! as the process exit status.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::exec;
use crate::venv::{self, VenvPaths, VenvState};

/// Loose requirement specification, input to pip-compile.
pub const REQUIREMENTS_IN: &str = "requirements.in";
/// Pinned lockfile, output of pip-compile.
pub const REQUIREMENTS_TXT: &str = "requirements.txt";

/// `pysetup install`
pub fn cmd_install(venv_dir: &str) -> Result<()> {
    let paths = VenvPaths::new(venv_dir);

    // Step 1: refuse to install outside a venv
    if venv::inspect(&paths) != VenvState::Valid {
        anyhow::bail!(
            "virtual environment '{}' does not exist. Run 'pysetup venv' before installing requirements.",
            venv_dir
        );
    }

    // Step 2: ensure pip-compile is available
    let pip_compile = ensure_pip_compile(&paths)?;

    // Step 3: compile requirements.in → requirements.txt
    eprintln!("🚀 Compiling {} ...", REQUIREMENTS_IN);
    let (compiler, compile_args) = compile_invocation(pip_compile.as_deref(), &paths)?;
    let compile_args: Vec<&str> = compile_args.iter().map(String::as_str).collect();
    exec::run_step(&compiler, &compile_args).with_context(|| {
        format!(
            "Could not compile '{}'. Ensure '{}' exists.",
            REQUIREMENTS_IN, REQUIREMENTS_IN
        )
    })?;
    eprintln!("✅ {} compiled successfully.", REQUIREMENTS_TXT);

    // Step 4: install from the generated lockfile
    if !Path::new(REQUIREMENTS_TXT).exists() {
        anyhow::bail!(
            "'{}' was not generated by the compile step; nothing to install",
            REQUIREMENTS_TXT
        );
    }
    eprintln!("🚀 Installing packages from {} ...", REQUIREMENTS_TXT);
    let pip_python = venv::pip_python(&paths)?;
    exec::run_step(
        &pip_python,
        &["-m", "pip", "install", "-r", REQUIREMENTS_TXT],
    )
    .with_context(|| format!("Could not install packages from '{}'.", REQUIREMENTS_TXT))?;
    eprintln!("✅ All dependencies installed successfully.");

    Ok(())
}

/// Ensure pip-compile is resolvable, installing pip-tools when it is not.
///
/// Returns the resolved executable path, or `None` when pip-tools installed
/// but the executable still cannot be located (callers fall back to
/// `python -m piptools compile`).
fn ensure_pip_compile(paths: &VenvPaths) -> Result<Option<PathBuf>> {
    if let Some(found) = venv::resolve_pip_compile(paths) {
        eprintln!("✅ pip-compile found at {}", found.display());
        return Ok(Some(found));
    }

    eprintln!("📦 pip-compile not found. Installing pip-tools ...");
    let pip_python = venv::pip_python(paths)?;
    if let Err(e) = exec::run_step(&pip_python, &["-m", "pip", "install", "pip-tools"]) {
        exec::report_failure("Could not install 'pip-tools'.", &e);
        return Err(e.into());
    }
    eprintln!("✅ Installation completed successfully!");

    Ok(venv::resolve_pip_compile(paths))
}

/// Build the compile invocation: the pip-compile executable when resolved,
/// otherwise `python -m piptools compile` as a fallback.
fn compile_invocation(
    pip_compile: Option<&Path>,
    paths: &VenvPaths,
) -> Result<(PathBuf, Vec<String>)> {
    match pip_compile {
        Some(exe) => Ok((exe.to_path_buf(), vec![REQUIREMENTS_IN.to_string()])),
        None => {
            eprintln!(
                "⚠️ pip-compile executable not found; falling back to 'python -m piptools compile'."
            );
            let python = venv::pip_python(paths)?;
            Ok((
                python,
                vec![
                    "-m".to_string(),
                    "piptools".to_string(),
                    "compile".to_string(),
                    REQUIREMENTS_IN.to_string(),
                ],
            ))
        }
    }
}

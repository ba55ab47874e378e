//! Blocking external command execution with exit-code reporting.
//!
//! Each invocation runs to completion before the next statement executes.
//! No timeout, no cancellation.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use thiserror::Error;

use crate::observability;

/// Errors from a single external command invocation.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("command not found: '{0}'. Ensure it is installed and on PATH")]
    NotFound(String),

    #[error("failed to spawn '{cmd}': {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{cmd}' exited with status {code}")]
    Failed {
        cmd: String,
        code: i32,
        stderr: String,
    },
}

/// Render a command line for logging and error messages.
pub fn render_command(program: &Path, args: &[&str]) -> String {
    let mut s = program.display().to_string();
    for a in args {
        s.push(' ');
        s.push_str(a);
    }
    s
}

/// Run a command to completion, capturing output.
///
/// Returns `Err` when the command cannot be spawned or exits nonzero; the
/// captured stderr is carried in `ExecError::Failed` so callers can echo it.
pub fn run_step(program: &Path, args: &[&str]) -> Result<(), ExecError> {
    let rendered = render_command(program, args);
    tracing::info!(cmd = %rendered, "executing");

    let cwd = std::env::current_dir()
        .map(|d| d.to_string_lossy().to_string())
        .unwrap_or_default();
    observability::audit_command_invoked(&rendered, args, &cwd);

    let started = Instant::now();
    let out = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExecError::NotFound(program.display().to_string())
        } else {
            ExecError::Spawn {
                cmd: rendered.clone(),
                source: e,
            }
        }
    })?;

    let exit_code = out.status.code().unwrap_or(-1);
    observability::audit_execution_completed(
        &rendered,
        exit_code,
        started.elapsed().as_millis() as u64,
        out.stdout.len(),
    );

    if !out.status.success() {
        tracing::warn!(cmd = %rendered, exit_code, "command failed");
        return Err(ExecError::Failed {
            cmd: rendered,
            code: exit_code,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Print a failed step to stderr, echoing child stderr when available.
pub fn report_failure(context: &str, err: &ExecError) {
    eprintln!("❌ Error! {}", context);
    match err {
        ExecError::Failed { stderr, .. } if !stderr.is_empty() => {
            eprintln!("Error details (stderr):\n{}", stderr);
        }
        ExecError::Failed { .. } => {}
        other => eprintln!("{}", other),
    }
}

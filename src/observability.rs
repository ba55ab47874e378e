//! Observability: tracing init and the JSONL command audit log.
//!
//! Uses config::ObservabilityConfig for PYSETUP_QUIET, PYSETUP_LOG_LEVEL,
//! PYSETUP_LOG_JSON and PYSETUP_AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call at process startup.
/// When PYSETUP_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level: &str = if cfg.quiet {
        "pysetup=warn"
    } else {
        &cfg.log_level
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn get_audit_path() -> Option<String> {
    let path = crate::config::ObservabilityConfig::from_env().audit_log.clone()?;
    // Ensure parent dir exists
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &serde_json::Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

fn command_invoked_record(cmd: &str, args: &[&str], cwd: &str) -> serde_json::Value {
    json!({
        "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "event": "command_invoked",
        "cmd": cmd,
        "args": args,
        "cwd": cwd,
    })
}

fn execution_completed_record(
    cmd: &str,
    exit_code: i32,
    duration_ms: u64,
    stdout_len: usize,
) -> serde_json::Value {
    json!({
        "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "event": "execution_completed",
        "cmd": cmd,
        "exit_code": exit_code,
        "duration_ms": duration_ms,
        "stdout_len": stdout_len,
        "success": exit_code == 0,
    })
}

/// Audit: command_invoked (right before spawn)
pub fn audit_command_invoked(cmd: &str, args: &[&str], cwd: &str) {
    if let Some(path) = get_audit_path() {
        append_jsonl(&path, &command_invoked_record(cmd, args, cwd));
    }
}

/// Audit: execution_completed
pub fn audit_execution_completed(cmd: &str, exit_code: i32, duration_ms: u64, stdout_len: usize) {
    if let Some(path) = get_audit_path() {
        append_jsonl(
            &path,
            &execution_completed_record(cmd, exit_code, duration_ms, stdout_len),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_records_are_one_json_object_per_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("audit.jsonl");
        let path = path.to_str().unwrap();

        append_jsonl(
            path,
            &command_invoked_record("python3 -m venv .venv", &["-m", "venv", ".venv"], "/work"),
        );
        append_jsonl(path, &execution_completed_record("python3 -m venv .venv", 0, 12, 0));

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let invoked: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(invoked.is_object());
        assert_eq!(invoked["event"], "command_invoked");
        assert_eq!(invoked["cmd"], "python3 -m venv .venv");

        let completed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(completed["event"], "execution_completed");
        assert_eq!(completed["exit_code"], 0);
        assert_eq!(completed["success"], true);
    }

    #[test]
    fn test_completed_record_marks_nonzero_exit_as_failure() {
        let record = execution_completed_record("pip-compile requirements.in", 2, 40, 0);
        assert_eq!(record["success"], false);
        assert_eq!(record["exit_code"], 2);
    }
}

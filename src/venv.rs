//! Python virtual environment layout, inspection, and tool resolution.
//!
//! Venv layout differs per platform: executables live in `bin/` on Unix and
//! `Scripts\` on Windows. All path logic is concentrated here so commands
//! never touch the layout directly.

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Default virtual environment directory, relative to the working directory.
pub const DEFAULT_VENV_DIR: &str = ".venv";

/// Resolved paths inside a virtual environment directory.
#[derive(Debug, Clone)]
pub struct VenvPaths {
    dir: PathBuf,
}

impl VenvPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Script directory inside the venv (`bin` on Unix, `Scripts` on Windows).
    pub fn scripts_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.dir.join("Scripts")
        } else {
            self.dir.join("bin")
        }
    }

    /// Path to the Python interpreter inside the venv.
    pub fn python(&self) -> PathBuf {
        self.scripts_dir().join(exe("python"))
    }

    /// Path to the pip-compile executable inside the venv.
    pub fn pip_compile(&self) -> PathBuf {
        self.scripts_dir().join(exe("pip-compile"))
    }

    /// Shell instruction for activating the venv.
    pub fn activate_hint(&self) -> String {
        if cfg!(windows) {
            self.scripts_dir().join("activate").display().to_string()
        } else {
            format!("source {}", self.scripts_dir().join("activate").display())
        }
    }
}

fn exe(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Observed state of a venv directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvState {
    /// Directory does not exist
    Missing,
    /// Directory exists and contains a Python interpreter
    Valid,
    /// Directory exists but the interpreter is missing
    Broken,
}

/// Inspect the venv directory without touching it.
pub fn inspect(paths: &VenvPaths) -> VenvState {
    if !paths.dir().is_dir() {
        VenvState::Missing
    } else if paths.python().exists() {
        VenvState::Valid
    } else {
        VenvState::Broken
    }
}

/// Locate the system interpreter used to create venvs: python3, then python.
pub fn which_python() -> Result<PathBuf> {
    for name in ["python3", "python"] {
        if let Ok(p) = which::which(name) {
            return Ok(p);
        }
    }
    anyhow::bail!("python3 or python not found in PATH")
}

/// The interpreter to run pip with: always the venv's own Python.
/// `python -m pip` is the most reliable way to invoke pip in any environment.
/// Installs never target the system interpreter; when the venv is absent or
/// broken this errors and directs the user to `pysetup venv`.
pub fn pip_python(paths: &VenvPaths) -> Result<PathBuf> {
    match inspect(paths) {
        VenvState::Valid => Ok(paths.python()),
        VenvState::Missing => anyhow::bail!(
            "virtual environment '{}' does not exist. Run 'pysetup venv' first.",
            paths.dir().display()
        ),
        VenvState::Broken => anyhow::bail!(
            "virtual environment '{}' is broken ({} is missing). Delete it and run 'pysetup venv'.",
            paths.dir().display(),
            paths.python().display()
        ),
    }
}

/// Resolve pip-compile: the venv's script directory takes priority over PATH.
pub fn resolve_pip_compile(paths: &VenvPaths) -> Option<PathBuf> {
    let in_venv = paths.pip_compile();
    if in_venv.exists() {
        return Some(in_venv);
    }
    which::which("pip-compile").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    #[test]
    fn test_unix_layout() {
        let paths = VenvPaths::new(".venv");
        assert_eq!(paths.python(), PathBuf::from(".venv/bin/python"));
        assert_eq!(paths.pip_compile(), PathBuf::from(".venv/bin/pip-compile"));
        assert_eq!(paths.activate_hint(), "source .venv/bin/activate");
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_layout() {
        let paths = VenvPaths::new(".venv");
        assert!(paths.python().ends_with("Scripts\\python.exe"));
        assert!(paths.pip_compile().ends_with("Scripts\\pip-compile.exe"));
    }

    #[test]
    fn test_inspect_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = VenvPaths::new(tmp.path().join(".venv"));
        assert_eq!(inspect(&paths), VenvState::Missing);
    }

    #[test]
    fn test_inspect_broken_and_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = VenvPaths::new(tmp.path().join(".venv"));

        fs::create_dir_all(paths.scripts_dir()).unwrap();
        assert_eq!(inspect(&paths), VenvState::Broken);

        fs::write(paths.python(), "").unwrap();
        assert_eq!(inspect(&paths), VenvState::Valid);
    }

    #[test]
    fn test_pip_python_requires_venv() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = VenvPaths::new(tmp.path().join(".venv"));

        // Absent venv must not fall back to the system interpreter.
        let err = pip_python(&paths).unwrap_err();
        assert!(err.to_string().contains("pysetup venv"));

        fs::create_dir_all(paths.scripts_dir()).unwrap();
        fs::write(paths.python(), "").unwrap();
        assert_eq!(pip_python(&paths).unwrap(), paths.python());
    }

    #[test]
    fn test_pip_python_rejects_broken_venv() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = VenvPaths::new(tmp.path().join(".venv"));
        fs::create_dir_all(paths.scripts_dir()).unwrap();

        let err = pip_python(&paths).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_resolve_pip_compile_prefers_venv() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = VenvPaths::new(tmp.path().join(".venv"));
        fs::create_dir_all(paths.scripts_dir()).unwrap();
        fs::write(paths.pip_compile(), "").unwrap();

        let resolved = resolve_pip_compile(&paths).expect("resolves venv executable");
        assert_eq!(resolved, paths.pip_compile());
    }
}

//! Environment kind detection from the on-disk layout

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::{
    interfaces::EnvironmentKindClassifier,
    types::{EnvironmentKind, environment::root_from_executable},
};

/// `<project>-<8 char hash>`, how pipenv names virtualenvs it keeps centrally
static PIPENV_VENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+-[A-Za-z0-9_-]{8}$").expect("valid regex"));

/// Classifies environments by looking at marker files around the interpreter
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutKindClassifier;

impl LayoutKindClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentKindClassifier for LayoutKindClassifier {
    fn classify(&self, executable: &Path) -> EnvironmentKind {
        let root = root_from_executable(executable);

        if root.join("conda-meta").is_dir() {
            return EnvironmentKind::Conda;
        }

        let store = root.parent();
        let store_name = store
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let in_venv_store = store_name == "virtualenvs" || store_name == ".virtualenvs";

        if in_venv_store
            && store
                .and_then(|p| p.parent())
                .and_then(|p| p.file_name())
                .is_some_and(|n| n.to_string_lossy().eq_ignore_ascii_case("pypoetry"))
        {
            return EnvironmentKind::Poetry;
        }

        let env_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if in_venv_store && PIPENV_VENV_NAME.is_match(&env_name) {
            return EnvironmentKind::Pipenv;
        }

        if root.join("pyvenv.cfg").is_file() {
            return EnvironmentKind::VirtualEnv;
        }

        tracing::debug!("No environment markers under {}", root.display());
        EnvironmentKind::System
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn python_in(root: &Path) -> std::path::PathBuf {
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        let exe = bin.join("python");
        fs::write(&exe, "").unwrap();
        exe
    }

    #[test]
    fn test_detect_conda() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("envs").join("ml");
        fs::create_dir_all(root.join("conda-meta")).unwrap();
        let exe = python_in(&root);

        assert_eq!(LayoutKindClassifier::new().classify(&exe), EnvironmentKind::Conda);
    }

    #[test]
    fn test_detect_poetry() {
        let temp = TempDir::new().unwrap();
        let root = temp
            .path()
            .join("pypoetry")
            .join("virtualenvs")
            .join("webapp-Xf3kLm9q-py3.12");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("pyvenv.cfg"), "home = /usr/bin").unwrap();
        let exe = python_in(&root);

        assert_eq!(LayoutKindClassifier::new().classify(&exe), EnvironmentKind::Poetry);
    }

    #[test]
    fn test_detect_pipenv() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".virtualenvs").join("webapp-qxjmSuJu");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("pyvenv.cfg"), "home = /usr/bin").unwrap();
        let exe = python_in(&root);

        assert_eq!(LayoutKindClassifier::new().classify(&exe), EnvironmentKind::Pipenv);
    }

    #[test]
    fn test_detect_plain_venv() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("app").join(".venv");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("pyvenv.cfg"), "home = /usr/bin").unwrap();
        let exe = python_in(&root);

        assert_eq!(
            LayoutKindClassifier::new().classify(&exe),
            EnvironmentKind::VirtualEnv
        );
    }

    #[test]
    fn test_detect_system() {
        let temp = TempDir::new().unwrap();
        let exe = python_in(&temp.path().join("usr"));

        assert_eq!(LayoutKindClassifier::new().classify(&exe), EnvironmentKind::System);
    }
}

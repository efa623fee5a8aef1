use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// How a Python environment was created and who manages it.
///
/// Parsing ignores case and accepts `virtualenv` and `venv` for `VirtualEnv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EnvironmentKind {
    Conda,
    Pipenv,
    Poetry,
    VirtualEnv,
    System,
    Unknown,
}

impl FromStr for EnvironmentKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "conda" => Ok(EnvironmentKind::Conda),
            "pipenv" => Ok(EnvironmentKind::Pipenv),
            "poetry" => Ok(EnvironmentKind::Poetry),
            "virtual_env" | "virtualenv" | "venv" => Ok(EnvironmentKind::VirtualEnv),
            "system" => Ok(EnvironmentKind::System),
            "unknown" => Ok(EnvironmentKind::Unknown),
            _ => Err(Error::UnknownVariant {
                kind: "environment kind",
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for EnvironmentKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl EnvironmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentKind::Conda => "conda",
            EnvironmentKind::Pipenv => "pipenv",
            EnvironmentKind::Poetry => "poetry",
            EnvironmentKind::VirtualEnv => "virtual_env",
            EnvironmentKind::System => "system",
            EnvironmentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved Python runtime instance.
///
/// Records are produced by environment discovery and never change afterwards;
/// the builder methods only exist to assemble one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Path to the interpreter executable, the identity of the environment
    pub executable: PathBuf,
    pub kind: EnvironmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Environment root (`sys.prefix`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    /// Workspace folder the environment was discovered for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_folder: Option<PathBuf>,
}

impl Environment {
    pub fn new(executable: impl Into<PathBuf>, kind: EnvironmentKind) -> Self {
        Self {
            executable: executable.into(),
            kind,
            name: None,
            prefix: None,
            workspace_folder: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_workspace_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.workspace_folder = Some(folder.into());
        self
    }

    /// The environment root directory.
    ///
    /// Falls back to the executable layout when no prefix was recorded:
    /// `<root>/bin/python`, `<root>\Scripts\python.exe`, or `<root>\python.exe`.
    pub fn root(&self) -> PathBuf {
        if let Some(prefix) = &self.prefix {
            return prefix.clone();
        }
        root_from_executable(&self.executable)
    }
}

/// Environment root implied by an interpreter path
pub fn root_from_executable(executable: &Path) -> PathBuf {
    let Some(parent) = executable.parent() else {
        return executable.to_path_buf();
    };
    let dir_name = parent
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if dir_name == "bin" || dir_name == "scripts" {
        parent.parent().unwrap_or(parent).to_path_buf()
    } else {
        parent.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_prefers_prefix() {
        let env = Environment::new("/opt/envs/a/bin/python", EnvironmentKind::VirtualEnv)
            .with_prefix("/somewhere/else");
        assert_eq!(env.root(), PathBuf::from("/somewhere/else"));
    }

    #[test]
    fn test_root_from_posix_layout() {
        let env = Environment::new("/home/dev/app/.venv/bin/python3", EnvironmentKind::VirtualEnv);
        assert_eq!(env.root(), PathBuf::from("/home/dev/app/.venv"));
    }

    #[test]
    fn test_root_from_flat_layout() {
        let env = Environment::new("/opt/miniconda/envs/ml/python", EnvironmentKind::Conda);
        assert_eq!(env.root(), PathBuf::from("/opt/miniconda/envs/ml"));
    }

    #[test]
    fn test_kind_deserialize_aliases() {
        let kind: EnvironmentKind = serde_json::from_str(r#""VirtualEnv""#).unwrap();
        assert_eq!(kind, EnvironmentKind::VirtualEnv);
        let kind: EnvironmentKind = serde_json::from_str(r#""venv""#).unwrap();
        assert_eq!(kind, EnvironmentKind::VirtualEnv);
        let kind: EnvironmentKind = serde_json::from_str(r#""Pipenv""#).unwrap();
        assert_eq!(kind, EnvironmentKind::Pipenv);

        assert!(serde_json::from_str::<EnvironmentKind>(r#""nix""#).is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("CONDA".parse::<EnvironmentKind>().unwrap(), EnvironmentKind::Conda);
        let err = "pixi".parse::<EnvironmentKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { ref value, .. } if value == "pixi"));
    }

    #[test]
    fn test_environment_deserialize() {
        let env: Environment = serde_json::from_str(
            r#"{"executable": "/p/bin/python", "kind": "poetry", "name": "p-abc-py3.12"}"#,
        )
        .unwrap();
        assert_eq!(env.kind, EnvironmentKind::Poetry);
        assert_eq!(env.name.as_deref(), Some("p-abc-py3.12"));
        assert!(env.prefix.is_none());
    }
}

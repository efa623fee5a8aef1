use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    installer::{InstallerRegistry, InstallerRegistryBuilder, InstallerServices, InstallerSettings},
    interfaces::{InterpreterService, WorkspaceService},
    services::StaticInterpreterService,
    tracker::WorkspaceInterpreterTracker,
    types::{Environment, EnvironmentKind},
};

pub const CONFIG_FILE_NAMES: [&str; 2] = [".module-installer.json", "module-installer.json"];

/// An interpreter pinned to a folder in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterEntry {
    /// Folder the interpreter is active for; omit for the fallback interpreter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
    pub executable: PathBuf,
    pub kind: EnvironmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
}

impl InterpreterEntry {
    pub fn to_environment(&self) -> Environment {
        Environment {
            executable: self.executable.clone(),
            kind: self.kind,
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            workspace_folder: self.folder.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(flatten)]
    pub installer: InstallerSettings,

    /// Installer names to leave out of selection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_installers: Vec<String>,

    #[serde(default = "default_true")]
    pub track_interpreters: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interpreters: Vec<InterpreterEntry>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            installer: InstallerSettings::default(),
            disabled_installers: Vec::new(),
            track_interpreters: true,
            interpreters: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` to the first config file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file, or defaults when there is none
    pub fn load(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                tracing::debug!("No config file above {}, using defaults", start_path.display());
                Ok(Self::default())
            }
        }
    }

    /// Interpreter service seeded from the `interpreters` entries.
    ///
    /// An entry without a folder becomes the fallback; the last one wins.
    pub fn interpreter_service(&self) -> StaticInterpreterService {
        self.interpreters
            .iter()
            .fold(StaticInterpreterService::new(), |service, entry| {
                let environment = entry.to_environment();
                match &entry.folder {
                    Some(folder) => service.with_folder(folder.clone(), environment),
                    None => service.with_fallback(environment),
                }
            })
    }

    /// Default installers minus the disabled ones
    pub fn registry(&self, services: InstallerServices) -> InstallerRegistry {
        InstallerRegistryBuilder::new()
            .with_defaults(services, &self.installer)
            .disable(self.disabled_installers.iter().map(String::as_str))
            .build()
    }

    /// Interpreter tracker, idle unless `track_interpreters` is set
    pub fn tracker(
        &self,
        interpreters: Arc<dyn InterpreterService>,
        workspace: Arc<dyn WorkspaceService>,
    ) -> WorkspaceInterpreterTracker {
        WorkspaceInterpreterTracker::new(interpreters, workspace, self.track_interpreters)
    }
}

//! Pieces shared by every installer

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    interfaces::{InterpreterService, WorkspaceService},
    types::{Environment, EnvironmentKind, WorkspaceFolder},
};

/// Tunables that change how commands are built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    /// Conda executable
    pub conda_path: String,
    /// Proxy handed to pip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Dependency group poetry adds modules to
    pub poetry_group: String,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            conda_path: "conda".to_string(),
            proxy: None,
            poetry_group: "dev".to_string(),
        }
    }
}

/// The host services an installer consults
#[derive(Clone)]
pub struct InstallerServices {
    pub interpreters: Arc<dyn InterpreterService>,
    pub workspace: Arc<dyn WorkspaceService>,
}

impl std::fmt::Debug for InstallerServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerServices")
            .field("workspace_folders", &self.workspace.workspace_folders())
            .finish()
    }
}

impl InstallerServices {
    pub fn new(
        interpreters: Arc<dyn InterpreterService>,
        workspace: Arc<dyn WorkspaceService>,
    ) -> Self {
        Self {
            interpreters,
            workspace,
        }
    }

    /// Active interpreter for a resource; errors count as "none"
    pub async fn active_interpreter(&self, resource: Option<&Path>) -> Option<Environment> {
        match self.interpreters.active_interpreter(resource).await {
            Ok(environment) => environment,
            Err(e) => {
                tracing::debug!("Failed to resolve interpreter for {:?}: {}", resource, e);
                None
            }
        }
    }

    /// Active interpreter and owning folder for a resource, if both resolve
    pub async fn resolve_resource(
        &self,
        resource: Option<&Path>,
    ) -> Option<(Environment, WorkspaceFolder)> {
        let environment = self.active_interpreter(resource).await?;
        let folder = self.workspace.owning_folder(resource?)?;
        Some((environment, folder))
    }

    /// The workspace folder an environment belongs to.
    ///
    /// The recorded folder wins while it is open; otherwise the folder owning
    /// the environment root.
    pub fn interpreter_workspace_folder(&self, environment: &Environment) -> Option<WorkspaceFolder> {
        environment
            .workspace_folder
            .as_deref()
            .and_then(|folder| self.workspace.owning_folder(folder))
            .or_else(|| self.workspace.owning_folder(&environment.root()))
    }

    /// Working directory for commands that must run inside the project
    pub fn project_cwd(&self, environment: &Environment) -> Option<PathBuf> {
        self.interpreter_workspace_folder(environment)
            .map(|folder| self.workspace.folder_path(&folder))
    }
}

/// Direct kind comparison for already-resolved records
pub fn kind_matches(kinds: &[EnvironmentKind], environment: &Environment) -> bool {
    kinds.contains(&environment.kind)
}

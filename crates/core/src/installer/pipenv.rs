//! Installer for pipenv (not the same as pip)

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::LazyLock;

use super::common::{InstallerServices, kind_matches};
use super::traits::{InstallerType, ModuleInstaller};
use crate::{
    command::ExecutionArgs,
    types::{Environment, EnvironmentKind, InstallFlags, InstallTarget},
    utils::paths::is_path_contained,
};

pub const PIPENV_NAME: &str = "pipenv";

/// Characters pipenv replaces with `_` when deriving a virtualenv name
static UNSAFE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ &$`!*@"()\[\]\\\r\n\t]"#).expect("valid regex"));

const MAX_NAME_LEN: usize = 42;

const PIPFILE: &str = "Pipfile";

pub struct PipenvInstaller {
    services: InstallerServices,
}

impl PipenvInstaller {
    pub fn new(services: InstallerServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl ModuleInstaller for PipenvInstaller {
    fn name(&self) -> &str {
        PIPENV_NAME
    }

    fn display_name(&self) -> &str {
        PIPENV_NAME
    }

    fn installer_type(&self) -> InstallerType {
        InstallerType::Pipenv
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn is_supported(&self, target: &InstallTarget) -> bool {
        match target {
            InstallTarget::Resource(resource) => {
                let Some((interpreter, folder)) =
                    self.services.resolve_resource(resource.as_deref()).await
                else {
                    return false;
                };
                if interpreter.kind != EnvironmentKind::Pipenv {
                    return false;
                }
                // Only `pipenv install` into the environment of this folder's project
                let folder_path = self.services.workspace.folder_path(&folder);
                is_pipenv_environment_related_to_folder(&interpreter.root(), &folder_path)
            }
            InstallTarget::Environment(environment) => {
                kind_matches(&[EnvironmentKind::Pipenv], environment)
            }
        }
    }

    fn execution_args(
        &self,
        module_name: &str,
        environment: &Environment,
        flags: InstallFlags,
    ) -> ExecutionArgs {
        // pipenv has no upgrade or reinstall of its own, `update` covers all of them
        let action = if flags.wants_update() { "update" } else { "install" };
        let args = vec![action.to_string(), module_name.to_string(), "--dev".to_string()];

        ExecutionArgs::new(PIPENV_NAME, args).with_cwd(self.services.project_cwd(environment))
    }
}

/// Whether a pipenv environment belongs to the project in `folder`.
///
/// True for an in-project `.venv` under the folder, or for a centrally stored
/// virtualenv whose directory name is the one pipenv derives for the folder.
pub fn is_pipenv_environment_related_to_folder(env_root: &Path, folder: &Path) -> bool {
    if is_path_contained(folder, env_root) {
        return true;
    }

    env_root
        .file_name()
        .is_some_and(|name| name.to_string_lossy() == pipenv_virtualenv_name(folder))
}

/// The virtualenv directory name pipenv uses for a project folder:
/// `<sanitized folder name>-<8 char hash of the folder's Pipfile path>`
pub fn pipenv_virtualenv_name(folder: &Path) -> String {
    let base = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sanitized: String = UNSAFE_NAME_CHARS
        .replace_all(&base, "_")
        .chars()
        .take(MAX_NAME_LEN)
        .collect();

    let pipfile = folder.join(PIPFILE);
    let digest = Sha256::digest(pipfile.to_string_lossy().as_bytes());
    let encoded = URL_SAFE.encode(&digest[..6]);

    format!("{}-{}", sanitized, &encoded[..8])
}

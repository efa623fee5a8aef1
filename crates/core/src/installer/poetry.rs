use async_trait::async_trait;

use super::common::{InstallerServices, InstallerSettings, kind_matches};
use super::traits::{InstallerType, ModuleInstaller};
use crate::{
    command::ExecutionArgs,
    types::{Environment, EnvironmentKind, InstallFlags, InstallTarget},
};

pub const POETRY_NAME: &str = "poetry";

/// Adds modules to the project's dependency group with `poetry add`
pub struct PoetryInstaller {
    services: InstallerServices,
    group: String,
}

impl PoetryInstaller {
    pub fn new(services: InstallerServices, settings: &InstallerSettings) -> Self {
        Self {
            services,
            group: settings.poetry_group.clone(),
        }
    }
}

#[async_trait]
impl ModuleInstaller for PoetryInstaller {
    fn name(&self) -> &str {
        POETRY_NAME
    }

    fn display_name(&self) -> &str {
        POETRY_NAME
    }

    fn installer_type(&self) -> InstallerType {
        InstallerType::Poetry
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn is_supported(&self, target: &InstallTarget) -> bool {
        match target {
            // Poetry keeps its virtualenvs in a shared cache, so the folder
            // only has to exist; there is no path relation to check.
            InstallTarget::Resource(resource) => self
                .services
                .resolve_resource(resource.as_deref())
                .await
                .is_some_and(|(interpreter, _)| interpreter.kind == EnvironmentKind::Poetry),
            InstallTarget::Environment(environment) => {
                kind_matches(&[EnvironmentKind::Poetry], environment)
            }
        }
    }

    fn execution_args(
        &self,
        module_name: &str,
        environment: &Environment,
        flags: InstallFlags,
    ) -> ExecutionArgs {
        let module = if flags.wants_update() {
            format!("{module_name}@latest")
        } else {
            module_name.to_string()
        };
        let args = vec!["add".to_string(), "--group".to_string(), self.group.clone(), module];

        ExecutionArgs::new(POETRY_NAME, args).with_cwd(self.services.project_cwd(environment))
    }
}

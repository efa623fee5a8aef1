use async_trait::async_trait;

use super::common::{InstallerServices, InstallerSettings, kind_matches};
use super::traits::{InstallerType, ModuleInstaller};
use crate::{
    command::ExecutionArgs,
    types::{Environment, EnvironmentKind, InstallFlags, InstallTarget},
};

/// Installs through `conda install` into a named or prefix environment
pub struct CondaInstaller {
    services: InstallerServices,
    conda_path: String,
}

impl CondaInstaller {
    pub fn new(services: InstallerServices, settings: &InstallerSettings) -> Self {
        Self {
            services,
            conda_path: settings.conda_path.clone(),
        }
    }
}

#[async_trait]
impl ModuleInstaller for CondaInstaller {
    fn name(&self) -> &str {
        "Conda"
    }

    fn display_name(&self) -> &str {
        "Conda"
    }

    fn installer_type(&self) -> InstallerType {
        InstallerType::Conda
    }

    fn priority(&self) -> i32 {
        0
    }

    async fn is_supported(&self, target: &InstallTarget) -> bool {
        match target {
            InstallTarget::Resource(resource) => {
                let Some((interpreter, _folder)) =
                    self.services.resolve_resource(resource.as_deref()).await
                else {
                    return false;
                };
                interpreter.kind == EnvironmentKind::Conda
            }
            InstallTarget::Environment(environment) => {
                kind_matches(&[EnvironmentKind::Conda], environment)
            }
        }
    }

    fn execution_args(
        &self,
        module_name: &str,
        environment: &Environment,
        flags: InstallFlags,
    ) -> ExecutionArgs {
        let action = if flags.contains(InstallFlags::UPGRADE) {
            "update"
        } else {
            "install"
        };
        let mut args = vec![action.to_string()];

        match &environment.name {
            Some(name) if !name.is_empty() => {
                args.push("--name".into());
                args.push(name.clone());
            }
            _ => {
                args.push("--prefix".into());
                args.push(environment.root().to_string_lossy().into_owned());
            }
        }

        if flags.contains(InstallFlags::UPDATE_DEPENDENCIES) {
            args.push("--update-deps".into());
        }
        if flags.contains(InstallFlags::REINSTALL) {
            args.push("--force-reinstall".into());
        }

        args.push(module_name.to_string());
        args.push("-y".into());

        ExecutionArgs::new(self.conda_path.clone(), args)
    }
}

//! Install flow: select an installer, build its command, run it

use serde::Serialize;
use std::sync::Arc;

use super::{common::InstallerServices, registry::InstallerRegistry, traits::InstallerType};
use crate::{
    command::ExecutionArgs,
    error::{Error, Result},
    interfaces::{ProcessOutput, ProcessRunner},
    types::{Environment, InstallRequest, InstallTarget},
};

/// What would run for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub installer: String,
    pub display_name: String,
    pub installer_type: InstallerType,
    pub environment: Environment,
    pub command: ExecutionArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed {
        plan: InstallPlan,
        output: ProcessOutput,
    },
    /// No registered installer supports the target
    NoInstaller,
}

pub struct ModuleInstallService {
    registry: InstallerRegistry,
    services: InstallerServices,
    runner: Arc<dyn ProcessRunner>,
}

impl ModuleInstallService {
    pub fn new(
        registry: InstallerRegistry,
        services: InstallerServices,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            registry,
            services,
            runner,
        }
    }

    pub fn registry(&self) -> &InstallerRegistry {
        &self.registry
    }

    /// Work out the installer and command without running anything
    pub async fn plan(&self, request: &InstallRequest) -> Result<Option<InstallPlan>> {
        let module_name = request.module_name.trim();
        if module_name.is_empty() {
            return Err(Error::InvalidModuleName(request.module_name.clone()));
        }

        let Some(installer) = self
            .registry
            .select_installer(module_name, &request.target, request.flags)
            .await
        else {
            return Ok(None);
        };

        let environment = match &request.target {
            InstallTarget::Environment(environment) => environment.clone(),
            InstallTarget::Resource(resource) => self
                .services
                .active_interpreter(resource.as_deref())
                .await
                .ok_or_else(|| {
                    Error::InterpreterError(format!(
                        "active interpreter for {:?} disappeared after {} was selected",
                        resource,
                        installer.name()
                    ))
                })?,
        };

        let command = installer.execution_args(module_name, &environment, request.flags);
        tracing::debug!(
            "{} will run: {}",
            installer.display_name(),
            command.to_shell_command()
        );

        Ok(Some(InstallPlan {
            installer: installer.name().to_string(),
            display_name: installer.display_name().to_string(),
            installer_type: installer.installer_type(),
            environment,
            command,
        }))
    }

    /// Install the requested module. Dropping the returned future before it
    /// completes kills the package manager process.
    pub async fn install(&self, request: &InstallRequest) -> Result<InstallOutcome> {
        let Some(plan) = self.plan(request).await? else {
            tracing::info!(
                "No installer available for {} ({})",
                request.module_name,
                request.target.describe()
            );
            return Ok(InstallOutcome::NoInstaller);
        };

        tracing::info!(
            "Installing {} with {}",
            request.module_name,
            plan.display_name
        );
        let output = self.runner.run(&plan.command).await?;

        if !output.success() {
            tracing::warn!(
                "{} failed with {:?}: {}",
                plan.display_name,
                output.code,
                output.stderr.trim()
            );
            return Err(Error::InstallFailed {
                command: plan.command.to_shell_command(),
                code: output.code,
            });
        }

        Ok(InstallOutcome::Installed { plan, output })
    }
}

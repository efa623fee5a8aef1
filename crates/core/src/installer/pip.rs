//! Installers that run `python -m pip` with the environment's own interpreter

use async_trait::async_trait;

use super::common::{InstallerServices, InstallerSettings, kind_matches};
use super::traits::{InstallerType, ModuleInstaller};
use crate::{
    command::ExecutionArgs,
    types::{Environment, EnvironmentKind, InstallFlags, InstallTarget},
};

/// Kinds plain pip may install into. Conda and system interpreters have
/// dedicated installers.
const PIP_KINDS: &[EnvironmentKind] = &[
    EnvironmentKind::VirtualEnv,
    EnvironmentKind::Pipenv,
    EnvironmentKind::Poetry,
    EnvironmentKind::Unknown,
];

const SYSTEM_PIP_KINDS: &[EnvironmentKind] = &[EnvironmentKind::System];

pub struct PipInstaller {
    services: InstallerServices,
    proxy: Option<String>,
}

impl PipInstaller {
    pub fn new(services: InstallerServices, settings: &InstallerSettings) -> Self {
        Self {
            services,
            proxy: settings.proxy.clone(),
        }
    }
}

#[async_trait]
impl ModuleInstaller for PipInstaller {
    fn name(&self) -> &str {
        "Pip"
    }

    fn display_name(&self) -> &str {
        "Pip"
    }

    fn installer_type(&self) -> InstallerType {
        InstallerType::Pip
    }

    fn priority(&self) -> i32 {
        0
    }

    async fn is_supported(&self, target: &InstallTarget) -> bool {
        supports(&self.services, PIP_KINDS, target).await
    }

    fn execution_args(
        &self,
        module_name: &str,
        environment: &Environment,
        flags: InstallFlags,
    ) -> ExecutionArgs {
        pip_command(environment, self.proxy.as_deref(), flags, false, module_name)
    }
}

/// pip against a system-wide interpreter, installing into the user site
pub struct SystemPipInstaller {
    services: InstallerServices,
    proxy: Option<String>,
}

impl SystemPipInstaller {
    pub fn new(services: InstallerServices, settings: &InstallerSettings) -> Self {
        Self {
            services,
            proxy: settings.proxy.clone(),
        }
    }
}

#[async_trait]
impl ModuleInstaller for SystemPipInstaller {
    fn name(&self) -> &str {
        "SystemPip"
    }

    fn display_name(&self) -> &str {
        "Pip (user)"
    }

    fn installer_type(&self) -> InstallerType {
        InstallerType::SystemPip
    }

    fn priority(&self) -> i32 {
        -10
    }

    async fn is_supported(&self, target: &InstallTarget) -> bool {
        supports(&self.services, SYSTEM_PIP_KINDS, target).await
    }

    fn execution_args(
        &self,
        module_name: &str,
        environment: &Environment,
        flags: InstallFlags,
    ) -> ExecutionArgs {
        pip_command(environment, self.proxy.as_deref(), flags, true, module_name)
    }
}

async fn supports(
    services: &InstallerServices,
    kinds: &[EnvironmentKind],
    target: &InstallTarget,
) -> bool {
    match target {
        InstallTarget::Resource(resource) => {
            let Some((interpreter, _folder)) = services.resolve_resource(resource.as_deref()).await
            else {
                return false;
            };
            kind_matches(kinds, &interpreter)
        }
        InstallTarget::Environment(environment) => kind_matches(kinds, environment),
    }
}

fn pip_command(
    environment: &Environment,
    proxy: Option<&str>,
    flags: InstallFlags,
    user_site: bool,
    module_name: &str,
) -> ExecutionArgs {
    let mut args: Vec<String> = vec!["-m".into(), "pip".into(), "install".into()];

    if let Some(proxy) = proxy {
        args.push("--proxy".into());
        args.push(proxy.to_string());
    }

    if flags.intersects(InstallFlags::UPGRADE | InstallFlags::UPDATE_DEPENDENCIES) {
        args.push("-U".into());
    }
    if flags.contains(InstallFlags::UPDATE_DEPENDENCIES) {
        args.push("--upgrade-strategy".into());
        args.push("eager".into());
    }
    if flags.contains(InstallFlags::REINSTALL) {
        args.push("--force-reinstall".into());
    }
    if user_site {
        args.push("--user".into());
    }

    args.push(module_name.to_string());

    ExecutionArgs::new(environment.executable.to_string_lossy(), args)
}

use anyhow::{Context, Result};
use module_installer_core::{
    Config, Environment, InstallTarget, InstallerRegistry, InstallerServices, ModuleInstallService,
    interfaces::{EnvironmentKindClassifier, ProcessRunner},
    services::{FolderWorkspaceService, LayoutKindClassifier, StaticInterpreterService},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::cli::TargetArgs;

/// Everything a command needs, assembled from flags and the config file
pub struct InstallContext {
    pub config: Config,
    pub services: InstallerServices,
    pub target: InstallTarget,
}

impl InstallContext {
    pub fn load(args: &TargetArgs, config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_in(&cwd, args, config_path)
    }

    /// Same as [`InstallContext::load`] with an explicit working directory
    pub fn load_in(cwd: &Path, args: &TargetArgs, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::load(cwd).context("Failed to load config")?,
        };

        let folders = if args.workspaces.is_empty() {
            let mut folders = vec![cwd.to_path_buf()];
            folders.extend(config.interpreters.iter().filter_map(|entry| entry.folder.clone()));
            folders
        } else {
            args.workspaces.iter().map(|p| absolutize(cwd, p)).collect()
        };
        debug!("Workspace folders: {:?}", folders);

        // --python wins over every interpreter in the config file
        let environment = args
            .python
            .as_ref()
            .map(|python| build_environment(args, &absolutize(cwd, python)));
        let interpreters = match &environment {
            Some(environment) => StaticInterpreterService::new().with_fallback(environment.clone()),
            None => config.interpreter_service(),
        };

        let services = InstallerServices::new(
            Arc::new(interpreters),
            Arc::new(FolderWorkspaceService::new(folders)),
        );

        let target = match (&args.resource, environment) {
            (Some(resource), _) => InstallTarget::resource(absolutize(cwd, resource)),
            (None, Some(environment)) => InstallTarget::Environment(environment),
            (None, None) => InstallTarget::resource(cwd),
        };
        debug!("Install target: {}", target.describe());

        Ok(Self {
            config,
            services,
            target,
        })
    }

    pub fn registry(&self) -> InstallerRegistry {
        self.config.registry(self.services.clone())
    }

    pub fn install_service(&self, runner: Arc<dyn ProcessRunner>) -> ModuleInstallService {
        ModuleInstallService::new(self.registry(), self.services.clone(), runner)
    }
}

/// Environment described by `--python` and friends
pub fn build_environment(args: &TargetArgs, python: &Path) -> Environment {
    let kind = args
        .kind
        .unwrap_or_else(|| LayoutKindClassifier::new().classify(python));
    debug!("Interpreter {} is {}", python.display(), kind);

    let mut environment = Environment::new(python, kind);
    if let Some(name) = &args.env_name {
        environment = environment.with_name(name.clone());
    }
    if let Some(prefix) = &args.prefix {
        environment = environment.with_prefix(prefix.clone());
    }
    environment
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

//! Installer registry
//!
//! Holds the installers in registration order and picks the one to use for a
//! target: the highest priority among those that support it, with ties going
//! to whichever was registered first.

use std::sync::Arc;

use super::{
    common::{InstallerServices, InstallerSettings},
    conda::CondaInstaller,
    pip::{PipInstaller, SystemPipInstaller},
    pipenv::PipenvInstaller,
    poetry::PoetryInstaller,
    traits::ModuleInstaller,
};
use crate::types::{InstallFlags, InstallTarget};

#[derive(Clone, Default)]
pub struct InstallerRegistry {
    installers: Vec<Arc<dyn ModuleInstaller>>,
}

impl std::fmt::Debug for InstallerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerRegistry")
            .field("installers", &self.names())
            .finish()
    }
}

impl InstallerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in installer
    pub fn with_defaults(services: InstallerServices, settings: &InstallerSettings) -> Self {
        InstallerRegistryBuilder::new()
            .with_defaults(services, settings)
            .build()
    }

    pub fn register(&mut self, installer: Arc<dyn ModuleInstaller>) {
        tracing::trace!(
            "Registering installer {} (priority {})",
            installer.name(),
            installer.priority()
        );
        self.installers.push(installer);
    }

    /// Look up an installer by name, ignoring case
    pub fn get(&self, name: &str) -> Option<Arc<dyn ModuleInstaller>> {
        self.installers
            .iter()
            .find(|installer| installer.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.installers.iter().map(|i| i.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.installers.is_empty()
    }

    /// Installers by descending priority; ties keep registration order
    pub fn ordered(&self) -> Vec<Arc<dyn ModuleInstaller>> {
        let mut ordered = self.installers.clone();
        ordered.sort_by_key(|installer| std::cmp::Reverse(installer.priority()));
        ordered
    }

    /// Every installer that supports `target`, best first
    pub async fn supported_installers(&self, target: &InstallTarget) -> Vec<Arc<dyn ModuleInstaller>> {
        let mut supported = Vec::new();
        for installer in self.ordered() {
            if installer.is_supported(target).await {
                supported.push(installer);
            }
        }
        supported
    }

    /// Pick the installer for a module. `None` means no installer applies,
    /// which is an ordinary outcome.
    pub async fn select_installer(
        &self,
        module_name: &str,
        target: &InstallTarget,
        flags: InstallFlags,
    ) -> Option<Arc<dyn ModuleInstaller>> {
        for installer in self.ordered() {
            if installer.is_supported(target).await {
                tracing::debug!(
                    "Selected {} to install {} ({}) for {}",
                    installer.name(),
                    module_name,
                    flags,
                    target.describe()
                );
                return Some(installer);
            }
        }

        tracing::debug!(
            "No installer supports {} for {}",
            module_name,
            target.describe()
        );
        None
    }
}

/// Builder for creating custom installer registries
#[derive(Default)]
pub struct InstallerRegistryBuilder {
    installers: Vec<Arc<dyn ModuleInstaller>>,
    disabled: Vec<String>,
}

impl InstallerRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installer(mut self, installer: Arc<dyn ModuleInstaller>) -> Self {
        self.installers.push(installer);
        self
    }

    /// Add the built-in installers: Conda, pipenv, poetry, Pip, SystemPip
    pub fn with_defaults(self, services: InstallerServices, settings: &InstallerSettings) -> Self {
        self.with_installer(Arc::new(CondaInstaller::new(services.clone(), settings)))
            .with_installer(Arc::new(PipenvInstaller::new(services.clone())))
            .with_installer(Arc::new(PoetryInstaller::new(services.clone(), settings)))
            .with_installer(Arc::new(PipInstaller::new(services.clone(), settings)))
            .with_installer(Arc::new(SystemPipInstaller::new(services, settings)))
    }

    /// Leave out installers with these names (case-insensitive)
    pub fn disable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> InstallerRegistry {
        let mut registry = InstallerRegistry::new();
        for installer in self.installers {
            if self
                .disabled
                .iter()
                .any(|name| installer.name().eq_ignore_ascii_case(name))
            {
                tracing::debug!("Installer {} disabled by configuration", installer.name());
                continue;
            }
            registry.register(installer);
        }
        registry
    }
}

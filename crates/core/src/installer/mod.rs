//! Module installers: one strategy per Python package manager, a registry that
//! picks between them, and the service that runs the chosen command

pub mod common;
pub mod conda;
pub mod pip;
pub mod pipenv;
pub mod poetry;
pub mod registry;
pub mod service;
pub mod traits;

pub use common::{InstallerServices, InstallerSettings};
pub use conda::CondaInstaller;
pub use pip::{PipInstaller, SystemPipInstaller};
pub use pipenv::{PipenvInstaller, is_pipenv_environment_related_to_folder, pipenv_virtualenv_name};
pub use poetry::PoetryInstaller;
pub use registry::{InstallerRegistry, InstallerRegistryBuilder};
pub use service::{InstallOutcome, InstallPlan, ModuleInstallService};
pub use traits::{InstallerType, ModuleInstaller};

//! module-installer - Picks the right Python package manager for an environment
//!
//! This crate provides functionality to:
//! - Describe Python environments and the resources that resolve to them
//! - Choose between pip, pipenv, conda, poetry and user-site pip by priority
//! - Build and run the install command for the chosen installer
//! - Track the active interpreter of each workspace folder
pub mod command;
pub mod config;
pub mod error;
pub mod installer;
pub mod interfaces;
pub mod services;
pub mod tracker;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use command::ExecutionArgs;
pub use config::Config;
pub use installer::{
    InstallOutcome, InstallPlan, InstallerRegistry, InstallerServices, InstallerSettings,
    InstallerType, ModuleInstallService, ModuleInstaller,
};
pub use tracker::WorkspaceInterpreterTracker;

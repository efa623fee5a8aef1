//! Core traits for the installer architecture

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    command::ExecutionArgs,
    error::Error,
    types::{Environment, InstallFlags, InstallTarget},
};

/// The package managers an installer can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum InstallerType {
    Pip,
    Pipenv,
    Conda,
    Poetry,
    SystemPip,
}

impl FromStr for InstallerType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pip" => Ok(InstallerType::Pip),
            "pipenv" => Ok(InstallerType::Pipenv),
            "conda" => Ok(InstallerType::Conda),
            "poetry" => Ok(InstallerType::Poetry),
            "system_pip" | "systempip" => Ok(InstallerType::SystemPip),
            _ => Err(Error::UnknownVariant {
                kind: "installer type",
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for InstallerType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for InstallerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallerType::Pip => "pip",
            InstallerType::Pipenv => "pipenv",
            InstallerType::Conda => "conda",
            InstallerType::Poetry => "poetry",
            InstallerType::SystemPip => "system_pip",
        };
        f.write_str(name)
    }
}

/// One package manager's policy: when it applies and how to call it
#[async_trait]
pub trait ModuleInstaller: Send + Sync {
    /// Stable identifier, used for lookup and configuration
    fn name(&self) -> &str;

    /// Name shown to users
    fn display_name(&self) -> &str;

    fn installer_type(&self) -> InstallerType;

    /// Higher wins when several installers support the same target
    fn priority(&self) -> i32;

    /// Whether this installer owns the target's environment.
    ///
    /// Resolution failures answer `false`; this never errors.
    async fn is_supported(&self, target: &InstallTarget) -> bool;

    /// Build the command that installs `module_name` into `environment`
    fn execution_args(
        &self,
        module_name: &str,
        environment: &Environment,
        flags: InstallFlags,
    ) -> ExecutionArgs;
}

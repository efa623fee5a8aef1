use std::path::PathBuf;

use super::{Environment, InstallFlags};

/// What an installer is asked about: a resource to resolve, or an environment
/// that has already been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    /// A file or folder; `None` when the caller has no resource in scope
    Resource(Option<PathBuf>),
    Environment(Environment),
}

impl InstallTarget {
    pub fn resource(path: impl Into<PathBuf>) -> Self {
        InstallTarget::Resource(Some(path.into()))
    }

    /// Short human readable description used in logs
    pub fn describe(&self) -> String {
        match self {
            InstallTarget::Resource(Some(path)) => format!("resource {}", path.display()),
            InstallTarget::Resource(None) => "no resource".to_string(),
            InstallTarget::Environment(env) => {
                format!("{} environment {}", env.kind, env.executable.display())
            }
        }
    }
}

impl From<Environment> for InstallTarget {
    fn from(environment: Environment) -> Self {
        InstallTarget::Environment(environment)
    }
}

/// A request to install (or update) one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub module_name: String,
    pub flags: InstallFlags,
    pub target: InstallTarget,
}

impl InstallRequest {
    pub fn new(module_name: impl Into<String>, target: impl Into<InstallTarget>) -> Self {
        Self {
            module_name: module_name.into(),
            flags: InstallFlags::empty(),
            target: target.into(),
        }
    }

    pub fn with_flags(mut self, flags: InstallFlags) -> Self {
        self.flags = flags;
        self
    }
}

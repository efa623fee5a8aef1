use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A project root directory the host associates with open files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
    /// Position of the folder in the host's folder list
    #[serde(default)]
    pub index: usize,
}

impl WorkspaceFolder {
    pub fn new(path: impl Into<PathBuf>, index: usize) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path, index }
    }
}

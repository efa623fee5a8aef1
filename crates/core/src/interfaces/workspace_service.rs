//! Workspace folder interface

use std::path::{Path, PathBuf};

use crate::{types::WorkspaceFolder, utils::paths::is_path_contained};

/// Trait for looking up the host's workspace folders
pub trait WorkspaceService: Send + Sync {
    /// All folders currently open in the host, in host order
    fn workspace_folders(&self) -> Vec<WorkspaceFolder>;

    /// The folder that owns `resource`.
    ///
    /// With nested folders the innermost one wins.
    fn owning_folder(&self, resource: &Path) -> Option<WorkspaceFolder> {
        self.workspace_folders()
            .into_iter()
            .filter(|folder| is_path_contained(&folder.path, resource))
            .max_by_key(|folder| folder.path.components().count())
    }

    /// File system path of a folder
    fn folder_path(&self, folder: &WorkspaceFolder) -> PathBuf {
        folder.path.clone()
    }
}

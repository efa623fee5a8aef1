use std::path::PathBuf;

use crate::{interfaces::WorkspaceService, types::WorkspaceFolder};

/// Workspace service over a fixed list of folders
#[derive(Debug, Clone, Default)]
pub struct FolderWorkspaceService {
    folders: Vec<WorkspaceFolder>,
}

impl FolderWorkspaceService {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let folders = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| WorkspaceFolder::new(path, index))
            .collect();
        Self { folders }
    }
}

impl WorkspaceService for FolderWorkspaceService {
    fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_owning_folder() {
        let service = FolderWorkspaceService::new(["/work/app", "/work/lib"]);

        let folder = service.owning_folder(Path::new("/work/lib/src/x.py")).unwrap();
        assert_eq!(folder.name, "lib");
        assert_eq!(folder.index, 1);

        assert!(service.owning_folder(Path::new("/elsewhere/x.py")).is_none());
    }

    #[test]
    fn test_nested_folders_prefer_innermost() {
        let service = FolderWorkspaceService::new(["/work", "/work/app"]);
        let folder = service.owning_folder(Path::new("/work/app/main.py")).unwrap();
        assert_eq!(service.folder_path(&folder), PathBuf::from("/work/app"));
    }
}

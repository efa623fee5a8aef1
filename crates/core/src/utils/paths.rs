//! Lexical path helpers
//!
//! Everything here works on path text only and never touches the file system,
//! so it is safe to call from classification code.

use std::path::{Component, Path, PathBuf};

/// Remove `.` and resolve `..` components without consulting the file system
pub fn normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.iter().collect()
}

fn comparable(path: &Path) -> String {
    let text = normalize(path).to_string_lossy().into_owned();
    let text = text.trim_end_matches(['/', '\\']).to_string();
    if cfg!(windows) {
        text.replace('/', "\\").to_lowercase()
    } else {
        text
    }
}

/// True when both paths name the same location
pub fn are_paths_same(a: &Path, b: &Path) -> bool {
    comparable(a) == comparable(b)
}

/// True when `child` equals `parent` or lies somewhere below it
pub fn is_path_contained(parent: &Path, child: &Path) -> bool {
    let parent = normalize(parent);
    let child = normalize(child);
    if cfg!(windows) {
        let parent = comparable(&parent);
        let child = comparable(&child);
        return child == parent || child.starts_with(&format!("{parent}\\"));
    }
    child.starts_with(&parent)
}

/// Key used to group state by workspace folder; empty when no folder owns it
pub fn workspace_folder_identifier(folder: Option<&Path>) -> String {
    folder.map(comparable).unwrap_or_default()
}

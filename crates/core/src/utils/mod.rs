pub mod paths;

pub use paths::{are_paths_same, is_path_contained, normalize, workspace_folder_identifier};

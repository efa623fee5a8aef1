pub mod environment;
pub mod flags;
pub mod target;
pub mod workspace;

// Re-export commonly used types
pub use environment::{Environment, EnvironmentKind};
pub use flags::InstallFlags;
pub use target::{InstallRequest, InstallTarget};
pub use workspace::WorkspaceFolder;

pub mod context;

pub use context::{InstallContext, build_environment};

pub mod install;
pub mod installers;
pub mod plan;

pub use install::install_command;
pub use installers::installers_command;
pub use plan::plan_command;

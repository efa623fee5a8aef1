//! Default implementations of the host service interfaces

pub mod folder_workspace_service;
pub mod layout_kind_classifier;
pub mod static_interpreter_service;
pub mod tokio_process_runner;

pub use folder_workspace_service::FolderWorkspaceService;
pub use layout_kind_classifier::LayoutKindClassifier;
pub use static_interpreter_service::StaticInterpreterService;
pub use tokio_process_runner::TokioProcessRunner;

//! Interfaces to the host's services
//!
//! The installer layer never talks to the editor or the operating system
//! directly. Everything it consumes comes through these traits, passed in as
//! constructor parameters.

pub mod interpreter_service;
pub mod kind_classifier;
pub mod process_runner;
pub mod workspace_service;

pub use interpreter_service::{InterpreterChangeEvent, InterpreterService};
pub use kind_classifier::EnvironmentKindClassifier;
pub use process_runner::{ProcessOutput, ProcessRunner};
pub use workspace_service::WorkspaceService;

//! Per-workspace tracking of the active interpreter

pub mod workspace_interpreter_tracker;

pub use workspace_interpreter_tracker::WorkspaceInterpreterTracker;

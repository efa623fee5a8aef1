//! Interpreter resolution interface
//!
//! Implemented by whatever discovers Python environments in the host. The
//! installer layer only ever asks "which interpreter is active here?" and
//! listens for changes to that answer.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use crate::{error::Result, types::Environment};

/// Notification that the active interpreter changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterChangeEvent {
    /// The resource whose interpreter changed, `None` for a global change
    pub resource: Option<PathBuf>,
}

#[async_trait]
pub trait InterpreterService: Send + Sync {
    /// Resolve the interpreter that is active for `resource`
    async fn active_interpreter(&self, resource: Option<&Path>) -> Result<Option<Environment>>;

    /// Subscribe to active-interpreter changes
    fn subscribe(&self) -> broadcast::Receiver<InterpreterChangeEvent>;
}

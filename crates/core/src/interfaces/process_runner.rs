//! Process execution interface

use async_trait::async_trait;

use crate::{command::ExecutionArgs, error::Result};

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an install command. Spawn failures are errors; a non-zero exit is
/// reported through [`ProcessOutput::code`].
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &ExecutionArgs) -> Result<ProcessOutput>;
}

use async_trait::async_trait;
use std::process::Stdio;

use crate::{
    command::ExecutionArgs,
    error::{Error, Result},
    interfaces::{ProcessOutput, ProcessRunner},
};

/// Runs commands as child processes and captures their output
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &ExecutionArgs) -> Result<ProcessOutput> {
        let shell_cmd = command.to_shell_command();
        tracing::info!("Running: {}", shell_cmd);
        if let Some(ref dir) = command.cwd {
            tracing::debug!("Working directory: {}", dir.display());
        }

        let output = command
            .to_command()
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::ProcessError {
                command: shell_cmd.clone(),
                source,
            })?;

        let output = ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!("`{}` exited with {:?}", shell_cmd, output.code);

        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = TempDir::new().unwrap();
        let command = ExecutionArgs::new("pwd", vec![]).with_cwd(Some(dir.path().to_path_buf()));

        let output = TokioProcessRunner::new().run(&command).await.unwrap();

        assert!(output.success());
        let printed = std::fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(printed, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[tokio::test]
    async fn test_reports_exit_code() {
        let command = ExecutionArgs::new("sh", vec!["-c".into(), "exit 3".into()]);
        let output = TokioProcessRunner::new().run(&command).await.unwrap();
        assert_eq!(output.code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_missing_executable_is_an_error() {
        let command = ExecutionArgs::new("definitely-not-a-real-package-manager", vec![]);
        let err = TokioProcessRunner::new().run(&command).await.unwrap_err();
        assert!(matches!(err, Error::ProcessError { .. }));
    }
}

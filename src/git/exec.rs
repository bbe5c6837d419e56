use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}

/// Raw result of running an external program.
#[derive(Debug)]
pub struct CommandOutcome {
    /// Process exit code, or -1 when the process never produced one
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Set when the executor itself hit a problem running the program
    pub error: Option<ExecError>,
}

/// Capability for running an external program to completion.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with a whitespace-separated argument string and wait for it to exit.
    async fn execute(&self, program: &str, arguments: &str) -> CommandOutcome;
}

/// Runs programs as child processes of the current process.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    working_dir: Option<PathBuf>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    #[instrument(skip(self))]
    async fn execute(&self, program: &str, arguments: &str) -> CommandOutcome {
        let mut command = Command::new(program);
        command
            .args(arguments.split_whitespace())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = match command.output().await {
            Ok(output) => output,
            Err(source) => {
                return CommandOutcome {
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: String::new(),
                    error: Some(ExecError::Spawn {
                        program: program.to_string(),
                        source,
                    }),
                }
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(
            status = ?output.status.code(),
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "process exited"
        );

        match output.status.code() {
            Some(exit_code) => CommandOutcome {
                exit_code,
                stdout,
                stderr,
                error: None,
            },
            None => CommandOutcome {
                exit_code: -1,
                stdout,
                stderr,
                error: Some(ExecError::Terminated {
                    program: program.to_string(),
                }),
            },
        }
    }
}

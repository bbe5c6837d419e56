pub mod exec;
pub mod refs;
pub mod types;

pub use exec::{CommandExecutor, CommandOutcome, ExecError, ProcessExecutor};
pub use refs::parse_branch_name;
pub use types::PullRequestContext;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{ConfigurationResolver, MissingVariable, VariableSource};

#[derive(Debug, Error)]
pub enum GitError {
    #[error(transparent)]
    MissingConfiguration(#[from] MissingVariable),

    #[error("Target branch ref '{0}' is not in the refs/heads/ namespace")]
    MalformedReference(String),

    #[error("git exited with code {exit_code}: {source}")]
    CommandFailed {
        exit_code: i32,
        #[source]
        source: ExecError,
    },

    #[error("git exited with code {exit_code}: {}", stderr.trim_end())]
    CommandExited { exit_code: i32, stderr: String },
}

impl GitError {
    /// True when git itself ran and failed, as opposed to a configuration problem.
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            GitError::CommandFailed { .. } | GitError::CommandExited { .. }
        )
    }
}

/// Runs git to summarise the changes introduced by a pull request.
pub struct GitInvoker<E> {
    executor: E,
    program: String,
    remote: String,
}

impl<E: CommandExecutor> GitInvoker<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            program: "git".to_string(),
            remote: "origin".to_string(),
        }
    }

    /// Use a different git executable than the one on PATH.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different remote for the target branch than `origin`.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Produce the numstat diff between the target branch and the pull request merge ref.
    ///
    /// Nothing is executed unless both pipeline variables resolve and the
    /// target branch ref is well formed.
    #[instrument(skip_all)]
    pub async fn get_diff_summary<S: VariableSource>(
        &self,
        resolver: &ConfigurationResolver<S>,
    ) -> Result<String, GitError> {
        let context = PullRequestContext::resolve(resolver)?;
        debug!(target_branch = %context.target_branch, pull_request_id = %context.pull_request_id, "resolved pull request");
        self.run_diff(&context.target_branch, &context.pull_request_id)
            .await
    }

    /// Argument string for `git diff --numstat` over the pull request's three-dot range.
    pub fn diff_arguments(&self, target_branch: &str, pull_request_id: &str) -> String {
        format!(
            "diff --numstat {}/{}...pull/{}/merge",
            self.remote, target_branch, pull_request_id
        )
    }

    #[instrument(skip(self))]
    pub async fn run_diff(
        &self,
        target_branch: &str,
        pull_request_id: &str,
    ) -> Result<String, GitError> {
        debug!("building git arguments");
        let arguments = self.diff_arguments(target_branch, pull_request_id);

        debug!(program = %self.program, arguments = %arguments, "invoking git");
        let outcome = self.executor.execute(&self.program, &arguments).await;
        if outcome.exit_code != 0 {
            return Err(match outcome.error {
                Some(source) => GitError::CommandFailed {
                    exit_code: outcome.exit_code,
                    source,
                },
                None => GitError::CommandExited {
                    exit_code: outcome.exit_code,
                    stderr: outcome.stderr,
                },
            });
        }

        Ok(outcome.stdout)
    }
}

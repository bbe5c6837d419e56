mod config;
mod git;
mod numstat;
mod report;

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

use config::{Config, ConfigurationResolver, ProcessEnv};
use git::{GitInvoker, ProcessExecutor};
use report::OutputFormat;

/// PR Diff: prints the per-file change summary (`git diff --numstat`) of the
/// pull request a CI build is validating.
///
/// Reads SYSTEM_PULLREQUEST_TARGETBRANCH and SYSTEM_PULLREQUEST_PULLREQUESTID
/// from the environment.
#[derive(Parser, Debug)]
#[command(name = "pr-diff", version, about)]
struct Cli {
    /// Path to a config file (defaults to .pr-diff.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Git working copy to run in (defaults to the current directory)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
    format: OutputFormat,

    /// Optional output file path instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("pr_diff").entered();

    info!("loading configuration");
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!(executable = %config.git.executable, remote = %config.git.remote, "git settings");

    let mut executor = ProcessExecutor::new();
    if let Some(repo) = &cli.repo {
        executor = executor.with_working_dir(repo);
    }
    let invoker = GitInvoker::new(executor)
        .with_program(config.git.executable)
        .with_remote(config.git.remote);
    let resolver = ConfigurationResolver::new(ProcessEnv);

    info!("computing pull request diff summary");
    let diff_summary = invoker.get_diff_summary(&resolver).await.map_err(|err| {
        error!(command_failure = err.is_command_failure(), "{}", err);
        err
    })?;
    info!(lines = diff_summary.lines().count(), "diff summary ready");

    let color = cli.output.is_none() && std::io::stdout().is_terminal();
    let rendered = report::render(&diff_summary, cli.format, color)?;
    report::output(&rendered, cli.output.as_deref())?;
    info!("done");

    Ok(())
}

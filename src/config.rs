use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Pipeline variable holding the fully qualified target branch, e.g. `refs/heads/main`.
pub const TARGET_BRANCH_VARIABLE: &str = "SYSTEM_PULLREQUEST_TARGETBRANCH";

/// Pipeline variable holding the pull request identifier.
pub const PULL_REQUEST_ID_VARIABLE: &str = "SYSTEM_PULLREQUEST_PULLREQUESTID";

const DEFAULT_CONFIG_FILE: &str = ".pr-diff.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-diff.toml.
///
/// All fields are optional, the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
    /// Executable used to run git commands
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Remote that tracks the target branch
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            remote: default_remote(),
        }
    }
}

fn default_executable() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Config {
    /// Load configuration from .pr-diff.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Config::default())
        }
    }

    /// Load from a specific path. Unlike `load`, a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// A read-only mapping of ambient variables provided by the build host.
pub trait VariableSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl VariableSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// A required ambient variable was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Required variable {variable} is not set (needed by {operation})")]
pub struct MissingVariable {
    pub variable: String,
    pub operation: String,
}

/// Resolves the pull request variables the diff depends on.
pub struct ConfigurationResolver<S> {
    source: S,
}

impl<S: VariableSource> ConfigurationResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The target branch as a fully qualified ref.
    pub fn resolve_target_branch_ref(&self) -> Result<String, MissingVariable> {
        debug!("resolving target branch ref");
        self.require(TARGET_BRANCH_VARIABLE, "resolve_target_branch_ref")
    }

    pub fn resolve_pull_request_id(&self) -> Result<String, MissingVariable> {
        debug!("resolving pull request id");
        self.require(PULL_REQUEST_ID_VARIABLE, "resolve_pull_request_id")
    }

    fn require(&self, variable: &str, operation: &str) -> Result<String, MissingVariable> {
        match self.source.get(variable) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(MissingVariable {
                variable: variable.to_string(),
                operation: operation.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.git.executable, "git");
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[git]
executable = "/usr/local/bin/git"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.git.executable, "/usr/local/bin/git");
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("pr-diff-does-not-exist.toml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }

    #[test]
    fn test_load_from_invalid_toml_fails() {
        let path = std::env::temp_dir().join("pr-diff-invalid-config.toml");
        fs::write(&path, "[git\nremote = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resolve_present_variables() {
        let resolver = ConfigurationResolver::new(vars(&[
            (TARGET_BRANCH_VARIABLE, "refs/heads/main"),
            (PULL_REQUEST_ID_VARIABLE, "42"),
        ]));
        assert_eq!(resolver.resolve_target_branch_ref().unwrap(), "refs/heads/main");
        assert_eq!(resolver.resolve_pull_request_id().unwrap(), "42");
    }

    #[test]
    fn test_missing_target_branch_names_variable_and_operation() {
        let resolver = ConfigurationResolver::new(vars(&[(PULL_REQUEST_ID_VARIABLE, "42")]));
        let err = resolver.resolve_target_branch_ref().unwrap_err();
        assert_eq!(err.variable, TARGET_BRANCH_VARIABLE);
        assert_eq!(err.operation, "resolve_target_branch_ref");
        assert!(err.to_string().contains(TARGET_BRANCH_VARIABLE));
    }

    #[test]
    fn test_empty_value_is_missing() {
        let resolver = ConfigurationResolver::new(vars(&[(PULL_REQUEST_ID_VARIABLE, "")]));
        let err = resolver.resolve_pull_request_id().unwrap_err();
        assert_eq!(err.variable, PULL_REQUEST_ID_VARIABLE);
        assert_eq!(err.operation, "resolve_pull_request_id");
    }
}

use super::{parse_branch_name, GitError};
use crate::config::{ConfigurationResolver, VariableSource};

/// The pull request the current build is validating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Bare target branch name (e.g. "main"), never the full ref
    pub target_branch: String,
    /// Identifier used in the `pull/<id>/merge` ref
    pub pull_request_id: String,
}

impl PullRequestContext {
    /// Resolve and validate both pipeline variables, target branch first.
    pub fn resolve<S: VariableSource>(
        resolver: &ConfigurationResolver<S>,
    ) -> Result<Self, GitError> {
        let target_ref = resolver.resolve_target_branch_ref()?;
        let target_branch = parse_branch_name(&target_ref)?.to_string();
        let pull_request_id = resolver.resolve_pull_request_id()?;

        Ok(Self {
            target_branch,
            pull_request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PULL_REQUEST_ID_VARIABLE, TARGET_BRANCH_VARIABLE};
    use std::collections::HashMap;

    #[test]
    fn test_resolve_context() {
        let mut vars = HashMap::new();
        vars.insert(TARGET_BRANCH_VARIABLE.to_string(), "refs/heads/dev/next".to_string());
        vars.insert(PULL_REQUEST_ID_VARIABLE.to_string(), "1234".to_string());

        let context = PullRequestContext::resolve(&ConfigurationResolver::new(vars)).unwrap();
        assert_eq!(
            context,
            PullRequestContext {
                target_branch: "dev/next".to_string(),
                pull_request_id: "1234".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_ref_reported_before_missing_id() {
        let mut vars = HashMap::new();
        vars.insert(TARGET_BRANCH_VARIABLE.to_string(), "main".to_string());

        let err = PullRequestContext::resolve(&ConfigurationResolver::new(vars)).unwrap_err();
        assert!(matches!(err, GitError::MalformedReference(_)));
    }
}

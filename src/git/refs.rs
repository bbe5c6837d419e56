use super::GitError;

/// Namespace under which branch heads live in the ref database.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Strip the heads namespace from a fully qualified branch ref.
///
/// The remainder is returned untouched, so `refs/heads/release/1.0` yields
/// `release/1.0`. Anything outside the namespace is rejected with the
/// original value so the misconfigured variable can be spotted in the log.
/// A bare `refs/heads/` names no branch and is rejected the same way.
pub fn parse_branch_name(reference: &str) -> Result<&str, GitError> {
    match reference.strip_prefix(HEADS_PREFIX) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(GitError::MalformedReference(reference.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_branch() {
        assert_eq!(parse_branch_name("refs/heads/main").unwrap(), "main");
    }

    #[test]
    fn test_parse_branch_with_slashes() {
        assert_eq!(
            parse_branch_name("refs/heads/feature/auth/oauth2").unwrap(),
            "feature/auth/oauth2"
        );
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        match parse_branch_name("feature/x") {
            Err(GitError::MalformedReference(value)) => assert_eq!(value, "feature/x"),
            other => panic!("expected MalformedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_other_namespaces() {
        assert!(parse_branch_name("refs/tags/v1.0").is_err());
        assert!(parse_branch_name("refs/remotes/origin/main").is_err());
        // prefix match is case sensitive
        assert!(parse_branch_name("Refs/Heads/main").is_err());
        assert!(parse_branch_name("").is_err());
    }

    #[test]
    fn test_parse_rejects_bare_prefix() {
        match parse_branch_name("refs/heads/") {
            Err(GitError::MalformedReference(value)) => assert_eq!(value, "refs/heads/"),
            other => panic!("expected MalformedReference, got {:?}", other),
        }
    }
}

use thiserror::Error;
use url::Url;

use crate::model::manifest::ManifestFields;

/// A single schema rule broken by one manifest. The validator reports every
/// broken rule for a manifest at once, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("RepoUrl is not an absolute URL: {0}")]
    MalformedRepoUrl(String),
    #[error("RepoUrl host must be {expected}: {url}")]
    WrongRepoHost { expected: String, url: String },
    #[error("RepoUrl must name an owner and a repository: {0}")]
    IncompleteRepoPath(String),
}

/// Check a trimmed manifest against the schema rules, collecting all
/// violations. A manifest that fails here is excluded from the index.
pub fn validate(fields: &ManifestFields, repo_host: &str) -> Result<(), Vec<RuleViolation>> {
    let mut violations = Vec::new();

    if is_blank(&fields.internal_name) {
        violations.push(RuleViolation::MissingField("InternalName"));
    }
    if is_blank(&fields.assembly_version) {
        violations.push(RuleViolation::MissingField("AssemblyVersion"));
    }

    match &fields.repo_url {
        Some(repo_url) if !repo_url.trim().is_empty() => {
            if let Err(violation) = parse_owner_repo(repo_url, repo_host) {
                violations.push(violation);
            }
        }
        _ => violations.push(RuleViolation::MissingField("RepoUrl")),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Split a repository URL like `https://github.com/Owner/Repo` into
/// `("Owner", "Repo")`. Extra path segments beyond the first two are ignored.
pub fn parse_owner_repo(repo_url: &str, repo_host: &str) -> Result<(String, String), RuleViolation> {
    let url = Url::parse(repo_url)
        .map_err(|_| RuleViolation::MalformedRepoUrl(repo_url.to_string()))?;

    if url.host_str() != Some(repo_host) {
        return Err(RuleViolation::WrongRepoHost {
            expected: repo_host.to_string(),
            url: repo_url.to_string(),
        });
    }

    let mut segments = url
        .path_segments()
        .map(|parts| parts.filter(|s| !s.is_empty()))
        .ok_or_else(|| RuleViolation::IncompleteRepoPath(repo_url.to_string()))?;

    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => Ok((owner.to_string(), repo.to_string())),
        _ => Err(RuleViolation::IncompleteRepoPath(repo_url.to_string())),
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map(str::trim).unwrap_or("").is_empty()
}

use anyhow::{Context, Result};

use crate::model::manifest::{ManifestFields, MasterEntry};
use crate::registry::github::ReleaseSource;
use crate::registry::validator::parse_owner_repo;

/// Build a full index entry from a validated manifest: download links,
/// default flags, and the release download count.
///
/// An `Err` here means the entry could not be built at all and the manifest
/// is skipped. A failed download-count fetch is softer: the count degrades to
/// zero and the entry is still published.
pub fn enrich(
    mut fields: ManifestFields,
    repo_host: &str,
    releases: &dyn ReleaseSource,
) -> Result<MasterEntry> {
    let version = fields
        .assembly_version
        .clone()
        .context("manifest has no AssemblyVersion")?;
    let repo_url = fields
        .repo_url
        .clone()
        .context("manifest has no RepoUrl")?
        .trim_end_matches('/')
        .to_string();

    let install_link = format!("{repo_url}/releases/download/v{version}/latest.zip");

    if fields.applicable_version.is_none() {
        fields.applicable_version = Some("any".to_string());
    }

    let (owner, repo) = parse_owner_repo(&repo_url, repo_host)
        .with_context(|| format!("cannot derive owner/repo from {repo_url}"))?;
    let download_count = fetch_count(&fields, &owner, &repo, &version, releases);

    Ok(MasterEntry {
        manifest: fields,
        download_link_testing: install_link.clone(),
        download_link_update: install_link.clone(),
        download_link_install: install_link,
        is_hide: false,
        is_testing_exclusive: false,
        download_count,
        // Stamped by the reconciler once the whole collection is assembled.
        last_update: String::new(),
    })
}

fn fetch_count(
    fields: &ManifestFields,
    owner: &str,
    repo: &str,
    version: &str,
    releases: &dyn ReleaseSource,
) -> u64 {
    match releases.download_count(owner, repo, version) {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(
                plugin = fields.internal_name(),
                "download count unavailable, recording 0: {err}"
            );
            0
        }
    }
}

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use thiserror::Error;

use crate::model::config::ApiConfig;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Where per-release download counts come from. The pipeline only ever talks
/// to this seam, so tests can swap in a canned source and never touch the
/// network.
pub trait ReleaseSource {
    fn download_count(&self, owner: &str, repo: &str, version: &str)
    -> Result<u64, ReleaseApiError>;
}

#[derive(Debug, Error)]
pub enum ReleaseApiError {
    #[error("release API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("release API returned {0}")]
    Status(StatusCode),
}

/// Blocking GitHub releases client. One request per manifest, fixed timeout,
/// no retries.
pub struct GithubReleaseSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubReleaseSource {
    pub fn new(api: &ApiConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .user_agent(concat!("pluginmaster/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl ReleaseSource for GithubReleaseSource {
    /// Sum the `download_count` of every asset on the release tagged
    /// `v{version}`.
    fn download_count(
        &self,
        owner: &str,
        repo: &str,
        version: &str,
    ) -> Result<u64, ReleaseApiError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/releases/tags/v{version}",
            self.base_url
        );

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(ReleaseApiError::Status(response.status()));
        }

        let release: Release = response.json()?;
        Ok(release.assets.iter().map(|asset| asset.download_count).sum())
    }
}

#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    #[serde(default)]
    download_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_counts_sum_across_release() {
        let body = r#"{
            "tag_name": "v1.0.0",
            "assets": [
                {"name": "latest.zip", "download_count": 41},
                {"name": "latest.7z", "download_count": 1}
            ]
        }"#;
        let release: Release = serde_json::from_str(body).unwrap();
        let total: u64 = release.assets.iter().map(|a| a.download_count).sum();
        assert_eq!(total, 42);
    }

    #[test]
    fn missing_assets_array_means_zero() {
        let release: Release = serde_json::from_str(r#"{"tag_name": "v1.0.0"}"#).unwrap();
        assert!(release.assets.is_empty());
    }
}

use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize)]
pub struct RegistryConfig {
    pub plugins_dir: String,
    pub master_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub repo_host: String,
    pub request_timeout_secs: u64,
    pub token_env: Vec<String>,
}

impl AppConfig {
    /// Load configuration with layering: defaults → working-directory override.
    pub fn load() -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        let mut config: AppConfig = toml::from_str(defaults)?;

        let override_path = Path::new("pluginmaster.toml");
        if override_path.exists() {
            let user_str = fs::read_to_string(override_path)?;
            config = toml::from_str(&user_str)?;
        }

        Ok(config)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        PathBuf::from(&self.registry.plugins_dir)
    }

    pub fn master_path(&self) -> PathBuf {
        PathBuf::from(&self.registry.master_path)
    }

    /// Resolve the release API token: first non-empty candidate wins.
    /// No token just means unauthenticated requests with a lower rate limit.
    pub fn api_token(&self) -> Option<String> {
        resolve_token(&self.api.token_env, |name| env::var(name).ok())
    }
}

fn resolve_token<F>(candidates: &[String], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    candidates
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_in_defaults_parse() {
        let config: AppConfig = toml::from_str(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(config.registry.plugins_dir, "./plugins");
        assert_eq!(config.registry.master_path, "./pluginmaster.json");
        assert_eq!(config.api.base_url, "https://api.github.com");
        assert_eq!(config.api.repo_host, "github.com");
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.api.token_env, ["GITHUB_TOKEN", "GH_TOKEN", "PAT"]);
    }

    #[test]
    fn token_resolution_picks_first_non_empty() {
        let names = vec![
            "GITHUB_TOKEN".to_string(),
            "GH_TOKEN".to_string(),
            "PAT".to_string(),
        ];

        let token = resolve_token(&names, |name| match name {
            "GITHUB_TOKEN" => Some("   ".to_string()),
            "GH_TOKEN" => Some("ghp_secret".to_string()),
            "PAT" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(token.as_deref(), Some("ghp_secret"));

        let none = resolve_token(&names, |_| None);
        assert!(none.is_none());
    }
}

use serde::{Deserialize, Serialize};

/// One plugin's authored metadata, trimmed to the recognized field set.
/// Deserializing through this struct drops every key outside the allow-list,
/// so unknown fields never reach the published index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punchline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dalamud_api_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

impl ManifestFields {
    pub fn internal_name(&self) -> &str {
        self.internal_name.as_deref().unwrap_or("")
    }

    pub fn assembly_version(&self) -> &str {
        self.assembly_version.as_deref().unwrap_or("")
    }
}

/// A fully enriched index entry: the trimmed manifest plus the computed
/// fields every downstream installer expects to find.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MasterEntry {
    #[serde(flatten)]
    pub manifest: ManifestFields,
    pub download_link_install: String,
    pub download_link_testing: String,
    pub download_link_update: String,
    pub is_hide: bool,
    pub is_testing_exclusive: bool,
    pub download_count: u64,
    #[serde(default)]
    pub last_update: String,
}

impl MasterEntry {
    /// Sort key for the published index. Ascending over this key keeps the
    /// output byte-stable across runs with identical input.
    pub fn sort_key(&self) -> (&str, &str) {
        (self.manifest.internal_name(), self.manifest.assembly_version())
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::manifest::MasterEntry;

/// The slice of a previously published entry the reconciler cares about.
/// Entries are read leniently so one odd record never discards the whole
/// history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PreviousEntry {
    pub internal_name: Option<String>,
    pub assembly_version: Option<String>,
    pub last_update: Option<String>,
}

/// Load the previous master index. A missing file is simply "no history";
/// an unreadable or corrupt one is warned about and treated the same way.
pub fn load_previous(path: &Path) -> Vec<PreviousEntry> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("previous index {} is corrupt, starting fresh: {err}", path.display());
            Vec::new()
        }
    }
}

/// Stamp `LastUpdate` on every entry: `now` by default, carried forward from
/// the previous run when the plugin's `AssemblyVersion` has not changed.
pub fn reconcile(entries: &mut [MasterEntry], previous: &[PreviousEntry], now: i64) {
    let by_name: HashMap<&str, &PreviousEntry> = previous
        .iter()
        .filter_map(|prev| prev.internal_name.as_deref().map(|name| (name, prev)))
        .collect();

    let now_str = now.to_string();
    for entry in entries {
        entry.last_update = by_name
            .get(entry.manifest.internal_name())
            .filter(|prev| prev.assembly_version.as_deref() == Some(entry.manifest.assembly_version()))
            .and_then(|prev| prev.last_update.clone())
            .unwrap_or_else(|| now_str.clone());
    }
}

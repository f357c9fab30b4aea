use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::model::manifest::MasterEntry;

/// Sort the index deterministically and overwrite the master file.
/// This is the one place where failure is fatal to the run.
pub fn write_master(path: &Path, entries: &mut [MasterEntry]) -> Result<()> {
    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .context("serializing master index")?;

    fs::write(path, buf).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::manifest::ManifestFields;

    fn entry(name: &str, version: &str) -> MasterEntry {
        MasterEntry {
            manifest: ManifestFields {
                internal_name: Some(name.to_string()),
                assembly_version: Some(version.to_string()),
                ..Default::default()
            },
            download_link_install: String::new(),
            download_link_testing: String::new(),
            download_link_update: String::new(),
            is_hide: false,
            is_testing_exclusive: false,
            download_count: 0,
            last_update: "1700000000".to_string(),
        }
    }

    #[test]
    fn empty_collection_writes_valid_empty_array() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pluginmaster.json");

        write_master(&path, &mut []).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn output_is_sorted_by_name_then_version() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pluginmaster.json");

        let mut entries = vec![
            entry("Zeta", "1.0.0"),
            entry("Alpha", "2.0.0"),
            entry("Alpha", "1.0.0"),
        ];
        write_master(&path, &mut entries).unwrap();

        let written: Vec<MasterEntry> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<_> = written
            .iter()
            .map(|e| (e.manifest.internal_name(), e.manifest.assembly_version()))
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Alpha".to_string(), "1.0.0".to_string()),
                ("Alpha".to_string(), "2.0.0".to_string()),
                ("Zeta".to_string(), "1.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn non_ascii_text_is_written_literally() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pluginmaster.json");

        let mut e = entry("Foo", "1.0.0");
        e.manifest.punchline = Some("すごいプラグイン".to_string());
        write_master(&path, &mut [e]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("すごいプラグイン"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn existing_file_is_fully_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pluginmaster.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        write_master(&path, &mut []).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}

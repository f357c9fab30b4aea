use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::model::manifest::ManifestFields;

/// Collect every plugin manifest under `root`: a directory `X` contributes
/// the file `X/X.json`. Anything else is ignored. Files that cannot be read
/// or parsed are warned about and skipped; discovery never aborts the run.
pub fn collect(root: &Path) -> Vec<ManifestFields> {
    let mut manifests = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
    {
        let Some(plugin_name) = entry.file_name().to_str() else {
            continue;
        };
        let manifest_path = entry.path().join(format!("{plugin_name}.json"));
        if !manifest_path.is_file() {
            continue;
        }

        match read_manifest(&manifest_path) {
            Ok(fields) => manifests.push(fields),
            Err(err) => tracing::warn!("skipping manifest {err}"),
        }
    }

    manifests
}

fn read_manifest(path: &Path) -> Result<ManifestFields, String> {
    let raw = fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("{}: {err}", path.display()))
}

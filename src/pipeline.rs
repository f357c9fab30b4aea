use anyhow::Result;

use crate::model::config::AppConfig;
use crate::registry::github::ReleaseSource;
use crate::registry::{collector, enricher, reconciler, validator, writer};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub published: usize,
    pub skipped: usize,
}

/// One full aggregation run: collect → validate → enrich → reconcile → write.
/// Everything before the final write degrades per-manifest; the write itself
/// is the only fatal step.
pub struct Pipeline<'a> {
    config: &'a AppConfig,
    releases: &'a dyn ReleaseSource,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a AppConfig, releases: &'a dyn ReleaseSource) -> Self {
        Self { config, releases }
    }

    pub fn run(&self, now: i64) -> Result<RunSummary> {
        let repo_host = self.config.api.repo_host.as_str();
        let manifests = collector::collect(&self.config.plugins_dir());

        let mut entries = Vec::new();
        let mut skipped = 0;
        for fields in manifests {
            if let Err(violations) = validator::validate(&fields, repo_host) {
                for violation in &violations {
                    tracing::warn!(
                        plugin = fields.internal_name(),
                        "manifest rejected: {violation}"
                    );
                }
                skipped += 1;
                continue;
            }

            match enricher::enrich(fields, repo_host, self.releases) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::warn!("manifest skipped during enrichment: {err:#}");
                    skipped += 1;
                }
            }
        }

        let master_path = self.config.master_path();
        let previous = reconciler::load_previous(&master_path);
        reconciler::reconcile(&mut entries, &previous, now);

        writer::write_master(&master_path, &mut entries)?;

        Ok(RunSummary {
            published: entries.len(),
            skipped,
        })
    }
}

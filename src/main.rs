mod model;
mod pipeline;
mod registry;

use anyhow::Result;

use model::config::AppConfig;
use pipeline::Pipeline;
use registry::github::GithubReleaseSource;

fn main() -> Result<()> {
    // Diagnostics go to stdout: one warn line per skipped manifest.
    tracing_subscriber::fmt()
        .with_env_filter("pluginmaster=info")
        .init();

    tracing::info!("pluginmaster starting");

    let config = AppConfig::load()?;
    let releases = GithubReleaseSource::new(&config.api, config.api_token())?;

    let now = chrono::Utc::now().timestamp();
    let summary = Pipeline::new(&config, &releases).run(now)?;

    tracing::info!(
        "master index written to {}: {} published, {} skipped",
        config.master_path().display(),
        summary.published,
        summary.skipped
    );

    Ok(())
}

pub mod browse;
pub mod cat;
pub mod log;
pub mod ls;
pub mod serve;
pub mod widgets;

use anyhow::{Context, Result};
use scmview_core::{ConsoleConfig, Repository, ScmBackend};
use scmview_sdk::ScmClient;
use std::path::PathBuf;
use tracing::debug;

/// Config file values, overridden by `--backend`.
pub fn load_config(config: Option<PathBuf>, backend: Option<String>) -> Result<ConsoleConfig> {
    let mut loaded = ConsoleConfig::load(config.as_deref())
        .with_context(|| format!("Could not read config file {:?}", config))?;

    if let Some(url) = backend {
        loaded = loaded.with_backend_url(url);
    }

    Ok(loaded)
}

pub async fn connect(config: &ConsoleConfig, repository_id: &str) -> Result<(ScmClient, Repository)> {
    let client = ScmClient::from_config(config)?;
    debug!("using backend {}", client.base_url());
    let repository = client
        .repository(repository_id)
        .await
        .with_context(|| format!("Repository {} not found at {}", repository_id, client.base_url()))?;

    Ok((client, repository))
}

pub mod annotations;
pub mod output;
pub mod projects;
pub mod tasks;

use anyhow::{Context, Result};

use lsx::config::{Config, Overrides};
use lsx::{Extractor, LabelStudioClient};

/// Resolve configuration and build an extractor over the Label Studio API.
pub fn connect(overrides: Overrides) -> Result<Extractor<LabelStudioClient>> {
    let config = Config::load(overrides)?;
    tracing::debug!(url = %config.url, page_size = config.page_size, "Connecting");

    let client = LabelStudioClient::new(&config)
        .with_context(|| format!("invalid Label Studio settings for {}", config.url))?;
    Ok(Extractor::new(client))
}

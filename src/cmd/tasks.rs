use std::path::PathBuf;

use anyhow::Result;

use lsx::config::Overrides;

use super::connect;
use super::output::output_body;

pub async fn cmd_tasks(overrides: Overrides, project_id: i64, output: Option<PathBuf>) -> Result<()> {
    let extractor = connect(overrides)?;

    let Some(tasks) = extractor.tasks(project_id).await else {
        anyhow::bail!(
            "could not fetch tasks for project {project_id} (see warnings above); result is unknown, not empty"
        );
    };

    output_body(&serde_json::to_string_pretty(&tasks)?, output)
}

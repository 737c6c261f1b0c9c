use std::path::PathBuf;

use anyhow::Result;

use lsx::config::Overrides;
use lsx::Table;

use super::connect;
use super::output::{output_body, render};
use crate::OutputFormat;

pub async fn cmd_annotations(
    overrides: Overrides,
    project_id: i64,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let extractor = connect(overrides)?;

    let Some(records) = extractor.annotations(project_id).await else {
        anyhow::bail!(
            "could not fetch annotations for project {project_id} (see warnings above); result is unknown, not empty"
        );
    };

    let table = Table::from_records(&records)?;
    let to_stdout = output.is_none();
    output_body(&render(&table, format)?, output)?;

    if to_stdout && format == OutputFormat::Table {
        eprintln!("\n({} records)", records.len());
    }

    Ok(())
}

use anyhow::Result;

use lsx::config::Overrides;
use lsx::source::PROJECT_COLUMNS;
use lsx::Table;

use super::connect;
use super::output::{output_body, render};
use crate::OutputFormat;

pub async fn cmd_projects(overrides: Overrides, format: OutputFormat) -> Result<()> {
    let extractor = connect(overrides)?;

    let Some(projects) = extractor.projects().await else {
        anyhow::bail!("could not fetch projects (see warnings above); result is unknown, not empty");
    };

    let table = Table::from_items(&projects, &PROJECT_COLUMNS)?;
    output_body(&render(&table, format)?, None)?;

    if format == OutputFormat::Table {
        eprintln!("\n({} projects)", projects.len());
    }

    Ok(())
}

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use lsx::Table;

use crate::OutputFormat;

/// Render a table in the requested format.
pub fn render(table: &Table, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Table => table.to_markdown(),
        OutputFormat::Json => table.to_json()?,
        OutputFormat::Csv => table.to_csv()?,
    };
    Ok(rendered)
}

/// Write rendered output to `output_file`, or to stdout when none is given.
pub fn output_body(body: &str, output_file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(body.as_bytes())?;
        eprintln!("💾 Saved {} bytes to {}", body.len(), path.display());
        return Ok(());
    }

    if body.ends_with('\n') {
        print!("{body}");
    } else {
        println!("{body}");
    }

    Ok(())
}

//! CLI command implementations

use std::path::Path;

use anyhow::Context;
use recprep_core::{DatasetPaths, Pipeline, PipelineConfig};

use crate::output;

/// Printed after a successful run.
pub const COMPLETION_MESSAGE: &str =
    "Data preprocessing completed. Files saved for collaborative and content-based recommendation models.";

/// Run the preprocessing pipeline
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    config: Option<&Path>,
    report: Option<&Path>,
    format: &str,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let paths = DatasetPaths::in_dirs(input_dir, output_dir);

    let pipeline = Pipeline::new(config)?;
    let result = pipeline.run(&paths).map_err(|e| {
        tracing::error!(code = e.error_code(), "Preprocessing failed: {}", e);
        e
    })?;

    if let Some(report) = report {
        result
            .summary
            .write_json(report)
            .with_context(|| format!("writing run report to {}", report.display()))?;
    }

    println!("{}", output::format_summary(&result.summary, format));
    println!("{}", COMPLETION_MESSAGE);

    Ok(())
}

/// Print the effective configuration as JSON
pub fn show_config(config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

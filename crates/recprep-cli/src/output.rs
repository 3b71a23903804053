//! Output formatting for CLI

use recprep_core::RunSummary;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format options
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

#[derive(Tabled)]
struct StageRow {
    #[tabled(rename = "Stage")]
    stage: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn stage_rows(summary: &RunSummary) -> Vec<StageRow> {
    let c = &summary.counts;
    let row = |stage, value: usize| StageRow { stage, value: value.to_string() };
    vec![
        row("Interactions loaded", c.interactions_loaded),
        row("Interactions rated", c.interactions_rated),
        row("Content loaded", c.content_loaded),
        row("Content in language", c.content_in_language),
        row("Active items", c.active_items),
        row("Joined rows", c.joined_rows),
        row("Active rows", c.active_rows),
        row("Duplicates removed", c.duplicates_removed),
        row("Merged rows", c.merged_rows),
        StageRow {
            stage: "User-item matrix",
            value: format!("{} x {} ({} rated)", c.matrix_consumers, c.matrix_items, c.matrix_nonzero),
        },
        StageRow {
            stage: "Content features",
            value: format!("{} x {}", c.feature_rows, c.feature_terms),
        },
    ]
}

/// Format a run summary based on selected format
pub fn format_summary(summary: &RunSummary, format: &str) -> String {
    match OutputFormat::from(format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut table = Table::new(stage_rows(summary));
            table.with(Style::rounded());
            format!("Run {}\n{}", summary.run_id, table)
        }
        OutputFormat::Text => {
            let elapsed = summary.finished_at - summary.started_at;
            let mut out = format!(
                "Run {} finished in {} ms\n",
                summary.run_id,
                elapsed.num_milliseconds()
            );
            for row in stage_rows(summary) {
                out.push_str(&format!("  {}: {}\n", row.stage, row.value));
            }
            for path in &summary.outputs {
                out.push_str(&format!("  Wrote {}\n", path.display()));
            }
            out.trim_end().to_string()
        }
    }
}

//! Integration tests for Recprep Core

use std::fs;
use std::path::Path;

use recprep_core::{
    Aggregation, DatasetPaths, Error, Pipeline, PipelineConfig,
};
use recprep_core::config::{CONTENT_FILE, TRANSACTIONS_FILE};
use tempfile::TempDir;

const CONTENT_HEADER: &str = "item_id,title,text_description,item_type,language,interaction_type";

fn write_inputs(dir: &Path, transactions: &str, content: &str) {
    fs::write(dir.join(TRANSACTIONS_FILE), transactions).unwrap();
    fs::write(dir.join(CONTENT_FILE), content).unwrap();
}

/// Show stage logs under `--nocapture`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn run_default(dir: &TempDir) -> recprep_core::Result<recprep_core::PipelineOutput> {
    init_tracing();
    let paths = DatasetPaths::in_dirs(dir.path(), dir.path());
    Pipeline::new(PipelineConfig::default())?.run(&paths)
}

fn read_output(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_single_like_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
        &format!("{CONTENT_HEADER}\ni1,T,desc,article,English,content_present\n"),
    );

    let output = run_default(&dir).unwrap();
    assert_eq!(output.summary.outputs.len(), 3);

    assert_eq!(read_output(&dir, "user_item_matrix.csv"), "consumer_id,i1\nu1,3\n");
    assert_eq!(read_output(&dir, "content_features.csv"), "item_id,desc\ni1,1\n");
    assert_eq!(
        read_output(&dir, "merged_data.csv"),
        "consumer_id,item_id,interaction_type,rating,title,text_description,item_type,language\n\
         u1,i1,content_liked,3,T,desc,article,English\n"
    );
}

#[test]
fn test_zero_fill_and_filters() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "timestamp,consumer_id,item_id,interaction_type\n\
         1,u1,i1,content_liked\n\
         2,u1,i2,content_followed\n\
         3,u2,i2,content_watched\n\
         4,u2,i1,content_shared\n\
         5,u3,i3,content_saved\n\
         6,u4,i4,content_followed\n",
        &format!(
            "{CONTENT_HEADER}\n\
             i1,One,cloud migration,article,English,content_present\n\
             i2,Two,data pipelines,article,English,content_present\n\
             i3,Tres,migracao para nuvem,article,Portuguese,content_present\n\
             i4,Four,retired guide,article,English,content_pulled_out\n"
        ),
    );

    let output = run_default(&dir).unwrap();
    let matrix = &output.user_item_matrix;

    assert_eq!(matrix.consumer_ids(), &["u1", "u2"]);
    assert_eq!(matrix.item_ids(), &["i1", "i2"]);
    assert_eq!(matrix.get("u1", "i1"), Some(3.0));
    assert_eq!(matrix.get("u1", "i2"), Some(5.0));
    // content_shared carries no weight
    assert_eq!(matrix.get("u2", "i1"), Some(0.0));
    assert_eq!(matrix.get("u2", "i2"), Some(1.0));
    assert!(matrix.values().iter().all(|v| v.is_finite()));

    // Every merged row is English, active, and rated
    for record in &output.merged.records {
        assert_eq!(record.content.language, "English");
        assert!(["i1", "i2"].contains(&record.item_id()));
        assert!((1..=5).contains(&record.rating));
    }
    assert_eq!(output.merged.len(), 3);

    // Extra interaction columns survive the join
    let merged = read_output(&dir, "merged_data.csv");
    assert!(merged.starts_with("timestamp,consumer_id,item_id,interaction_type,rating,"));
    assert!(merged.contains("\n2,u1,i2,content_followed,5,Two,data pipelines,article,English\n"));
}

#[test]
fn test_features_cover_all_content_rows() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
        &format!(
            "{CONTENT_HEADER}\n\
             i1,One,serverless functions,article,English,content_present\n\
             i2,Dois,funcoes serverless,article,Portuguese,content_present\n\
             i3,Three,,article,English,content_pulled_out\n"
        ),
    );

    let output = run_default(&dir).unwrap();
    let features = &output.content_features;

    assert_eq!(features.item_ids, vec!["i1", "i2", "i3"]);
    assert_eq!(features.terms, vec!["funcoes", "functions", "serverless"]);
    // Missing description vectorizes to an all-zero row
    assert!(features.values.row(2).iter().all(|&v| v == 0.0));

    let csv = read_output(&dir, "content_features.csv");
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("item_id,funcoes,functions,serverless\n"));
}

#[test]
fn test_duplicate_pairs_aggregate() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\n\
         u1,i1,content_watched\n\
         u1,i1,content_commented_on\n\
         u1,i1,content_watched\n",
        &format!("{CONTENT_HEADER}\ni1,T,desc,article,English,content_present\n"),
    );

    let output = run_default(&dir).unwrap();
    assert_eq!(output.user_item_matrix.get("u1", "i1"), Some(4.0));
    assert_eq!(output.summary.counts.duplicates_removed, 1);
    assert_eq!(output.merged.len(), 2);

    let paths = DatasetPaths::in_dirs(dir.path(), dir.path());
    let config = PipelineConfig {
        aggregation: Aggregation::Mean,
        ..Default::default()
    };
    let output = Pipeline::new(config).unwrap().run(&paths).unwrap();
    assert_eq!(output.user_item_matrix.get("u1", "i1"), Some(2.0));
}

#[test]
fn test_no_english_content_yields_header_only_outputs() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
        &format!("{CONTENT_HEADER}\ni1,Titulo,descricao,article,Portuguese,content_present\n"),
    );

    let output = run_default(&dir).unwrap();
    assert!(output.merged.is_empty());
    assert_eq!(output.user_item_matrix.shape(), (0, 0));

    assert_eq!(read_output(&dir, "user_item_matrix.csv"), "consumer_id\n");
    let merged = read_output(&dir, "merged_data.csv");
    assert_eq!(merged.lines().count(), 1);
    // Portuguese row is still vectorized
    assert_eq!(read_output(&dir, "content_features.csv").lines().count(), 2);
}

#[test]
fn test_active_set_uses_language_filtered_content() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
        &format!(
            "{CONTENT_HEADER}\n\
             i1,One,cloud,article,English,content_pulled_out\n\
             i1,Um,nuvem,article,Portuguese,content_present\n"
        ),
    );

    let output = run_default(&dir).unwrap();
    let counts = &output.summary.counts;

    // The Portuguese row is present but must not activate i1
    assert_eq!(counts.joined_rows, 1);
    assert_eq!(counts.active_items, 0);
    assert_eq!(counts.active_rows, 0);
    assert!(output.merged.is_empty());
    assert_eq!(output.user_item_matrix.shape(), (0, 0));
    assert_eq!(read_output(&dir, "user_item_matrix.csv"), "consumer_id\n");

    // Both rows are still vectorized
    assert_eq!(output.content_features.item_ids, vec!["i1", "i1"]);
}

#[test]
fn test_run_report_json() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
        &format!("{CONTENT_HEADER}\ni1,T,desc,article,English,content_present\n"),
    );

    let output = run_default(&dir).unwrap();
    let report = dir.path().join("report.json");
    output.summary.write_json(&report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["counts"]["merged_rows"], 1);
    assert_eq!(value["counts"]["matrix_consumers"], 1);
    assert_eq!(value["run_id"], output.summary.run_id.to_string());
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONTENT_FILE), format!("{CONTENT_HEADER}\n")).unwrap();

    let err = run_default(&dir).unwrap_err();
    assert_eq!(err.error_code(), "IO");
    assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with(TRANSACTIONS_FILE)));
}

#[test]
fn test_missing_content_column() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
        "item_id,title,text_description,item_type,interaction_type\ni1,T,desc,article,content_present\n",
    );

    let err = run_default(&dir).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "language"));
    assert!(!dir.path().join("merged_data.csv").exists());
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"max_features": 0}"#).unwrap();

    let err = PipelineConfig::from_json_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");

    fs::write(&path, "{not json").unwrap();
    let err = PipelineConfig::from_json_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "JSON");
}

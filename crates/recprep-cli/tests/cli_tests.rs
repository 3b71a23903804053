//! Integration tests for the recprep binary

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn recprep() -> Command {
    Command::new(env!("CARGO_BIN_EXE_recprep"))
}

// =============================================================================
// Stdout Tests
// =============================================================================

#[test]
fn test_config_stdout_is_pure_json() {
    let output = recprep().arg("config").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["language"], "English");

    // Log lines go to stderr
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Recprep Core initialized"));
}

#[test]
fn test_run_json_summary_has_no_log_lines() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("consumer_transactions.csv"),
        "consumer_id,item_id,interaction_type\nu1,i1,content_liked\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("platform_content.csv"),
        "item_id,title,text_description,item_type,language,interaction_type\n\
         i1,T,desc,article,English,content_present\n",
    )
    .unwrap();

    let output = recprep()
        .args(["-f", "json", "run", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("INFO"));

    // Summary JSON is everything before the completion message
    let (json, message) = stdout.trim_end().rsplit_once('\n').unwrap();
    assert!(message.starts_with("Data preprocessing completed."));
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["counts"]["merged_rows"], 1);
}

//! Integration tests: dialog files in, typed results out
#![cfg(unix)]

use std::path::PathBuf;

use tempfile::TempDir;
use zenity_core::{DialogResult, DialogSpec, DialogValue, Error};
use zenity_process::test_utils::fake_zenity;

fn write_dialog(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("dialog.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_list_dialog_from_file() {
    let temp = TempDir::new().unwrap();
    let path = write_dialog(
        &temp,
        r#"
title = "Fruit"

[kind]
type = "list"
text = "Pick fruit"
multiple = true
columns = [{ name = "Id", hidden = true }, { name = "Name" }]
rows = [["a", "Apple"], ["b", "Banana"], ["c", "Cherry"]]
"#,
    );

    // Drain the fed rows, then select two of them
    let fake = fake_zenity(r#"[ "$(wc -l)" -eq 6 ] || exit 3; echo 'a|c'"#);
    let spec = DialogSpec::load(&path).unwrap();
    let result = fake.launcher().run(spec).await.unwrap();

    assert_eq!(
        result,
        DialogResult::Confirmed(DialogValue::Selection(vec!["a".into(), "c".into()]))
    );
}

#[tokio::test]
async fn test_calendar_dialog_from_file() {
    let temp = TempDir::new().unwrap();
    let path = write_dialog(
        &temp,
        r#"
[kind]
type = "calendar"
text = "Due date"
year = 2024
month = 3
day = 5
"#,
    );

    // Echo back the requested format to prove the launcher forced ISO dates
    let fake = fake_zenity(
        r#"for a in "$@"; do case "$a" in --date-format=%Y-%m-%d) echo 2024-03-05; exit 0;; esac; done; exit 2"#,
    );
    let result = fake
        .launcher()
        .run(DialogSpec::load(&path).unwrap())
        .await
        .unwrap();

    match result {
        DialogResult::Confirmed(DialogValue::Date(date)) => {
            assert_eq!(date.to_string(), "2024-03-05");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_cancelled_question_from_file() {
    let temp = TempDir::new().unwrap();
    let path = write_dialog(
        &temp,
        r#"
title = "Confirm"
cancel_label = "Keep"

[kind]
type = "question"
text = "Delete everything?"
"#,
    );

    let fake = fake_zenity("exit 1");
    let result = fake
        .launcher()
        .run(DialogSpec::load(&path).unwrap())
        .await
        .unwrap();

    assert_eq!(result, DialogResult::Cancelled);
    assert_eq!(result.exit_code(), 1);
}

#[tokio::test]
async fn test_timeout_reports_execution_error() {
    let spec = DialogSpec::from_toml_str(
        r#"
timeout = 1

[kind]
type = "info"
text = "Soon gone"
"#,
    )
    .unwrap();

    let fake = fake_zenity("exit 5");
    let err = fake.launcher().run(spec).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(matches!(err, Error::Execution { code: Some(5), .. }));
}

#[tokio::test]
async fn test_result_serializes_as_json() {
    let spec = DialogSpec::from_toml_str(
        r#"
[kind]
type = "entry"
text = "Name?"
"#,
    )
    .unwrap();

    let fake = fake_zenity("echo Ada");
    let result = fake.launcher().run(spec).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["status"], "confirmed");
    assert_eq!(json["result"]["type"], "text");
    assert_eq!(json["result"]["value"], "Ada");
}

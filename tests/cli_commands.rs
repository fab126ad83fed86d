// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn answerbank(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("answerbank"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("ANSWERBANK_LOG")
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(dir.path().join("answers.json"));
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    serde_json::from_str(&stdout).expect("json")
}

fn add(dir: &TempDir, section: &str, field_type: &str, field: &str, answer: &str) -> Value {
    json_output(answerbank(dir).args([
        "--format", "json", "add", "-s", section, "-t", field_type, "-f", field, answer,
    ]))
}

fn stored(dir: &TempDir) -> Value {
    let content = fs::read_to_string(dir.path().join("answers.json")).expect("store file");
    serde_json::from_str(&content).expect("store json")
}

#[test]
fn add_persists_and_list_reads_back() {
    let dir = TempDir::new().expect("tempdir");
    let first = add(&dir, "Personal", "text", "Email", "a@b.com");
    assert_eq!(first["id"], 0);
    assert_eq!(first["created"], true);

    let snapshot = stored(&dir);
    assert_eq!(snapshot["answers"]["autoIncrement"], 1);
    assert_eq!(snapshot["answers"]["records"][0][0], 0);

    let listed = json_output(answerbank(&dir).args(["--format", "json", "list"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["fieldName"], "Email");
    assert_eq!(listed[0]["answer"], "a@b.com");
}

#[test]
fn duplicate_add_reports_existing_record() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");
    let again = add(&dir, "Personal", "text", "Email", "a@b.com");
    assert_eq!(again["id"], 0);
    assert_eq!(again["created"], false);

    answerbank(&dir)
        .args(["add", "-s", "Personal", "-t", "text", "-f", "Email", "a@b.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already stored"));
}

#[test]
fn structured_answers_are_stored_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let record = add(&dir, "Skills", "textarea", "Languages", r#"["Rust", "Go"]"#);
    assert_eq!(record["answer"], serde_json::json!(["Rust", "Go"]));
}

#[test]
fn add_rejects_blank_section() {
    let dir = TempDir::new().expect("tempdir");
    answerbank(&dir)
        .args(["add", "-s", " ", "-t", "text", "-f", "Email", "a@b.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing its section"));
    assert!(!dir.path().join("answers.json").exists());
}

#[test]
fn search_orders_exact_before_fuzzy() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Emails", "old@b.com");
    add(&dir, "Personal", "text", "Email", "a@b.com");
    add(&dir, "Work", "text", "Email", "me@work.com");

    let results = json_output(answerbank(&dir).args([
        "--format", "json", "search", "Email", "-s", "Personal", "-t", "TextInput",
    ]));
    let results = results.as_array().expect("array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], 1);
    assert_eq!(results[0]["matchType"]["kind"], "exact");
    assert!(results.iter().all(|r| r["section"] == "Personal"));
}

#[test]
fn search_text_output_labels_matches() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    answerbank(&dir)
        .args(["search", "Emial", "-s", "Personal", "-t", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[fuzzy:0.600]"))
        .stdout(predicate::str::contains("#0 Personal / Email (text): a@b.com"));

    answerbank(&dir)
        .args(["search", "Salary", "-s", "Personal", "-t", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("answerbank probable"));
}

#[test]
fn probable_ignores_section_and_honors_limit() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Education", "textarea", "First Name", "Ada");
    add(&dir, "Work", "select", "Firm Name", "ACME");

    let results = json_output(answerbank(&dir).args(["--format", "json", "probable", "firstname"]));
    assert_eq!(results.as_array().map(Vec::len), Some(2));
    assert_eq!(results[0]["fieldName"], "First Name");
    assert_eq!(
        results[0]["matchType"],
        serde_json::json!({"kind": "probable", "score": 1.0})
    );

    let limited = json_output(answerbank(&dir).args([
        "--format", "json", "probable", "firstname", "-m", "1",
    ]));
    assert_eq!(limited.as_array().map(Vec::len), Some(1));
}

#[test]
fn confidence_reports_threshold_decision() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    let exact = json_output(answerbank(&dir).args([
        "--format", "json", "confidence", "Email", "-s", "Personal", "-t", "text",
    ]));
    assert_eq!(exact["hasAnswer"], true);
    assert_eq!(exact["confidence"], 1.0);
    assert_eq!(exact["needsSuggestion"], false);
    assert_eq!(exact["answer"]["id"], 0);

    let missing = json_output(answerbank(&dir).args([
        "--format", "json", "confidence", "Salary", "-s", "Personal", "-t", "text",
    ]));
    assert_eq!(missing["hasAnswer"], false);
    assert_eq!(missing["needsSuggestion"], true);
    assert!(missing.get("answer").is_none());
}

#[test]
fn update_keeps_id_and_changes_fields() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    let updated = json_output(answerbank(&dir).args([
        "--format", "json", "update", "0", "new@b.com", "-f", "Primary Email",
    ]));
    assert_eq!(updated["id"], 0);
    assert_eq!(updated["fieldName"], "Primary Email");
    assert_eq!(updated["section"], "Personal");

    let got = json_output(answerbank(&dir).args(["--format", "json", "get", "0"]));
    assert_eq!(got["answer"], "new@b.com");

    answerbank(&dir)
        .args(["update", "7", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No answer with id 7"));
}

#[test]
fn delete_missing_id_is_not_an_error() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    let missing = json_output(answerbank(&dir).args(["--format", "json", "delete", "9"]));
    assert_eq!(missing["deleted"], false);

    let removed = json_output(answerbank(&dir).args(["--format", "json", "delete", "0"]));
    assert_eq!(removed["deleted"], true);
    assert_eq!(stored(&dir)["answers"]["records"], serde_json::json!([]));

    answerbank(&dir)
        .args(["get", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No answer with id 0"));
}

fn write_import(path: &Path) {
    fs::write(
        path,
        r#"[
  {"section": "Personal", "fieldType": "text", "fieldName": "Email", "answer": "a@b.com"},
  {"section": "Personal", "fieldType": "text", "fieldName": "Email", "answer": "a@b.com"},
  {"answer": "Oslo", "id": 4, "matchType": "exact",
   "path": {"section": "Personal", "fieldName": "City", "fieldType": "text"}},
  {"section": "", "fieldType": "text", "fieldName": "Phone", "answer": "555"}
]"#,
    )
    .expect("write import");
}

#[test]
fn import_accepts_both_layouts_and_counts_outcomes() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("import.json");
    write_import(&file);

    let summary = json_output(
        answerbank(&dir)
            .args(["--format", "json", "import"])
            .arg(&file),
    );
    assert_eq!(summary, serde_json::json!({"added": 2, "duplicates": 1, "rejected": 1}));

    let legacy = json_output(answerbank(&dir).args(["--format", "json", "list", "--legacy"]));
    assert_eq!(legacy[1]["path"]["fieldName"], "City");
    assert_eq!(legacy[1]["id"], 1);
}

#[test]
fn import_cv_stores_each_label_once() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("cv.json");
    fs::write(
        &file,
        r#"{"extractedData": {
  "personalInfo": {"email": "ada@example.com", "phone": ""},
  "experience": [{"company": "ACME"}]
}}"#,
    )
    .expect("write cv");

    let summary = json_output(
        answerbank(&dir)
            .args(["--format", "json", "import-cv"])
            .arg(&file),
    );
    // Four email labels, five distinct company labels out of eight.
    assert_eq!(summary, serde_json::json!({"added": 9, "duplicates": 3, "rejected": 0}));

    let results = json_output(answerbank(&dir).args([
        "--format", "json", "search", "Most Recent Company", "-s", "Work Experience", "-t",
        "TextInput",
    ]));
    assert_eq!(results[0]["answer"], "ACME");
    assert_eq!(results[0]["matchType"]["kind"], "exact");

    let again = json_output(
        answerbank(&dir)
            .args(["--format", "json", "import-cv"])
            .arg(&file),
    );
    assert_eq!(again["added"], 0);
}

#[test]
fn import_cv_rejects_malformed_documents() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("cv.json");
    fs::write(&file, r#"{"skills": "Rust"}"#).expect("write cv");

    answerbank(&dir)
        .arg("import-cv")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("extracted CV data"));
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    answerbank(&dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    let cleared = json_output(answerbank(&dir).args(["--format", "json", "clear", "--yes"]));
    assert_eq!(cleared["removed"], 1);
    assert!(stored(&dir).get("answers").is_none());

    let next = add(&dir, "Personal", "text", "Phone", "555");
    assert_eq!(next["id"], 0);
}

#[test]
fn store_name_selects_the_storage_key() {
    let dir = TempDir::new().expect("tempdir");
    json_output(answerbank(&dir).args([
        "--name", "work", "--format", "json", "add", "-s", "Work", "-t", "text", "-f", "Email",
        "me@work.com",
    ]));
    let snapshot = stored(&dir);
    assert!(snapshot.get("answers").is_none());
    assert_eq!(snapshot["work"]["autoIncrement"], 1);

    let default_list = json_output(answerbank(&dir).args(["--format", "json", "list"]));
    assert_eq!(default_list, serde_json::json!([]));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join(".answerbankrc.toml"),
        "default_format = \"json\"\nfield_type_groups = [[\"select\", \"dropdown\"]]\n",
    )
    .expect("write config");
    add(&dir, "Personal", "dropdown", "Country", "Norway");

    let results = json_output(answerbank(&dir).args([
        "search", "Country", "-s", "Personal", "-t", "Select",
    ]));
    assert_eq!(results.as_array().map(Vec::len), Some(1));
}

#[test]
fn corrupt_store_file_fails_without_overwriting() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("answers.json");
    fs::write(&path, "{ broken").expect("write");

    answerbank(&dir)
        .args(["add", "-s", "Personal", "-t", "text", "-f", "Email", "a@b.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load answers"));
    assert_eq!(fs::read_to_string(&path).expect("read"), "{ broken");
}

#[cfg(unix)]
#[test]
fn failed_write_fails_the_command() {
    let dir = TempDir::new().expect("tempdir");
    // Reads through the dangling link find nothing; creating its directory fails.
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("linked"))
        .expect("symlink");
    let store = dir.path().join("linked").join("answers.json");

    Command::new(assert_cmd::cargo::cargo_bin!("answerbank"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("ANSWERBANK_LOG")
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(&store)
        .args(["add", "-s", "Personal", "-t", "text", "-f", "Email", "a@b.com"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Stored").not())
        .stderr(predicate::str::contains("failed to create directory for storage file"));
}

#[test]
fn duplicate_add_with_explicit_id_reports_existing_record() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    let again = json_output(answerbank(&dir).args([
        "--format", "json", "add", "-s", "Personal", "-t", "text", "-f", "Email", "--id", "9",
        "a@b.com",
    ]));
    assert_eq!(again["id"], 0);
    assert_eq!(again["created"], false);

    answerbank(&dir)
        .args([
            "add", "-s", "Personal", "-t", "text", "-f", "Email", "--id", "9", "a@b.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already stored"));
    assert_eq!(stored(&dir)["answers"]["records"].as_array().map(Vec::len), Some(1));
}

#[test]
fn explicit_id_replacement_is_reported_as_stored() {
    let dir = TempDir::new().expect("tempdir");
    add(&dir, "Personal", "text", "Email", "a@b.com");

    let replaced = json_output(answerbank(&dir).args([
        "--format", "json", "add", "-s", "Personal", "-t", "text", "-f", "Phone", "--id", "0",
        "555",
    ]));
    assert_eq!(replaced["id"], 0);
    assert_eq!(replaced["created"], true);

    let listed = json_output(answerbank(&dir).args(["--format", "json", "list"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["fieldName"], "Phone");
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().expect("tempdir");
    answerbank(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("answerbank"));
}

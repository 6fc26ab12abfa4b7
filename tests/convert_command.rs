mod common;

use common::{BOM, pux2csv, read_csv, sample_export, write_1pux};
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;

#[test]
fn converts_1pux_next_to_input_by_default() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_1pux(dir.path(), "vault.1pux", &sample_export());

    pux2csv(dir.path())
        .args(["convert"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 2 records to"));

    let contents = fs::read_to_string(dir.path().join("vault.csv")).expect("csv written");
    assert!(contents.starts_with(BOM), "output starts with a UTF-8 BOM");

    let (header, rows) = read_csv(&contents);
    assert_eq!(
        header,
        ["Title", "URL", "Username", "Password", "Notes", "OTPAuth"]
    );
    assert_eq!(rows.len(), 2);

    assert_eq!(
        rows[0],
        [
            "Example Site",
            "https://example.com",
            "bob",
            "secret1",
            "remember to rotate---work, personal",
            ""
        ]
    );

    assert_eq!(rows[1][0], "Bank, Inc.");
    assert_eq!(rows[1][3], "p\"w");
    assert_eq!(
        rows[1][4],
        "Security - branch: 1 Main St, Springfield---Password history: 1 entry"
    );
    assert_eq!(
        rows[1][5],
        "otpauth://totp/Bank%2C%20Inc.?secret=JBSWY3DPEHPK3PXP&algorithm=SHA1&digits=6&period=30"
    );
}

#[test]
fn include_archived_never_includes_trashed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_1pux(dir.path(), "vault.1pux", &sample_export());
    let output = dir.path().join("out.csv");

    pux2csv(dir.path())
        .args(["convert", "--include-archived", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let (_, rows) = read_csv(&fs::read_to_string(&output).unwrap());
    let titles: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(titles, ["Example Site", "Old Forum", "Bank, Inc."]);
}

#[test]
fn config_file_can_enable_archived_and_disable_bom() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("config.toml"),
        "[convert]\ninclude_archived = true\n\n[csv]\nbom = false\n",
    )
    .unwrap();
    let input = write_1pux(dir.path(), "vault.1pux", &sample_export());

    pux2csv(dir.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("vault.csv")).unwrap();
    assert!(contents.starts_with("Title,URL,"));
    assert_eq!(read_csv(&contents).1.len(), 3);
}

#[test]
fn raw_export_data_is_accepted_and_stdout_output_works() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("export.data");
    fs::write(&input, sample_export().to_string()).unwrap();

    let output = pux2csv(dir.path())
        .args(["convert", "--no-bom", "-o", "-"])
        .arg(&input)
        .output()
        .expect("convert output");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("Title,URL,Username,Password,Notes,OTPAuth\r\n"));
    assert_eq!(read_csv(&stdout).1.len(), 2);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Converted 2 records to -"));
}

#[test]
fn json_mode_reports_counts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_1pux(dir.path(), "vault.1pux", &sample_export());

    let output = pux2csv(dir.path())
        .args(["convert", "--json"])
        .arg(&input)
        .output()
        .expect("convert output");

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let expected_path = dir.path().join("vault.csv").display().to_string();

    assert_eq!(json["value"], json!(expected_path));
    assert_eq!(json["meta"]["kind"], "convert");
    assert_eq!(json["meta"]["records"], 2);
    assert_eq!(
        json["meta"]["skipped"],
        json!({"archived": 1, "trashed": 1, "unknown": 0})
    );
}

#[test]
fn quiet_mode_prints_only_the_output_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_1pux(dir.path(), "vault.1pux", &sample_export());
    let expected = format!("{}\n", dir.path().join("vault.csv").display());

    pux2csv(dir.path())
        .args(["convert", "--quiet"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn existing_output_requires_force() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_1pux(dir.path(), "vault.1pux", &sample_export());
    let output = dir.path().join("vault.csv");
    fs::write(&output, "keep").unwrap();

    pux2csv(dir.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Error: output file already exists"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep");

    pux2csv(dir.path())
        .args(["convert", "--force"])
        .arg(&input)
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&output).unwrap(), "keep");
}

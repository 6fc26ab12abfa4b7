#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

pub const BOM: &str = "\u{feff}";

/// Command with config isolated to `dir` so a developer's real config is
/// never picked up.
pub fn pux2csv(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pux2csv").expect("binary exists");
    cmd.env("PUX2CSV_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

pub fn sample_export() -> Value {
    json!({
        "accounts": [{
            "attrs": {"accountName": "Personal", "email": "bob@example.com"},
            "vaults": [{
                "attrs": {"name": "Private"},
                "items": [
                    {
                        "uuid": "a1",
                        "state": "active",
                        "overview": {
                            "title": "Example Site",
                            "url": "https://example.com",
                            "urls": [{"label": "website", "url": "https://example.com"}],
                            "tags": ["work", "personal"]
                        },
                        "details": {
                            "notesPlain": "remember to rotate",
                            "loginFields": [
                                {"designation": "username", "name": "email", "value": "bob"},
                                {"designation": "password", "name": "password", "value": "secret1"}
                            ],
                            "sections": [],
                            "passwordHistory": []
                        }
                    },
                    {
                        "uuid": "a2",
                        "state": "archived",
                        "overview": {"title": "Old Forum"},
                        "details": {}
                    },
                    {
                        "uuid": "a3",
                        "state": "trashed",
                        "overview": {"title": "Deleted Thing"},
                        "details": {}
                    }
                ]
            }, {
                "attrs": {"name": "Shared"},
                "items": [{
                    "uuid": "b1",
                    "state": "active",
                    "overview": {"title": "Bank, Inc."},
                    "details": {
                        "loginFields": [{"designation": "password", "value": "p\"w"}],
                        "sections": [{"title": "Security", "fields": [
                            {"id": "TOTP_x", "title": "one-time password", "value": {"totp": "jbsw y3dp ehpk 3pxp"}},
                            {"title": "branch", "value": {"address": {"street": "1 Main St", "city": "Springfield"}}}
                        ]}],
                        "passwordHistory": [{"value": "old", "time": 1}]
                    }
                }]
            }]
        }]
    })
}

pub fn write_1pux(dir: &Path, name: &str, export: &Value) -> PathBuf {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("export.attributes", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(br#"{"version": 3}"#).unwrap();
    writer
        .start_file("export.data", SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(serde_json::to_string(export).unwrap().as_bytes())
        .unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Parses CSV output (BOM stripped) into header + rows.
pub fn read_csv(contents: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let contents = contents.strip_prefix(BOM).unwrap_or(contents);
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|row| row.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

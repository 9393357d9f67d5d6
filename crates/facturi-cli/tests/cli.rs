use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const ORDER_LINES: &[&str] = &[
    "Заявка № 101 от 03.04.2024",
    "----------------------------------------",
    "| № п/п | Код | Бар-код | Наименование товара | Кол-во | Цена (USD) | Сумма отп. |",
    "----------------------------------------",
    "1. 345 4840001234567 Сок яблочный 1л 12.000 1.500 18.000",
    "2. 346 4840001234574 Сок вишнёвый 1л 6.000 2.000 12.000",
    "Заявка № 102 от 04.04.2024",
    "1. 500 4840009999999 Вода 0.5л 24.000 0.250 6.000",
];

fn docx(lines: &[&str]) -> Vec<u8> {
    let body: String = lines
        .iter()
        .map(|l| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, l))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Temporary workspace with an inbox, a config file and one order document.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("inbox")).unwrap();
        fs::write(root.join("inbox").join("order.docx"), docx(ORDER_LINES)).unwrap();

        let config = serde_json::json!({
            "paths": {
                "inbox_dir": root.join("inbox"),
                "database": root.join("data").join("facturi.db"),
                "export_dir": root.join("export"),
            },
            "currency": {
                "rate_url": "http://127.0.0.1:9/kursval.php",
                "timeout_secs": 1,
            },
        });
        fs::write(
            root.join("config.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();

        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("facturi").unwrap();
        cmd.current_dir(self.dir.path())
            .arg("--config")
            .arg(self.path("config.json"));
        cmd
    }
}

fn exists(path: &Path) -> bool {
    path.is_file()
}

#[test]
fn test_help() {
    Command::cargo_bin("facturi")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_files_lists_inbox() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains("order.docx"));
}

#[test]
fn test_show_empty_database() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn test_preview_writes_nothing() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["preview", "order.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Заявка № 101"))
        .stdout(predicate::str::contains("Заявка № 102"))
        .stdout(predicate::str::contains("Сок яблочный 1л"))
        .stdout(predicate::str::contains("2 invoices, 3 rows"));

    assert!(!ws.path("data").exists());
    assert!(!ws.path("export").exists());
}

#[test]
fn test_import_usd() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["import", "order.docx", "--currency", "usd", "--yes", "--no-export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted 3 rows"));

    ws.cmd()
        .args(["show", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "345,4840001234567,Сок яблочный 1л,12.000,$1.500,$18.000",
        ))
        .stdout(predicate::str::contains("$0.250"));

    assert!(!ws.path("export").exists());
}

#[test]
fn test_import_rub_exports_workbook() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["import", "order.docx", "--currency", "rub", "--rate", "10", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workbook saved to"));

    assert!(exists(&ws.path("export/order.xlsx")));

    ws.cmd()
        .args(["show", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₽15.0000,₽180.0000"));
}

#[test]
fn test_import_missing_document() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["import", "missing.docx", "--yes"])
        .assert()
        .failure();
}

#[test]
fn test_export_only() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["export", "order.docx", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 invoices (3 rows)"));

    assert!(exists(&ws.path("export/order.xlsx")));
    assert!(!ws.path("data").exists());
}

#[test]
fn test_clear_requires_password() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["import", "order.docx", "--yes", "--no-export"])
        .assert()
        .success();

    ws.cmd()
        .args(["clear", "--password", "wrong", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong password"));

    ws.cmd()
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4840001234567"));

    ws.cmd()
        .args(["clear", "--password", "pased", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 3 rows"));

    ws.cmd()
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn test_clear_checks_password_before_confirming() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["import", "order.docx", "--yes", "--no-export"])
        .assert()
        .success();

    ws.cmd()
        .args(["clear", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong password"))
        .stdout(predicate::str::contains("Nothing deleted").not());

    ws.cmd()
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4840001234567"));
}

#[test]
fn test_tables() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("produse"));
}

#[test]
fn test_rate_offline() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["rate", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 USD = 16.1 RUB (fallback)"));
}

#[test]
fn test_batch_with_summary() {
    let ws = Workspace::new();
    fs::write(
        ws.path("inbox/second.docx"),
        docx(&["Заявка № 7", "1. 1 2000000000001 Чай 10.000 0.500 5.000"]),
    )
    .unwrap();
    fs::write(ws.path("inbox/broken.docx"), b"not a zip").unwrap();

    let pattern = ws.path("inbox").join("*.docx");
    ws.cmd()
        .args(["batch", pattern.to_str().unwrap(), "--offline", "--continue-on-error", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 rows inserted, 1 files failed"));

    let summary = fs::read_to_string(ws.path("export/summary.csv")).unwrap();
    assert!(summary.contains("order.docx,success,2,3,3,0"));
    assert!(summary.contains("second.docx,success,1,1,1,0"));
    assert!(summary.contains("broken.docx,error"));
    assert!(exists(&ws.path("export/second.xlsx")));
}

#[test]
fn test_batch_stops_on_error() {
    let ws = Workspace::new();
    fs::write(ws.path("inbox/broken.docx"), b"not a zip").unwrap();

    let pattern = ws.path("inbox").join("*.docx");
    ws.cmd()
        .args(["batch", pattern.to_str().unwrap(), "--offline"])
        .assert()
        .failure();
}

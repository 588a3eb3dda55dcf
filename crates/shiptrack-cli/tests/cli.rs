//! End-to-end tests for the `shiptrack` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// Command with every store path pointed into `dir`.
fn shiptrack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shiptrack").unwrap();
    cmd.current_dir(dir)
        .env_remove("SHIPTRACK_CONFIG")
        .env_remove("RUST_LOG")
        .env("SHIPTRACK_DATA_FILE", dir.join("data.json"))
        .env("SHIPTRACK_SHIPMENTS_FILE", dir.join("shipments.json"))
        .env("SHIPTRACK_UPLOAD_DIR", dir.join("uploads"));
    cmd
}

fn write_phased_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("shiptrack.json");
    std::fs::write(
        &path,
        r#"{"taxonomy": [{"name": "Phase A", "documents": ["Contract", "Invoice"]}]}"#,
    )
    .unwrap();
    path
}

#[test]
fn taxonomy_defaults_to_coffee_export_list() {
    let dir = tempfile::tempdir().unwrap();
    shiptrack(dir.path())
        .args(["taxonomy", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phytosanitary Certificate"))
        .stdout(predicate::str::contains("Required Documents"));
}

#[test]
fn upload_then_submit_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_phased_config(dir.path());
    let contract = dir.path().join("contract.pdf");
    std::fs::write(&contract, b"%PDF-1.7").unwrap();

    shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["doc", "missing", "SHP-001", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract"))
        .stdout(predicate::str::contains("Invoice"));

    shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["doc", "upload", "SHP-001", "--document", "Contract", "--file"])
        .arg(&contract)
        .assert()
        .success();

    let out = shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["doc", "missing", "SHP-001", "--output", "json"])
        .output()
        .unwrap();
    let missing: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        missing,
        serde_json::json!([{"phase": "Phase A", "document": "Invoice"}])
    );

    let out = shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["phase", "submit", "SHP-001", "--phase", "Phase A", "--output", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let outcome: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(outcome["newly_submitted"], true);
    assert_eq!(outcome["phase_complete"], false);
    assert_eq!(outcome["fully_submitted"], true);
}

#[test]
fn unknown_document_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("visa.pdf");
    std::fs::write(&file, b"x").unwrap();

    shiptrack(dir.path())
        .args(["doc", "upload", "SHP-001", "--document", "Visa", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown document 'Visa'"));

    assert!(!dir.path().join("uploads").exists());
}

fn files_under(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| {
            if e.path().is_dir() {
                files_under(&e.path())
            } else {
                1
            }
        })
        .sum()
}

#[test]
fn failed_record_removes_stored_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("contract.pdf");
    std::fs::write(&file, b"%PDF-1.7").unwrap();
    // the data file's parent is a regular file, so saving fails
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();

    shiptrack(dir.path())
        .env("SHIPTRACK_DATA_FILE", blocker.join("data.json"))
        .args(["doc", "upload", "SHP-001", "--document", "Packing List", "--file"])
        .arg(&file)
        .assert()
        .failure();

    assert_eq!(files_under(&dir.path().join("uploads")), 0);
}

#[test]
fn legacy_import_lists_expected_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_phased_config(dir.path());
    let legacy = dir.path().join("old-uploads").join("SHP-010");
    std::fs::create_dir_all(&legacy).unwrap();
    std::fs::write(legacy.join("Contract.pdf"), b"x").unwrap();

    let out = shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["import-legacy", "--dry-run", "--output", "json"])
        .arg(dir.path().join("old-uploads"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        report["still_missing"],
        serde_json::json!([{"key": "SHP-010", "document": "Invoice", "legacy_name": "Invoice.*"}])
    );
}

#[test]
fn table_output_renders_document_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_phased_config(dir.path());
    shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["doc", "status", "SHP-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document"))
        .stdout(predicate::str::contains("Contract"))
        .stdout(predicate::str::contains("Missing"))
        .stdout(predicate::str::contains("0/2 uploaded"));
}

#[test]
fn shipment_validation_errors_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    shiptrack(dir.path())
        .args([
            "shipment",
            "add",
            "--id",
            "SHP-001",
            "--buyer",
            "Nordic Roasters",
            "--contract-date",
            "2020-01-10",
            "--etd",
            "2020-01-05",
            "--payment-term",
            "wire",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ETD must be today or a future date."))
        .stderr(predicate::str::contains("Contract date cannot be after ETD."))
        .stderr(predicate::str::contains("Payment term must be one of LC, CAD, or TT"));
}

#[test]
fn shipment_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    shiptrack(dir.path())
        .args([
            "shipment",
            "add",
            "--id",
            "SHP-001",
            "--buyer",
            "Nordic Roasters",
            "--contract-date",
            "2020-01-10",
            "--etd",
            "2999-01-05",
            "--payment-term",
            "LC",
        ])
        .assert()
        .success();

    let out = shiptrack(dir.path())
        .args(["shipment", "list", "--output", "json"])
        .output()
        .unwrap();
    let list: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(list[0]["shipment_id"], "SHP-001");
    assert_eq!(list[0]["payment_term"], "LC");
    assert_eq!(list[0]["documents_present"], 0);
    assert_eq!(list[0]["documents_required"], 18);
}

#[test]
fn legacy_import_records_known_documents() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("old-uploads").join("SHP-009");
    std::fs::create_dir_all(&legacy).unwrap();
    std::fs::write(legacy.join("Bill_of_Lading.pdf"), b"x").unwrap();
    std::fs::write(legacy.join("Holiday_Photo.jpg"), b"y").unwrap();

    let out = shiptrack(dir.path())
        .args(["import-legacy", "--output", "json"])
        .arg(dir.path().join("old-uploads"))
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["imported"].as_array().unwrap().len(), 1);
    assert_eq!(report["imported"][0]["document"], "Bill of Lading");
    assert_eq!(report["skipped"].as_array().unwrap().len(), 1);

    let out = shiptrack(dir.path())
        .args(["doc", "status", "SHP-009", "--output", "json"])
        .output()
        .unwrap();
    let status: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let docs = status["phases"][0]["documents"].as_array().unwrap();
    let bl = docs
        .iter()
        .find(|d| d["name"] == "Bill of Lading")
        .unwrap();
    assert_eq!(bl["reference"]["filename"], "Bill_of_Lading.pdf");
}

#[test]
fn member_keys_via_org_and_user() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_phased_config(dir.path());
    shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["phase", "submit", "--org", "acme", "--user", "alice", "--phase", "Phase A"])
        .assert()
        .success();

    shiptrack(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["doc", "keys", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/alice"));
}

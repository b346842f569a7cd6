//! The checked-in schema modules must match their definitions

use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

#[test]
fn generated_modules_are_up_to_date() {
    let root = workspace_root();
    let definitions = root.join("fmg-codegen/definitions");
    let generated = root.join("fmg-provider/src/schemas/generated");

    let mut checked = 0;
    for entry in std::fs::read_dir(&definitions).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let stem = path.file_stem().unwrap().to_str().unwrap().to_string();

        let output = Command::new(env!("CARGO_BIN_EXE_fmg-codegen"))
            .arg("--file")
            .arg(&path)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "{}: {}",
            stem,
            String::from_utf8_lossy(&output.stderr)
        );

        let expected = std::fs::read_to_string(generated.join(format!("{}.rs", stem))).unwrap();
        assert_eq!(
            String::from_utf8(output.stdout).unwrap(),
            expected,
            "{}.rs is stale; run ./scripts/generate-schemas.sh",
            stem
        );
        checked += 1;
    }
    assert_eq!(checked, 8);
}

#[test]
fn rejects_malformed_definition() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"name": "system/dns"}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fmg-codegen"))
        .arg("--file")
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse object definition"));
}

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn module_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("module.json");
    write_file(&path, content);
    path
}

fn modmeta() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("modmeta"))
}

#[test]
fn get_prints_value_as_json() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog","enabled":true}"#);

    let assert = modmeta().arg("get").arg(&file).arg("name").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "\"Blog\"");
}

#[test]
fn get_missing_key_prints_null() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog"}"#);

    let assert = modmeta()
        .arg("get")
        .arg(&file)
        .arg("priority")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "null");
}

#[test]
fn get_missing_key_uses_default() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog"}"#);

    let assert = modmeta()
        .arg("get")
        .arg(&file)
        .arg("priority")
        .arg("--default")
        .arg("0")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "0");

    // Present keys ignore the default
    let assert = modmeta()
        .arg("get")
        .arg(&file)
        .arg("name")
        .arg("--default")
        .arg("fallback")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "\"Blog\"");
}

#[test]
fn set_persists_value_and_preserves_key_order() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog","enabled":true}"#);

    modmeta()
        .arg("set")
        .arg(&file)
        .arg("enabled")
        .arg("false")
        .assert()
        .success();

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(on_disk["enabled"], Value::Bool(false));
    assert_eq!(on_disk["name"], Value::String("Blog".to_string()));
}

#[test]
fn set_stores_bare_strings_verbatim() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, "{}");

    modmeta()
        .arg("set")
        .arg(&file)
        .arg("version")
        .arg("1.0.0")
        .assert()
        .success();

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(on_disk["version"], Value::String("1.0.0".to_string()));
}

#[test]
fn update_merges_object_and_pretty_prints() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog","enabled":true}"#);

    modmeta()
        .arg("update")
        .arg(&file)
        .arg(r#"{"enabled": false, "version": "2.0"}"#)
        .assert()
        .success();

    let text = fs::read_to_string(&file).unwrap();
    assert!(text.contains('\n'), "file should be pretty-printed");

    let on_disk: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(on_disk["name"], "Blog");
    assert_eq!(on_disk["enabled"], false);
    assert_eq!(on_disk["version"], "2.0");
}

#[test]
fn update_rejects_non_object_data() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog"}"#);

    modmeta()
        .arg("update")
        .arg(&file)
        .arg("[1, 2, 3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));

    // The document is untouched
    assert_eq!(fs::read_to_string(&file).unwrap(), r#"{"name":"Blog"}"#);
}

#[test]
fn enable_and_disable_flip_the_flag() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog","enabled":false}"#);

    modmeta().arg("enable").arg(&file).assert().success();
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(on_disk["enabled"], true);

    modmeta().arg("disable").arg(&file).assert().success();
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(on_disk["enabled"], false);
}

#[test]
fn show_round_trips_to_original_content() {
    let temp = tempdir().unwrap();
    let original = r#"{"name":"Blog","deps":["core","auth"],"meta":{"a":1}}"#;
    let file = module_file(&temp, original);

    let assert = modmeta().arg("show").arg(&file).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);

    let shown: Value = serde_json::from_str(&stdout).unwrap();
    let expected: Value = serde_json::from_str(original).unwrap();
    assert_eq!(shown, expected);
}

#[test]
fn cat_prints_raw_disk_content() {
    let temp = tempdir().unwrap();
    let original = r#"{"name":"Blog"}"#;
    let file = module_file(&temp, original);

    let assert = modmeta().arg("cat").arg(&file).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout, original);
}

#[test]
fn keys_print_in_document_order() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"zebra":1,"alpha":2,"middle":3}"#);

    let assert = modmeta().arg("keys").arg(&file).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let keys: Vec<_> = stdout.lines().collect();
    assert_eq!(keys, vec!["zebra", "alpha", "middle"]);
}

#[test]
fn has_reports_presence_via_exit_code() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"name":"Blog"}"#);

    modmeta()
        .arg("has")
        .arg(&file)
        .arg("name")
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    modmeta()
        .arg("has")
        .arg(&file)
        .arg("missing")
        .assert()
        .failure()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn malformed_document_fails_with_path_in_error() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, "{\"name\": ");

    modmeta()
        .arg("get")
        .arg(&file)
        .arg("name")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error processing file"))
        .stderr(predicate::str::contains("module.json"));
}

#[test]
fn missing_file_fails_with_read_error() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("absent.json");

    modmeta()
        .arg("show")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn file_cache_serves_stale_snapshot_across_invocations() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"n":1}"#);
    let cache_dir = temp.path().join(".modmeta");

    let cached_get = |f: &Path, dir: &Path| {
        let mut cmd = modmeta();
        cmd.arg("--cache")
            .arg("--cache-driver")
            .arg("file")
            .arg("--cache-dir")
            .arg(dir)
            .arg("get")
            .arg(f)
            .arg("n");
        cmd
    };

    let assert = cached_get(&file, &cache_dir).assert().success();
    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout).trim(),
        "1"
    );

    // Change the file on disk; the cached snapshot still wins
    write_file(&file, r#"{"n":2}"#);
    let assert = cached_get(&file, &cache_dir).assert().success();
    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout).trim(),
        "1"
    );

    // An uncached read sees the new content
    let assert = modmeta().arg("get").arg(&file).arg("n").assert().success();
    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout).trim(),
        "2"
    );
}

#[test]
fn clear_cache_drops_remembered_documents() {
    let temp = tempdir().unwrap();
    let file = module_file(&temp, r#"{"n":1}"#);
    let cache_dir = temp.path().join(".modmeta");

    modmeta()
        .arg("--cache")
        .arg("--cache-driver")
        .arg("file")
        .arg("--cache-dir")
        .arg(&cache_dir)
        .arg("get")
        .arg(&file)
        .arg("n")
        .assert()
        .success();
    assert!(cache_dir.exists());

    modmeta()
        .arg("clear-cache")
        .arg("--cache-dir")
        .arg(&cache_dir)
        .assert()
        .success();
    assert!(!cache_dir.exists());

    // With the cache gone, the next cached read reflects the file again
    write_file(&file, r#"{"n":2}"#);
    let assert = modmeta()
        .arg("--cache")
        .arg("--cache-driver")
        .arg("file")
        .arg("--cache-dir")
        .arg(&cache_dir)
        .arg("get")
        .arg(&file)
        .arg("n")
        .assert()
        .success();
    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout).trim(),
        "2"
    );
}

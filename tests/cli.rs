//! Binary surface tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn fixture_package() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "fixture-widgets", "version": "0.1.0"}"#,
    )
    .unwrap();

    let src = dir.path().join("src");
    fs::create_dir_all(src.join("util")).unwrap();
    fs::write(
        src.join("util").join("math.ts"),
        "/** Clamp a value. */\nexport function clamp(value: number): number {\n    return value;\n}\n",
    )
    .unwrap();
    fs::write(src.join("index.ts"), "export * from './util/math';\n").unwrap();
    fs::write(
        src.join("Badge.svelte"),
        "<script>\nexport let text: string;\n</script>\n<span>{text}</span>\n",
    )
    .unwrap();
    dir
}

#[test]
fn generate_writes_library_model() {
    let dir = fixture_package();

    Command::cargo_bin("apilens")
        .unwrap()
        .arg("generate")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fixture-widgets"));

    let json = fs::read_to_string(dir.path().join(".apilens").join("library.json")).unwrap();
    assert!(json.contains("\"name\": \"fixture-widgets\""));
    assert!(json.contains("\"clamp\""));
    assert!(json.contains("\"Badge\""));
    assert!(json.ends_with("\n"));

    let wrapper = fs::read_to_string(dir.path().join(".apilens").join("library.ts")).unwrap();
    assert!(wrapper.contains("as LibraryModel"));
}

#[test]
fn generate_is_reproducible() {
    let dir = fixture_package();
    let out = dir.path().join(".apilens").join("library.json");

    Command::cargo_bin("apilens")
        .unwrap()
        .arg("generate")
        .arg(dir.path())
        .assert()
        .success();
    let first = fs::read_to_string(&out).unwrap();

    Command::cargo_bin("apilens")
        .unwrap()
        .arg("generate")
        .arg(dir.path())
        .assert()
        .success();
    let second = fs::read_to_string(&out).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_no_wrapper_skips_accessor() {
    let dir = fixture_package();

    Command::cargo_bin("apilens")
        .unwrap()
        .arg("generate")
        .arg(dir.path())
        .arg("--no-wrapper")
        .assert()
        .success();

    assert!(!dir.path().join(".apilens").join("library.ts").exists());
}

#[test]
fn check_reports_duplicates_in_strict_mode() {
    let dir = fixture_package();
    fs::write(
        dir.path().join("src").join("other.ts"),
        "export function clamp(v: number): number {\n    return v;\n}\n",
    )
    .unwrap();

    Command::cargo_bin("apilens")
        .unwrap()
        .arg("check")
        .arg(dir.path())
        .arg("--strict")
        .assert()
        .failure()
        .stdout(predicate::str::contains("clamp"));

    // Advisory by default.
    Command::cargo_bin("apilens")
        .unwrap()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn check_fails_on_broken_component() {
    let dir = fixture_package();
    fs::write(
        dir.path().join("src").join("Broken.svelte"),
        "<script>\nexport let a: string;\n</script>\n<p>{a</p>\n",
    )
    .unwrap();

    Command::cargo_bin("apilens")
        .unwrap()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken.svelte"));
}

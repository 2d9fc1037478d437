use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Extract `content` into `catalog` inside `test`.
fn extract(test: &CliTest, content: &str, catalog: &str) -> Result<()> {
    test.write_file("scene.py", content)?;
    let output = test
        .extract_command()
        .args(["scene.py", "-o", catalog])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    Ok(())
}

fn drifted() -> Result<CliTest> {
    let test = CliTest::new()?;
    extract(
        &test,
        "tr(\"Okay!\")\ntr(\"Goodbye Bones\")\ntr(\"Real Meal\")\n",
        "old.json",
    )?;
    extract(
        &test,
        "tr(\"Okay!\")\ntr(\"Real Meal\")\ntr(\"Table for Five\")\n",
        "new.json",
    )?;
    Ok(test)
}

#[test]
fn test_diff_against_itself() -> Result<()> {
    let test = CliTest::new()?;
    extract(&test, "tr(\"Okay!\")\ntr(\"(sigh)\")\n", "catalog.json")?;

    assert_cmd_snapshot!(
        test.diff_command().args(["catalog.json", "catalog.json", "--exit-code"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Catalogs match (2 entries unchanged)

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_diff_reports_added_and_removed() -> Result<()> {
    let test = drifted()?;

    let output = test.diff_command().args(["old.json", "new.json"]).output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("added: \"Table for Five\""));
    assert!(out.contains("  --> scene.py:3:1\n"));
    assert!(out.contains("removed: \"Goodbye Bones\""));
    assert!(out.ends_with("\u{2718} 2 changes (1 added, 1 removed, 0 changed), 2 unchanged\n"));

    Ok(())
}

#[test]
fn test_diff_exit_code_flag() -> Result<()> {
    let test = drifted()?;

    let output = test
        .diff_command()
        .args(["old.json", "new.json", "--exit-code"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_diff_json_format() -> Result<()> {
    let test = drifted()?;

    let output = test
        .diff_command()
        .args(["old.json", "new.json", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["added"][0]["canonical_text"], "Table for Five");
    assert_eq!(report["removed"][0]["canonical_text"], "Goodbye Bones");
    assert_eq!(report["changed"], serde_json::json!([]));
    assert_eq!(report["unchanged"], 2);

    Ok(())
}

#[test]
fn test_diff_rejects_tampered_catalog() -> Result<()> {
    let test = drifted()?;
    let tampered = test.read_file("old.json")?.replace("Goodbye Bones", "Goodbye Bone");
    test.write_file("old.json", &tampered)?;

    let output = test.diff_command().args(["old.json", "new.json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid catalog old.json"));
    assert!(stderr(&output).contains("hash mismatch"));

    Ok(())
}

#[test]
fn test_diff_rejects_malformed_json() -> Result<()> {
    let test = drifted()?;
    test.write_file("broken.json", "{ not json")?;

    let output = test
        .diff_command()
        .args(["broken.json", "new.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid catalog broken.json"));

    Ok(())
}

#[test]
fn test_diff_missing_catalog() -> Result<()> {
    let test = drifted()?;

    let output = test
        .diff_command()
        .args(["old.json", "nowhere.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to read nowhere.json"));

    Ok(())
}

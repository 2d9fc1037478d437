use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, catalog_texts, stderr, stdout};

const SCENE: &str = r#"# Localizable strings extracted by LocalizationDemo.tscn
tr("Accelerator")
tr("Okay!")
tr("Yeah!\nThis is definitely a real conversation.")
tr("Okay!")
tr("Hey #player#, it's \"Real Meal\" time")
"#;

#[test]
fn test_extract_writes_catalog() -> Result<()> {
    let test = CliTest::with_file("scene.py", SCENE)?;

    let output = test.extract_command().arg("scene.py").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Extracted 5 strings (4 entries) from 1 document -> catalog.json\n"
    );

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog["version"], 1);
    assert_eq!(
        catalog_texts(&catalog),
        vec![
            "Accelerator",
            "Okay!",
            "Yeah!\\nThis is definitely a real conversation.",
            "Hey #player#, it's \\\"Real Meal\\\" time",
        ]
    );

    let okay = &catalog["entries"][1];
    assert_eq!(okay["rank"], 1);
    assert_eq!(okay["key"].as_str().map(str::len), Some(32));
    let lines: Vec<u64> = okay["occurrences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["line"].as_u64().unwrap())
        .collect();
    assert_eq!(lines, vec![3, 5]);

    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("scene.py", SCENE)?;

    test.extract_command()
        .args(["scene.py", "-o", "first.json"])
        .output()?;
    test.extract_command()
        .args(["scene.py", "-o", "second.json"])
        .output()?;

    assert_eq!(test.read_file("first.json")?, test.read_file("second.json")?);

    Ok(())
}

#[test]
fn test_extract_custom_output_path() -> Result<()> {
    let test = CliTest::with_file("scene.py", SCENE)?;

    let output = test
        .extract_command()
        .args(["scene.py", "-o", "locale/catalog.json"])
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("locale/catalog.json").exists());
    assert!(!test.root().join("catalog.json").exists());

    Ok(())
}

#[test]
fn test_same_text_across_documents_shares_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("intro.py", "tr(\"(sigh)\")\n")?;
    test.write_file("ending.py", "tr(\"Goodbye Bones\")\n\ntr(\"(sigh)\")\n")?;

    let output = test
        .extract_command()
        .args(["intro.py", "ending.py"])
        .output()?;
    assert!(output.status.success());

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["(sigh)", "Goodbye Bones"]);
    assert_eq!(
        catalog["entries"][0]["occurrences"],
        serde_json::json!([
            { "document_id": "intro.py", "line": 1, "column": 1 },
            { "document_id": "ending.py", "line": 3, "column": 1 },
        ])
    );

    Ok(())
}

#[test]
fn test_document_order_decides_rank() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.py", "tr(\"from a\")\n")?;
    test.write_file("b.py", "tr(\"from b\")\n")?;

    test.extract_command().args(["b.py", "a.py"]).output()?;

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["from b", "from a"]);

    Ok(())
}

#[test]
fn test_malformed_marker_is_reported_and_skipped() -> Result<()> {
    let test = CliTest::with_file(
        "scene.py",
        "tr(\"Okay!\")\nname = tr(\"Table for Five\ntr(\"Teensy Taste\")\n",
    )?;

    let output = test.extract_command().arg("scene.py").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"unterminated string literal\"  malformed-marker"));
    assert!(out.contains("  --> scene.py:2:8\n"));
    assert!(out.contains("2 | name = tr(\"Table for Five\n  |        ^\n"));
    assert!(out.contains("\u{2718} 1 problems (1 error, 0 warnings)"));

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["Okay!", "Teensy Taste"]);

    Ok(())
}

#[test]
fn test_non_literal_argument_is_a_warning() -> Result<()> {
    let test = CliTest::with_file("scene.gd", "label.text = tr(line_id)\ntr(\"Okay!\")\n")?;

    let output = test.extract_command().arg("scene.gd").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: \"marker argument is not a string literal\"  non-literal"));
    assert!(out.contains("  --> scene.gd:1:14\n"));
    assert!(out.contains("\u{2713} Extracted 1 string (1 entry) from 1 document"));

    Ok(())
}

#[test]
fn test_unreadable_document_blocks_catalog() -> Result<()> {
    let test = CliTest::with_file("scene.py", SCENE)?;

    let output = test
        .extract_command()
        .args(["scene.py", "missing.py"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("read-failure"));
    assert!(stdout(&output).contains("  --> missing.py\n"));
    assert!(stderr(&output).contains("catalog is incomplete and was not written"));
    assert!(!test.root().join("catalog.json").exists());

    Ok(())
}

#[test]
fn test_variants_are_reported() -> Result<()> {
    let test = CliTest::with_file("scene.py", "tr(\"Okay!\")\ntr(\"okay\")\n")?;

    let output = test.extract_command().arg("scene.py").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: \"okay\"  variant"));
    assert!(out.contains("note: variant of \"Okay!\" (rank 0)"));

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["Okay!", "okay"]);

    Ok(())
}

#[test]
fn test_config_disables_variants() -> Result<()> {
    let test = CliTest::with_file("scene.py", "tr(\"Okay!\")\ntr(\"okay\")\n")?;
    test.write_file(".trcatrc.json", r#"{ "reportVariants": false }"#)?;

    let output = test.extract_command().arg("scene.py").output()?;

    assert!(!stdout(&output).contains("variant"));

    Ok(())
}

#[test]
fn test_config_markers_and_output() -> Result<()> {
    let test = CliTest::with_file("scene.py", "_(\"Real Meal\")\ntr(\"ignored\")\n")?;
    test.write_file(
        ".trcatrc.json",
        r#"{ "markers": ["_"], "output": "out/strings.json" }"#,
    )?;

    let output = test.extract_command().arg("scene.py").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let catalog = test.read_json("out/strings.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["Real Meal"]);

    Ok(())
}

#[test]
fn test_cli_markers_override_config() -> Result<()> {
    let test = CliTest::with_file("scene.py", "_(\"a\")\nN_(\"b\")\ntr(\"c\")\n")?;
    test.write_file(".trcatrc.json", r#"{ "markers": ["_"] }"#)?;

    test.extract_command()
        .args(["scene.py", "--marker", "N_", "--marker", "tr"])
        .output()?;

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["b", "c"]);

    Ok(())
}

#[test]
fn test_directory_walk_uses_extensions_and_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("scenes/b_intro.gd", "tr(\"b\")\n")?;
    test.write_file("scenes/a_intro.tscn", "tr(\"a\")\n")?;
    test.write_file("scenes/notes.md", "tr(\"markdown\")\n")?;
    test.write_file("scenes/generated/c.py", "tr(\"generated\")\n")?;
    test.write_file(".trcatrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;

    let output = test.extract_command().arg("scenes").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let catalog = test.read_json("catalog.json")?;
    assert_eq!(catalog_texts(&catalog), vec!["a", "b"]);
    assert_eq!(
        catalog["entries"][0]["occurrences"][0]["document_id"],
        "scenes/a_intro.tscn"
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_entry_blocks_catalog() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("scenes/intro.gd", "tr(\"Okay!\")\n")?;
    std::os::unix::fs::symlink(
        test.root().join("scenes/gone.gd"),
        test.root().join("scenes/link.gd"),
    )?;

    let output = test.extract_command().arg("scenes").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("read-failure"));
    assert!(stdout(&output).contains("  --> scenes/link.gd\n"));
    assert!(stderr(&output).contains("catalog is incomplete and was not written"));
    assert!(!test.root().join("catalog.json").exists());

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file("scene.py", SCENE)?;
    test.write_file(".trcatrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().arg("scene.py").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

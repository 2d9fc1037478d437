use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, catalog_texts, stderr, stdout};

fn with_catalog() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "Intro.tscn",
        "tr(\"Accelerator\")\ntr(\"Okay!\")\ntr('Say \"cheese\"')\n",
    )?;
    test.write_file("Ending.tscn", "tr(\"Okay!\")\ntr(\"Goodbye Bones\")\n")?;
    let output = test
        .extract_command()
        .args(["Intro.tscn", "Ending.tscn"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    Ok(test)
}

#[test]
fn test_manifest_to_stdout() -> Result<()> {
    let test = with_catalog()?;

    let output = test
        .command()
        .args(["manifest", "catalog.json"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "# Localizable strings extracted by Intro.tscn\n\
         tr(\"Accelerator\")\n\
         tr(\"Okay!\")\n\
         tr('Say \"cheese\"')\n\
         # Localizable strings extracted by Ending.tscn\n\
         tr(\"Goodbye Bones\")\n"
    );

    Ok(())
}

#[test]
fn test_manifest_round_trips_through_extract() -> Result<()> {
    let test = with_catalog()?;

    let output = test
        .command()
        .args(["manifest", "catalog.json", "-o", "manifest.py"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\u{2713} Wrote 4 entries to manifest.py\n"
    );

    test.extract_command()
        .args(["manifest.py", "-o", "again.json"])
        .output()?;

    assert_eq!(
        catalog_texts(&test.read_json("again.json")?),
        catalog_texts(&test.read_json("catalog.json")?)
    );

    Ok(())
}

#[test]
fn test_manifest_custom_marker() -> Result<()> {
    let test = with_catalog()?;

    let output = test
        .command()
        .args(["manifest", "catalog.json", "--marker", "_"])
        .output()?;

    assert!(stdout(&output).contains("\n_(\"Okay!\")\n"));

    let output = test
        .command()
        .args(["manifest", "catalog.json", "--marker", "not a marker"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid marker"));

    Ok(())
}

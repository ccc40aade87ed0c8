use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const RIS_INPUT: &str = "TY  - ELEC\nTI  - Command Line\nER  -\n";

fn bibxml() -> Command {
    let mut cmd = Command::cargo_bin("bibxml").expect("bibxml binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[cfg(feature = "bibtex")]
#[test]
fn bib_input_writes_xml_next_to_it() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("library.bib");
    fs::write(&input, "@misc{cli2024,\n  title = {From the Shell},\n}\n")?;

    bibxml().arg(&input).assert().success();

    let written = fs::read_to_string(dir.path().join("library.xml"))?;
    assert!(written.contains("<b:Tag>cli2024</b:Tag>"));
    assert!(written.contains("<b:Title>From the Shell</b:Title>"));
    Ok(())
}

#[test]
fn ris_input_writes_explicit_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("export.ris");
    let output = dir.path().join("refs.xml");
    fs::write(&input, RIS_INPUT)?;

    bibxml().arg(&input).arg("-o").arg(&output).assert().success();

    let written = fs::read_to_string(&output)?;
    assert!(written.contains("<b:Title>Command Line</b:Title>"));
    assert!(!dir.path().join("export.xml").exists());
    Ok(())
}

#[test]
fn xml_input_without_output_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("mendeley.xml");
    let original = "<xml><records><record/></records></xml>";
    fs::write(&input, original)?;

    bibxml()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert_eq!(fs::read_to_string(&input)?, original);
    Ok(())
}

#[test]
fn stdout_flag_prints_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("export.ris");
    fs::write(&input, RIS_INPUT)?;

    bibxml()
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("<?xml")
                .and(predicate::str::contains("<b:Title>Command Line</b:Title>")),
        );

    assert!(!dir.path().join("export.xml").exists());
    Ok(())
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().expect("tmp dir");
    bibxml()
        .arg(dir.path().join("absent.ris"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to convert"));
}

#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mdresume(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mdresume").unwrap();
    cmd.current_dir(dir.path())
        .env("MDRESUME_ROOT", dir.path())
        .env_remove("MDRESUME_PANDOC")
        .env_remove("MDRESUME_SCRIPT")
        .env_remove("MDRESUME_TIMEOUT")
        // Never a terminal: every test runs without interactive prompts.
        .write_stdin("");
    cmd
}

fn read(dir: &TempDir, rel: &str) -> String {
    std::fs::read_to_string(dir.path().join(rel)).unwrap()
}

// ---------------------------------------------------------------------------
// mdresume init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_workspace_layout() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["--pandoc", "mdresume-no-such-pandoc", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created: resumes/tailored"))
        .stdout(predicate::str::contains("Converter not usable"));

    assert!(dir.path().join("resumes/tailored").is_dir());
    assert!(dir.path().join("cover-letters/tailored").is_dir());
    assert!(dir.path().join("templates").is_dir());
    assert!(dir.path().join(".mdresume/config.yaml").exists());
}

#[test]
fn init_does_not_persist_converter_overrides() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["--pandoc", "mdresume-no-such-pandoc", "--timeout", "7", "init"])
        .assert()
        .success();

    let config = read(&dir, ".mdresume/config.yaml");
    assert!(!config.contains("mdresume-no-such-pandoc"), "{config}");
    assert!(config.contains("path: pandoc"), "{config}");
    assert!(config.contains("timeout_seconds: 0"), "{config}");
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir).arg("init").assert().success();
    mdresume(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  cover-letters/tailored"))
        .stdout(predicate::str::contains("created:").not());
}

// ---------------------------------------------------------------------------
// mdresume new
// ---------------------------------------------------------------------------

#[test]
fn new_resume_from_piped_content() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args([
            "new", "resume", "--company", "Stripe", "--position", "Senior", "--stdin",
        ])
        .write_stdin("line1\nline2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created: stripe-senior.md (2 lines from clipboard)",
        ));

    assert_eq!(read(&dir, "resumes/tailored/stripe-senior.md"), "line1\nline2\n");
}

#[test]
fn new_cover_letter_empty() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["new", "cover", "--company", "Acme Corp", "--source", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created: acme-corp-cover.md"));

    assert_eq!(read(&dir, "cover-letters/tailored/acme-corp-cover.md"), "");
}

#[test]
fn new_without_company_fails_without_terminal() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["new", "resume", "--source", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--company is required"));
    assert!(!dir.path().join("resumes").exists());
}

#[test]
fn new_with_blank_company_is_rejected() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["new", "resume", "--company", "   ", "--source", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("company name cannot be empty"));
}

#[test]
fn empty_piped_content_creates_no_file() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["new", "resume", "--company", "google", "--stdin"])
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("clipboard is empty"));
    assert!(!dir.path().join("resumes/tailored/google.md").exists());
}

#[test]
fn existing_document_is_not_overwritten_without_force() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("resumes/tailored")).unwrap();
    std::fs::write(dir.path().join("resumes/tailored/stripe.md"), "original").unwrap();

    mdresume(&dir)
        .args(["new", "resume", "--company", "stripe", "--stdin"])
        .write_stdin("replacement\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file already exists"));
    assert_eq!(read(&dir, "resumes/tailored/stripe.md"), "original");

    mdresume(&dir)
        .args(["new", "resume", "--company", "stripe", "--stdin", "--force"])
        .write_stdin("replacement\n")
        .assert()
        .success();
    assert_eq!(read(&dir, "resumes/tailored/stripe.md"), "replacement\n");
}

#[test]
fn new_json_output() {
    let dir = TempDir::new().unwrap();
    let out = mdresume(&dir)
        .args(["--json", "new", "cover", "--company", "Acme", "--stdin"])
        .write_stdin("Dear Acme,\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["kind"], "cover_letter");
    assert_eq!(value["line_count"], 1);
}

// ---------------------------------------------------------------------------
// mdresume open
// ---------------------------------------------------------------------------

#[test]
fn open_missing_build_folder_fails() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["open", "--company", "stripe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doesn't exist yet: build/stripe/"));
}

// ---------------------------------------------------------------------------
// mdresume config
// ---------------------------------------------------------------------------

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    mdresume(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resume_output_name: Your_Name_Resume"))
        .stdout(predicate::str::contains("type: pandoc"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".mdresume")).unwrap();
    std::fs::write(
        dir.path().join(".mdresume/config.yaml"),
        "resume_output_name: ''\n",
    )
    .unwrap();
    mdresume(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[error] resume_output_name cannot be empty",
        ));
}

// ---------------------------------------------------------------------------
// mdresume build
// ---------------------------------------------------------------------------

#[test]
fn build_rejects_non_markdown() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
    mdresume(&dir)
        .args(["build", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a markdown file"));
}

#[test]
fn build_with_missing_pandoc_fails_with_guidance() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("stripe.md"), "# Jane\n").unwrap();
    mdresume(&dir)
        .args(["--pandoc", "mdresume-no-such-pandoc", "build", "stripe.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("https://pandoc.org/installing.html"));
    assert!(!dir.path().join("build").exists());
}

#[test]
fn build_with_missing_script_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("stripe.md"), "# Jane\n").unwrap();
    mdresume(&dir)
        .args(["--script", "./scripts/build.sh", "build", "stripe.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("build script not found"));
}

#[test]
fn company_override_must_stay_under_build() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("stripe.md"), "# Jane\n").unwrap();
    mdresume(&dir)
        .args(["build", "stripe.md", "--company", "../outside"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a plain name"));
    mdresume(&dir)
        .args(["open", "--company", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a plain name"));
    assert!(!dir.path().join("build").exists());
}

#[cfg(unix)]
mod with_fake_pandoc {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// A stand-in for pandoc that copies the source to the output, failing
    /// on demand via FAIL_DOCX / FAIL_PDF.
    fn fake_pandoc(dir: &TempDir) -> PathBuf {
        let bin_dir = dir.path().join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        let path = bin_dir.join("pandoc");
        std::fs::write(
            &path,
            r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "pandoc 3.1.9"; exit 0; fi
case "$3" in
  *.pdf) if [ -n "$FAIL_PDF" ]; then echo "Error producing PDF." >&2; exit 43; fi ;;
  *.docx) if [ -n "$FAIL_DOCX" ]; then echo "pandoc: cannot write docx" >&2; exit 1; fi ;;
esac
cp "$1" "$3"
"#,
        )
        .unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn resume(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join("resumes/tailored").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "# Jane Doe\n").unwrap();
        path
    }

    #[test]
    fn build_docx() {
        let dir = TempDir::new().unwrap();
        let pandoc = fake_pandoc(&dir);
        let src = resume(&dir, "stripe-senior.md");

        mdresume(&dir)
            .arg("--pandoc")
            .arg(&pandoc)
            .arg("build")
            .arg(&src)
            .assert()
            .success()
            .stdout(predicate::str::contains("Document built successfully for stripe"));

        assert_eq!(read(&dir, "build/stripe/Your_Name_Resume.docx"), "# Jane Doe\n");
        assert!(!dir.path().join("build/stripe/Your_Name_Resume.pdf").exists());
    }

    #[test]
    fn build_pdf_failure_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let pandoc = fake_pandoc(&dir);
        let src = resume(&dir, "acme.md");

        mdresume(&dir)
            .env("FAIL_PDF", "1")
            .arg("--pandoc")
            .arg(&pandoc)
            .args(["build", "--pdf"])
            .arg(&src)
            .assert()
            .success()
            .stderr(predicate::str::contains("PDF generation failed"));

        assert!(dir.path().join("build/acme/Your_Name_Resume.docx").exists());
    }

    #[test]
    fn build_docx_failure_fails() {
        let dir = TempDir::new().unwrap();
        let pandoc = fake_pandoc(&dir);
        let src = resume(&dir, "acme.md");

        mdresume(&dir)
            .env("FAIL_DOCX", "1")
            .arg("--pandoc")
            .arg(&pandoc)
            .args(["build", "--pdf"])
            .arg(&src)
            .assert()
            .failure()
            .stderr(predicate::str::contains("docx conversion failed: pandoc: cannot write docx"));
    }

    #[test]
    fn build_cover_letter_uses_configured_name() {
        let dir = TempDir::new().unwrap();
        let pandoc = fake_pandoc(&dir);
        std::fs::create_dir_all(dir.path().join(".mdresume")).unwrap();
        std::fs::write(
            dir.path().join(".mdresume/config.yaml"),
            format!(
                "converter:\n  type: pandoc\n  path: {}\ncover_letter_output_name: Jane_Doe_Letter\n",
                pandoc.display()
            ),
        )
        .unwrap();
        let letter = dir.path().join("cover-letters/tailored/acme-cover.md");
        std::fs::create_dir_all(letter.parent().unwrap()).unwrap();
        std::fs::write(&letter, "Dear Acme,\n").unwrap();

        mdresume(&dir)
            .args(["build", "cover-letters/tailored/acme-cover.md"])
            .assert()
            .success();
        assert_eq!(read(&dir, "build/acme/Jane_Doe_Letter.docx"), "Dear Acme,\n");
    }

    #[test]
    fn new_then_build_carries_company_through() {
        let dir = TempDir::new().unwrap();
        let pandoc = fake_pandoc(&dir);

        mdresume(&dir)
            .arg("--pandoc")
            .arg(&pandoc)
            .args([
                "new", "resume", "--company", "Acme Corp", "--position", "Staff", "--stdin",
                "--build", "docx",
            ])
            .write_stdin("# Jane\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created: acme-corp-staff.md"))
            .stdout(predicate::str::contains("Document built successfully for acme-corp"));

        assert!(dir
            .path()
            .join("build/acme-corp/Your_Name_Resume.docx")
            .exists());
    }

    #[test]
    fn build_json_lists_outcomes() {
        let dir = TempDir::new().unwrap();
        let pandoc = fake_pandoc(&dir);
        let src = resume(&dir, "stripe.md");

        let out = mdresume(&dir)
            .arg("--json")
            .arg("--pandoc")
            .arg(&pandoc)
            .args(["build", "--pdf"])
            .arg(&src)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["company"], "stripe");
        assert_eq!(value["outcomes"].as_array().unwrap().len(), 2);
        assert_eq!(value["outcomes"][1]["format"], "pdf");
        assert_eq!(value["outcomes"][1]["exit_succeeded"], true);
    }
}

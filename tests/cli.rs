use predicates::prelude::*;

#[test]
fn missing_input_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("spellbook-split");
    cmd.current_dir(dir.path())
        .args(["--no-prompt", "no-such-deck.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn non_pdf_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cards.pdf"), "plain text").unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("spellbook-split");
    cmd.current_dir(dir.path())
        .args(["--no-prompt", "cards.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cards.pdf"));
}

#[test]
fn quality_out_of_range_is_a_usage_error() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("spellbook-split");
    cmd.args(["--quality", "0", "deck.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quality"));
}

#[test]
fn hires_with_empty_input_dir_reports_no_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("spells")).unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("spell-hires");
    cmd.current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No PDFs found in spells/"));
    assert!(!dir.path().join("high_res_images").exists());
}

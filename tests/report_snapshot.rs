use insta::assert_snapshot;
use rocrate_validate::output::render_text;
use rocrate_validate::validation::Validator;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn snapshot_broken_references_report() {
    colored::control::set_override(false);

    let report = Validator::default().validate_path(&fixture("broken_references"));
    let text = render_text(&report, false);

    assert_snapshot!("broken_references_report", text);
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

fn temp_file_with(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("mosaic")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render mixed content as HTML fragments"))
        .stdout(predicate::str::contains("--shared"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("mosaic")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mosaic"));
}

#[test]
fn test_items_are_required() {
    cargo_bin_cmd!("mosaic").assert().failure();
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_plain_text_raw_output() {
    cargo_bin_cmd!("mosaic")
        .args(["--raw", "Hello"])
        .assert()
        .success()
        .stdout("<div><p>Hello</p></div>\n");
}

#[test]
fn test_pretty_output_by_default() {
    cargo_bin_cmd!("mosaic")
        .arg("Hello")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div>\n <p>"))
        .stdout(predicate::str::contains("Hello"));
}

#[test]
fn test_style_is_applied() {
    cargo_bin_cmd!("mosaic")
        .args(["--raw", "--style", r#"{"color": "red", "class": "lead"}"#, "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p style='color: red;' class='lead'>Hello</p>"));
}

#[test]
fn test_invalid_style_json_fails() {
    cargo_bin_cmd!("mosaic")
        .args(["--style", "{nope", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in --style argument"));
}

#[test]
fn test_markdown_from_stdin() {
    cargo_bin_cmd!("mosaic")
        .args(["--raw", "-"])
        .write_stdin("# Title\n\nSome *emphasis* here.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Title</h1>"))
        .stdout(predicate::str::contains("<em>emphasis</em>"));
}

#[test]
fn test_item_from_file() {
    let chart = temp_file_with(".json", r#"{"data":[{"type":"bar","x":[1],"y":[2]}],"layout":{}}"#);
    let arg = format!("@{}", chart.path().display());

    cargo_bin_cmd!("mosaic")
        .args(["--raw", "--height", "250px", &arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("id='plotly-chart-"))
        .stdout(predicate::str::contains("height: 250px;"))
        .stdout(predicate::str::contains("Plotly.newPlot"));
}

#[test]
fn test_missing_item_file_fails() {
    cargo_bin_cmd!("mosaic")
        .arg("@/definitely/not/here.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_row_layout() {
    cargo_bin_cmd!("mosaic")
        .args(["--raw", "--row", "--columns", "4,8", "Left", "Right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<div class='row'>"))
        .stdout(predicate::str::contains("<div class='col-md-4 responsive-text'><p>Left</p></div>"))
        .stdout(predicate::str::contains("<div class='col-md-8 responsive-text'><p>Right</p></div>"));
}

#[test]
fn test_row_column_mismatch_fails() {
    cargo_bin_cmd!("mosaic")
        .args(["--row", "--columns", "4,4", "a", "b", "c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render row"));
}

// ============================================================================
// Shared Data Tests
// ============================================================================

#[test]
fn test_shared_data_is_emitted_once() {
    let geojson = temp_file_with(".geojson", r#"{"type":"FeatureCollection","features":[]}"#);
    let shared = format!("regions={}", geojson.path().display());
    let chart = r#"{"data":[{"type":"choropleth","locations":["A"],"z":[1]}],"layout":{}}"#;

    let output = cargo_bin_cmd!("mosaic")
        .args(["--raw", "--shared", &shared, "--use-shared", "regions", chart, chart])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-type="geojson""#))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches(r#"id="shared-data-regions""#).count(), 1);
    assert_eq!(
        stdout
            .matches(r#"var dataElementId = "shared-data-regions";"#)
            .count(),
        2
    );
}

#[test]
fn test_invalid_shared_argument_fails() {
    cargo_bin_cmd!("mosaic")
        .args(["--shared", "no-equals-sign", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ID=PATH[:TYPE]"));
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_classify_prints_categories() {
    cargo_bin_cmd!("mosaic")
        .args([
            "--classify",
            "Plain words",
            "https://example.com/logo.png",
            "<b>bold</b>",
        ])
        .assert()
        .success()
        .stdout("plain-text\nimage-url\nraw-html-text\n");
}

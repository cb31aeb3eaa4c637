use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

/// Run courtchart with arguments and optional stdin
fn run_courtchart(args: &[&str], stdin: Option<&str>) -> Result<Vec<u8>, String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_courtchart"))
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut handle) = child.stdin.take() {
        if let Some(input) = stdin {
            handle
                .write_all(input.as_bytes())
                .map_err(|e| format!("Failed to write to stdin: {}", e))?;
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

/// Check if bytes are an SVG document
fn is_valid_svg(bytes: &[u8]) -> bool {
    String::from_utf8_lossy(bytes).trim_start().starts_with("<svg")
}

/// Render a fixture to a temp file and return the bytes written
fn render_fixture(path: &str, format: &str) -> Result<Vec<u8>, String> {
    let dir = tempfile::tempdir().map_err(|e| format!("tempdir: {}", e))?;
    let out = dir.path().join(format!("chart.{}", format));
    let out_str = out.to_str().ok_or("non utf-8 temp path")?;
    run_courtchart(
        &[
            "render", "--input", path, "--output", out_str, "--format", format, "--width", "640",
            "--height", "480",
        ],
        None,
    )?;
    fs::read(&out).map_err(|e| format!("output not written: {}", e))
}

fn normalize_fixture(path: &str) -> Result<Value, String> {
    let stdout = run_courtchart(&["normalize", "--input", path], None)?;
    serde_json::from_slice(&stdout).map_err(|e| format!("stdout is not JSON: {}", e))
}

#[test]
fn test_normalize_compare_stats() {
    let spec = normalize_fixture("test/compare_stats.json").expect("normalize failed");
    assert_eq!(spec["status"], "chart");
    assert_eq!(spec["archetype"], "CompareStats");
    assert_eq!(spec["xKey"], "season");
    assert_eq!(
        spec["seriesKeys"],
        serde_json::json!(["LeBron James", "Kevin Durant"])
    );
    assert_eq!(spec["domain"], serde_json::json!([0.0, "auto"]));
    assert_eq!(spec["labels"]["title"], "Comparison: Points Per Game");
}

#[test]
fn test_normalize_leaderboard() {
    let spec = normalize_fixture("test/leaderboard.json").expect("normalize failed");
    assert_eq!(spec["xKey"], "name");
    assert_eq!(spec["seriesKeys"], serde_json::json!(["pts"]));
    let records = spec["records"].as_array().expect("records array");
    assert_eq!(records[0]["name"], "Joel Embiid");
    assert_eq!(records[1]["pts"], 33.9);
    assert_eq!(records[2]["name"], "Giannis Antetokounmpo");
    // A null stat keeps its row instead of failing the chart
    assert_eq!(records.len(), 4);
    assert_eq!(records[3]["name"], "Shai Gilgeous-Alexander");
    assert!(records[3]["pts"].is_null());
}

#[test]
fn test_normalize_from_stdin() {
    let json = fs::read_to_string("test/skill_profile.json").expect("Failed to read fixture");
    let stdout = run_courtchart(&["normalize"], Some(&json)).expect("normalize failed");
    let spec: Value = serde_json::from_slice(&stdout).expect("stdout is not JSON");
    assert_eq!(spec["archetype"], "CategoricalBreakdown");
    assert_eq!(spec["variant"], "Single");
    assert_eq!(spec["labels"]["title"], "Luka Doncic Profile");
}

#[test]
fn test_normalize_empty_data() {
    let spec = normalize_fixture("test/empty.json").expect("normalize failed");
    assert_eq!(spec["status"], "empty");
    assert_eq!(spec["message"], "No data available");
}

#[test]
fn test_missing_stat_key_fails() {
    let err = normalize_fixture("test/missing_stat_key.json").unwrap_err();
    assert!(err.contains("statKey"), "unexpected error: {}", err);
}

#[test]
fn test_failed_query_fails() {
    let err = normalize_fixture("test/failed_query.json").unwrap_err();
    assert!(err.contains("relation does not exist"), "unexpected error: {}", err);
}

#[test]
fn test_render_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("chart.csv");
    let out_str = out.to_str().expect("utf-8 path");

    run_courtchart(
        &[
            "render",
            "--input",
            "test/compare_stats.json",
            "--output",
            out_str,
            "--format",
            "csv",
        ],
        None,
    )
    .expect("render failed");

    let csv = fs::read_to_string(&out).expect("output written");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("season,LeBron James,Kevin Durant"));
    assert_eq!(lines.next(), Some("2021-22,30.3,29.9"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_render_empty_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("empty.csv");

    run_courtchart(
        &[
            "render",
            "--input",
            "test/empty.json",
            "--output",
            out.to_str().expect("utf-8 path"),
            "--format",
            "csv",
        ],
        None,
    )
    .expect("render failed");

    assert_eq!(
        fs::read_to_string(&out).expect("output written"),
        "message\nNo data available\n"
    );
}

#[test]
fn test_invalid_json_input() {
    let result = run_courtchart(&["normalize"], Some("not json"));
    assert!(result.is_err(), "Should fail on malformed input");
}

#[test]
fn test_missing_input_file() {
    let result = run_courtchart(&["normalize", "--input", "test/does_not_exist.json"], None);
    assert!(result.is_err(), "Should fail on missing file");
}

const CHART_FIXTURES: [&str; 5] = [
    "test/trend.json",
    "test/compare_stats.json",
    "test/skill_profile.json",
    "test/compare_radar.json",
    "test/leaderboard.json",
];

#[test]
fn test_render_png_for_every_chart() {
    for fixture in CHART_FIXTURES {
        let result = render_fixture(fixture, "png");
        assert!(result.is_ok(), "{} failed: {:?}", fixture, result.err());
        let png_bytes = result.unwrap();
        assert!(is_valid_png(&png_bytes), "{} is not a valid PNG", fixture);
    }
}

#[test]
fn test_render_svg_for_every_chart() {
    for fixture in CHART_FIXTURES {
        let result = render_fixture(fixture, "svg");
        assert!(result.is_ok(), "{} failed: {:?}", fixture, result.err());
        let svg_bytes = result.unwrap();
        assert!(is_valid_svg(&svg_bytes), "{} is not an SVG", fixture);
    }
}

#[test]
fn test_render_empty_png() {
    let result = render_fixture("test/empty.json", "png");
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_render_empty_svg() {
    let result = render_fixture("test/empty.json", "svg");
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_svg(&result.unwrap()));
}

#[test]
fn test_render_rejects_oversized_canvas() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("huge.png");
    let result = run_courtchart(
        &[
            "render",
            "--input",
            "test/leaderboard.json",
            "--output",
            out.to_str().expect("utf-8 path"),
            "--width",
            "4294967295",
            "--height",
            "4294967295",
        ],
        None,
    );
    assert!(result.is_err(), "Should refuse a canvas that cannot be allocated");
}

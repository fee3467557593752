use std::process::Command;

/// Helper function to run ukpopmap with the given arguments
fn run_ukpopmap(args: &[&str]) -> Result<Vec<u8>, String> {
    let output = Command::new("cargo")
        .args(["run", "--bin", "ukpopmap", "--"])
        .args(args)
        .output()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

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

#[test]
fn test_end_to_end_map_default() {
    let result = run_ukpopmap(&[
        "map",
        "--data-dir",
        "test/data",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let png_bytes = result.unwrap();
    assert!(is_valid_png(&png_bytes), "Output is not a valid PNG");
}

#[test]
fn test_end_to_end_map_gender_and_age_group() {
    let result = run_ukpopmap(&[
        "map",
        "--year",
        "2011",
        "--gender",
        "female",
        "--age-group",
        "young_adults",
        "--data-dir",
        "test/data",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_map_combined_population() {
    // Both + specific age group takes the combined-population path
    let result = run_ukpopmap(&[
        "map",
        "--gender",
        "both",
        "--age-group",
        "teens",
        "--data-dir",
        "test/data",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_map_plasma() {
    let result = run_ukpopmap(&[
        "map",
        "--palette",
        "plasma",
        "--data-dir",
        "test/data",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_map_svg() {
    let result = run_ukpopmap(&[
        "map",
        "--format",
        "svg",
        "--data-dir",
        "test/data",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let svg = String::from_utf8(result.unwrap()).expect("SVG output is not UTF-8");
    assert!(svg.contains("<svg"), "Output is not an SVG document");
}

#[test]
fn test_end_to_end_bars() {
    let result = run_ukpopmap(&["bars", "--gender", "male", "--data-dir", "test/data"]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_bars_both_genders() {
    let result = run_ukpopmap(&[
        "bars",
        "--year",
        "2011",
        "--gender",
        "both",
        "--data-dir",
        "test/data",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_output_file() {
    let out_path = std::env::temp_dir().join("ukpopmap_test_bars.png");
    let result = run_ukpopmap(&[
        "bars",
        "--data-dir",
        "test/data",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let bytes = std::fs::read(&out_path).expect("Output file missing");
    assert!(is_valid_png(&bytes));
    let _ = std::fs::remove_file(&out_path);
}

#[test]
fn test_end_to_end_missing_column() {
    let result = run_ukpopmap(&[
        "map",
        "--gender",
        "both",
        "--age-group",
        "seniors_elderly",
        "--data-dir",
        "test/data_missing_column",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_err(), "Should have failed the schema check");
    assert!(result.unwrap_err().contains("missing from table"));
}

#[test]
fn test_end_to_end_empty_csv() {
    let result = run_ukpopmap(&[
        "map",
        "--data-dir",
        "test/data_empty",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_err(), "Should have failed with empty CSV error");
    assert!(result.unwrap_err().contains("at least one data row"));
}

#[test]
fn test_end_to_end_missing_data_dir() {
    let result = run_ukpopmap(&["map", "--data-dir", "test/no_such_dir"]);
    assert!(result.is_err(), "Should have failed to open the CSV");
    assert!(result.unwrap_err().contains("Failed to open"));
}

#[test]
fn test_end_to_end_invalid_selection_rejected() {
    let result = run_ukpopmap(&[
        "map",
        "--gender",
        "other",
        "--data-dir",
        "test/data",
        "--boundaries",
        "test/data/boundaries.geojson",
    ]);
    assert!(result.is_err(), "Should have been rejected by the CLI");
}

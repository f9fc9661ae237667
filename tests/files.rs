use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;

use ascent_sim::io::csv::{read_trajectory, write_trajectory_file};
use ascent_sim::io::{load_scenario, write_summary_file, FlightSummary};
use ascent_sim::propulsion::ScheduledStaging;
use ascent_sim::sim::{simulate, simulate_with, Scenario};
use ascent_sim::telemetry::{read_telemetry_csv, SeparationSource, SignatureDetector};
use ascent_sim::ScenarioError;

fn bundled_scenario() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/kerbin_heavy.toml")
}

#[test]
fn bundled_scenario_matches_preset() {
    let loaded = load_scenario(bundled_scenario()).unwrap();
    assert_eq!(loaded, Scenario::kerbin_heavy());
}

#[test]
fn missing_scenario_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_scenario(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ScenarioError::Io(_)));
}

#[test]
fn trajectory_csv_round_trip_in_nested_dir() {
    let out = simulate(&Scenario::kerbin_heavy()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs/heavy/trajectory.csv");

    write_trajectory_file(&path, &out.trajectory).unwrap();
    let back = read_trajectory(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(back, out.trajectory);
}

#[test]
fn summary_json_round_trip() {
    let scenario = Scenario::kerbin_heavy();
    let out = simulate(&scenario).unwrap();
    let summary = FlightSummary::from_outcome(&scenario, &out);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/summary.json");
    write_summary_file(&path, &summary).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: FlightSummary = serde_json::from_str(&text).unwrap();
    assert_eq!(back.mission, summary.mission);
    assert_eq!(back.termination, summary.termination);
    assert_eq!(back.samples, summary.samples);
    assert_eq!(back.separations.len(), 1);
    assert_relative_eq!(back.final_altitude_m, summary.final_altitude_m, max_relative = 1e-12);
    assert_relative_eq!(back.max_speed_ms, summary.max_speed_ms, max_relative = 1e-12);
}

/// Write a 0.1 s telemetry trace whose thrust drops at `cutoff` (if any).
fn write_trace(path: &std::path::Path, n: usize, cutoff: Option<usize>) {
    let mut f = std::fs::File::create(path).unwrap();
    writeln!(f, "mission_time,altitude,orbital_speed,horizontal_speed,thrust,stage_index").unwrap();
    for i in 0..n {
        let thrust = match cutoff {
            Some(c) if i >= c && i < c + 3 => 250_000.0,
            Some(c) if i >= c + 3 => 1_440_000.0,
            _ => 7_500_000.0,
        };
        let stage = if cutoff.is_some_and(|c| i >= c) { 2 } else { 3 };
        writeln!(
            f,
            "{:.1},{:.1},{:.1},{:.1},{:.1},{}",
            i as f64 * 0.1,
            i as f64 * 12.0,
            175.0 + i as f64 * 8.0,
            i as f64 * 2.0,
            thrust,
            stage
        )
        .unwrap();
    }
}

#[test]
fn telemetry_signature_drives_staging() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flight.csv");
    write_trace(&path, 1_200, Some(780));

    let samples = read_telemetry_csv(&path).unwrap();
    let estimate = SignatureDetector::default().detect(&samples);
    assert_eq!(estimate.source, SeparationSource::Detected);
    assert!((estimate.time - 78.0).abs() < 1e-9);

    let mut policy = ScheduledStaging::from_estimate(&estimate);
    let out = simulate_with(&Scenario::kerbin_heavy(), &mut policy).unwrap();
    let sep = out.separations().next().unwrap();
    assert!((sep.time - 78.0).abs() <= 0.1 + 1e-9);
    assert_eq!(out.staging_policy, "ScheduledStaging");
}

#[test]
fn telemetry_without_signature_uses_marked_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.csv");
    write_trace(&path, 1_200, None);

    let samples = read_telemetry_csv(&path).unwrap();
    let estimate = SignatureDetector::default().detect(&samples);
    assert_eq!(estimate.source, SeparationSource::Fallback);
    assert_eq!(estimate.time, 76.6);

    let mut policy = ScheduledStaging::from_estimate(&estimate);
    let out = simulate_with(&Scenario::kerbin_heavy(), &mut policy).unwrap();
    assert!(out.staging_policy.contains("fallback"));

    let summary = FlightSummary::from_outcome(&Scenario::kerbin_heavy(), &out);
    assert!(summary.staging_policy.contains("fallback"));
}

#[test]
fn scenario_signature_table_sets_fallback_time() {
    let dir = tempfile::tempdir().unwrap();
    let text = std::fs::read_to_string(bundled_scenario())
        .unwrap()
        .replace("fallback_time = 76.6", "fallback_time = 60.0");
    let scenario_path = dir.path().join("early_cutoff.toml");
    std::fs::write(&scenario_path, text).unwrap();
    let scenario = load_scenario(&scenario_path).unwrap();
    assert_eq!(scenario.signature.fallback_time, 60.0);

    let trace = dir.path().join("flat.csv");
    write_trace(&trace, 1_200, None);
    let estimate = scenario.signature.detect(&read_telemetry_csv(&trace).unwrap());
    assert_eq!(estimate.source, SeparationSource::Fallback);

    let mut policy = ScheduledStaging::from_estimate(&estimate);
    let out = simulate_with(&scenario, &mut policy).unwrap();
    let sep = out.separations().next().unwrap();
    assert!((sep.time - 60.0).abs() <= 0.1 + 1e-9);
}

#[test]
fn invalid_signature_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let text = std::fs::read_to_string(bundled_scenario())
        .unwrap()
        .replace("recovery_ratio = 1.5", "recovery_ratio = -1.0");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, text).unwrap();
    assert!(matches!(load_scenario(&path), Err(ScenarioError::Invalid(_))));
}

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pv-strings-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("pv-strings-sim process should run")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

fn parse_energy(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    line.split_once(':')
        .map(|(_, right)| right.trim().trim_end_matches("Wh").trim())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| panic!("invalid energy format for line `{line}`"))
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pv-strings-sim-{}-{name}", std::process::id()))
}

#[test]
fn default_run_prints_frames_events_and_energy() {
    let stdout = stdout_of(&run_cli(&[]));

    assert_eq!(stdout.lines().filter(|l| l.starts_with("t=")).count(), 24);
    assert_eq!(stdout.matches("Sunrise at").count(), 1, "{stdout}");
    assert_eq!(stdout.matches("Sunset at").count(), 1, "{stdout}");
    assert!(stdout.contains("within the preceding 60 min"), "{stdout}");
    assert!(stdout.contains("Measured insolation:   558.0 Wh/m²"), "{stdout}");

    let nominal = parse_energy(&stdout, "Total nominal energy:");
    let irradiance = parse_energy(&stdout, "Total irradiance energy:");
    assert!(nominal > 0.0);
    assert!(irradiance > 0.0);
    assert!(irradiance < nominal);
}

#[test]
fn scenario_file_matches_default_preset() {
    let from_file = stdout_of(&run_cli(&["--scenario", "scenarios/gothenburg_june.toml"]));
    let from_preset = stdout_of(&run_cli(&["--preset", "gothenburg_june"]));
    assert_eq!(from_file, from_preset);
}

#[test]
fn polar_night_preset_states_no_crossing() {
    let stdout = stdout_of(&run_cli(&["--preset", "tromso_polar_night"]));
    assert!(stdout.contains("No sunrise or sunset"), "{stdout}");
    assert!(stdout.contains("polar night"), "{stdout}");
    assert_eq!(parse_energy(&stdout, "Total nominal energy:"), 0.0);
}

#[test]
fn date_override_changes_the_day() {
    let stdout = stdout_of(&run_cli(&[
        "--preset",
        "tromso_polar_night",
        "--date",
        "2024-06-21",
    ]));
    assert!(stdout.contains("polar day"), "{stdout}");
}

#[test]
fn radiation_csv_replaces_scenario_values() {
    let csv_path = temp_path("radiation.csv");
    fs::write(&csv_path, "hour,w_m2\n12,500\n").unwrap();

    let stdout = stdout_of(&run_cli(&["--radiation", csv_path.to_str().unwrap()]));
    let noon = stdout
        .lines()
        .find(|l| l.starts_with("t= 12"))
        .unwrap_or_else(|| panic!("missing noon frame: {stdout}"));
    assert!(noon.contains("G= 500.0"), "{noon}");
    let eleven = stdout.lines().find(|l| l.starts_with("t= 11")).unwrap();
    assert!(eleven.contains("G=   0.0"), "{eleven}");

    fs::remove_file(&csv_path).ok();
}

#[test]
fn telemetry_export_writes_one_row_per_sample() {
    let out_path = temp_path("telemetry.csv");
    let output = run_cli(&["--telemetry-out", out_path.to_str().unwrap()]);
    stdout_of(&output);

    let content = fs::read_to_string(&out_path).unwrap();
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("timestep,timestamp,azimuth_deg"));
    assert!(header.contains("south_west_irradiance_w"));
    assert!(header.contains("south_east_incidence_deg"));
    assert_eq!(lines.count(), 24);

    fs::remove_file(&out_path).ok();
}

#[test]
fn unwritable_telemetry_path_fails() {
    let out_path = temp_path("missing-dir").join("telemetry.csv");
    let output = run_cli(&["--telemetry-out", out_path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to write CSV"), "{stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = run_cli(&["--preset", "atlantis"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "{stderr}");
}

#[test]
fn scenario_and_preset_conflict() {
    let output = run_cli(&[
        "--scenario",
        "scenarios/gothenburg_june.toml",
        "--preset",
        "gothenburg_june",
    ]);
    assert!(!output.status.success());
}

#[test]
fn invalid_scenario_lists_errors() {
    let path = temp_path("bad.toml");
    fs::write(&path, "[simulation]\nsteps_per_day = 7\n").unwrap();

    let output = run_cli(&["--scenario", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.steps_per_day"), "{stderr}");

    fs::remove_file(&path).ok();
}

//! PV string simulator entry point: CLI wiring and config-driven run.

use std::path::{Path, PathBuf};
use std::process;

use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use pv_strings_sim::SimError;
use pv_strings_sim::config::ScenarioConfig;
use pv_strings_sim::io::export::export_csv;
use pv_strings_sim::panels::PanelString;
use pv_strings_sim::sim::engine::DaySimulator;
use pv_strings_sim::sim::radiation::RadiationSeries;
use pv_strings_sim::sim::types::SimulationFrame;
use pv_strings_sim::solar::SpencerPositionProvider;
use pv_strings_sim::telemetry;

/// Simulate one day of output from fixed photovoltaic panel strings.
///
/// If no --scenario or --preset is given, the gothenburg_june preset is used.
#[derive(Debug, Parser)]
#[command(name = "pv-strings-sim", version, about)]
struct Cli {
    /// Load scenario from TOML config file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    scenario: Option<PathBuf>,
    /// Use a built-in preset (gothenburg_june, tromso_polar_night, tromso_polar_day)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,
    /// Override the simulated day (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Read hourly irradiance from a `hour,w_m2` CSV instead of the scenario
    #[arg(long, value_name = "PATH")]
    radiation: Option<PathBuf>,
    /// Export per-sample results to CSV
    #[arg(long, value_name = "PATH")]
    telemetry_out: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_scenario(cli: &Cli) -> Result<ScenarioConfig, Vec<String>> {
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| vec![e.to_string()])?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| vec![e.to_string()])?
    } else {
        ScenarioConfig::gothenburg_june()
    };

    if let Some(date) = cli.date {
        scenario.simulation.date = date;
    }

    let errors = scenario.validate();
    if errors.is_empty() {
        Ok(scenario)
    } else {
        Err(errors.iter().map(ToString::to_string).collect())
    }
}

fn run(cli: &Cli, scenario: &ScenarioConfig) -> Result<(), SimError> {
    let radiation = match cli.radiation {
        Some(ref path) => RadiationSeries::from_csv_path(path)?,
        None => scenario.radiation_series()?,
    };
    let strings = scenario.panel_strings()?;
    let sim_config = scenario.sim_config()?;

    info!(
        date = %sim_config.date,
        steps = sim_config.steps_per_day,
        strings = strings.len(),
        "starting simulation"
    );

    let simulator = DaySimulator::new(
        SpencerPositionProvider,
        scenario.location.clone(),
        sim_config,
        strings,
        radiation,
    );
    let day = simulator.run()?;

    for frame in &day.frames {
        println!("{frame}");
    }

    println!("\n{}", simulator.report(&day));

    if let Some(ref path) = cli.telemetry_out {
        write_telemetry(&day.frames, simulator.strings(), path)?;
    }

    Ok(())
}

fn write_telemetry(
    frames: &[SimulationFrame],
    strings: &[PanelString],
    path: &Path,
) -> Result<(), SimError> {
    export_csv(frames, strings, path).map_err(|source| SimError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    eprintln!("Telemetry written to {}", path.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let scenario = match load_scenario(&cli) {
        Ok(cfg) => cfg,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &scenario) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

//! CSV export for simulation frames.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::panels::PanelString;
use crate::sim::types::SimulationFrame;

/// Leading columns shared by every export, before the per-string columns.
const HEADER: &str = "timestep,timestamp,azimuth_deg,zenith_deg,altitude_deg,irradiance_w_m2";

/// Column names for the whole export: the fixed leading columns followed by
/// `<name>_factor,<name>_incidence_deg,<name>_nominal_w,<name>_irradiance_w`
/// for every string.
pub fn header(strings: &[PanelString]) -> Vec<String> {
    let mut columns: Vec<String> = HEADER.split(',').map(str::to_string).collect();
    for s in strings {
        columns.push(format!("{}_factor", s.name()));
        columns.push(format!("{}_incidence_deg", s.name()));
        columns.push(format!("{}_nominal_w", s.name()));
        columns.push(format!("{}_irradiance_w", s.name()));
    }
    columns
}

/// Exports simulation frames to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(frames: &[SimulationFrame], strings: &[PanelString], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(frames, strings, buf)
}

/// Writes simulation frames as CSV to any writer.
///
/// Produces deterministic output for identical inputs. Strings missing from a
/// frame are written as empty cells.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    frames: &[SimulationFrame],
    strings: &[PanelString],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(header(strings))?;

    for f in frames {
        let mut row = vec![
            f.timestep.to_string(),
            f.timestamp.to_rfc3339(),
            format!("{:.3}", f.position.azimuth_deg()),
            format!("{:.3}", f.position.zenith_deg()),
            format!("{:.3}", f.position.altitude_deg()),
            format!("{:.1}", f.irradiance_w_m2),
        ];
        for i in 0..strings.len() {
            match f.strings.get(i) {
                Some(out) => {
                    row.push(format!("{:.4}", out.orientation_factor));
                    row.push(format!("{:.2}", out.incidence_angle_deg));
                    row.push(format!("{:.2}", out.nominal_power_w));
                    row.push(format!("{:.2}", out.irradiance_power_w));
                }
                None => row.extend(std::iter::repeat_n(String::new(), 4)),
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

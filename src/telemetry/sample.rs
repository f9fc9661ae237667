use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;

// ---------------------------------------------------------------------------
// Recorded flight telemetry (one poll of the live vehicle)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub mission_time: f64,     // s
    pub altitude: f64,         // m
    pub orbital_speed: f64,    // m/s
    pub horizontal_speed: f64, // m/s
    pub thrust: f64,           // N
    pub stage_index: u32,
}

/// Read telemetry from CSV with a header row naming the sample fields.
pub fn read_telemetry<R: Read>(reader: R) -> Result<Vec<TelemetrySample>, TelemetryError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut samples = Vec::new();
    for record in rdr.deserialize() {
        let sample: TelemetrySample = record?;
        samples.push(sample);
    }
    Ok(samples)
}

pub fn read_telemetry_csv(path: impl AsRef<Path>) -> Result<Vec<TelemetrySample>, TelemetryError> {
    let file = std::fs::File::open(path)?;
    read_telemetry(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let data = "\
mission_time,altitude,orbital_speed,horizontal_speed,thrust,stage_index
0.0, 0.0, 174.9, 0.0, 7500000.0, 3
0.1, 0.5, 175.3, 0.0, 7500000.0, 3
";
        let samples = read_telemetry(data.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].mission_time, 0.1);
        assert_eq!(samples[1].thrust, 7_500_000.0);
        assert_eq!(samples[0].stage_index, 3);
    }

    #[test]
    fn malformed_row_is_an_error() {
        let data = "mission_time,altitude,orbital_speed,horizontal_speed,thrust,stage_index\n0.0,abc,1,1,1,1\n";
        assert!(matches!(read_telemetry(data.as_bytes()), Err(TelemetryError::Csv(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            read_telemetry_csv("/nonexistent/telemetry.csv"),
            Err(TelemetryError::Io(_))
        ));
    }
}

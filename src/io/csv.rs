use std::io::{Read, Write};
use std::path::Path;

use crate::dynamics::state::TrajectorySample;
use crate::error::ExportError;

/// Write trajectory data to CSV format.
///
/// Columns: time, altitude, horizontal_velocity, vertical_velocity, speed,
///          mass, stage
pub fn write_trajectory<W: Write>(writer: W, trajectory: &[TrajectorySample]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in trajectory {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write trajectory to a CSV file, creating parent directories as needed.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &[TrajectorySample]) -> Result<(), ExportError> {
    let path = path.as_ref();
    super::create_parent_dirs(path)?;
    let file = std::fs::File::create(path)?;
    write_trajectory(file, trajectory)
}

/// Read back a trajectory written by [`write_trajectory`].
pub fn read_trajectory<R: Read>(reader: R) -> Result<Vec<TrajectorySample>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        let sample: TrajectorySample = row?;
        out.push(sample);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traj() -> Vec<TrajectorySample> {
        vec![
            TrajectorySample {
                time: 0.1,
                altitude: 0.0,
                horizontal_velocity: 0.0,
                vertical_velocity: 4.0,
                speed: 4.0,
                mass: 438_000.0,
                stage: 0,
            },
            TrajectorySample {
                time: 0.2,
                altitude: 0.8,
                horizontal_velocity: 0.0,
                vertical_velocity: 8.0,
                speed: 8.0,
                mass: 437_000.0,
                stage: 0,
            },
        ]
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj()).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "time,altitude,horizontal_velocity,vertical_velocity,speed,mass,stage"
        );
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.1,"));
    }

    #[test]
    fn rows_read_back() {
        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj()).unwrap();
        let back = read_trajectory(buf.as_slice()).unwrap();
        assert_eq!(back, traj());
    }
}

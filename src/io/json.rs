use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{ideal_velocity, max_speed_sample, VelocityLosses};
use crate::error::ExportError;
use crate::sim::{Scenario, SimOutcome, Termination};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparationSummary {
    pub time_s: f64,
    pub altitude_m: f64,
    pub speed_ms: f64,
    pub mass_before_kg: f64,
    pub mass_after_kg: f64,
}

/// Summary statistics computed from a simulated ascent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub mission: String,
    pub stages: usize,
    pub staging_policy: String,
    pub termination: Termination,
    pub samples: usize,
    pub final_time_s: f64,
    pub final_altitude_m: f64,
    pub final_speed_ms: f64,
    pub final_mass_kg: f64,
    pub max_speed_ms: f64,
    pub max_speed_time_s: f64,
    pub max_speed_altitude_m: f64,
    pub separations: Vec<SeparationSummary>,
    pub ideal_speed_ms: f64,
    pub speed_loss_ms: Option<f64>,
    pub efficiency: Option<f64>,
}

impl FlightSummary {
    /// Compute summary from a finished run.
    pub fn from_outcome(scenario: &Scenario, outcome: &SimOutcome) -> Self {
        let last = outcome.final_sample();
        let peak = max_speed_sample(&outcome.trajectory);
        let final_time = last.map_or(0.0, |s| s.time);
        let losses = VelocityLosses::at(&scenario.mission, &outcome.trajectory, final_time);

        FlightSummary {
            mission: scenario.mission.name.clone(),
            stages: scenario.mission.stages.len(),
            staging_policy: outcome.staging_policy.clone(),
            termination: outcome.termination,
            samples: outcome.trajectory.len(),
            final_time_s: final_time,
            final_altitude_m: last.map_or(0.0, |s| s.altitude),
            final_speed_ms: last.map_or(0.0, |s| s.speed),
            final_mass_kg: last.map_or(scenario.mission.initial_mass, |s| s.mass),
            max_speed_ms: peak.map_or(0.0, |s| s.speed),
            max_speed_time_s: peak.map_or(0.0, |s| s.time),
            max_speed_altitude_m: peak.map_or(0.0, |s| s.altitude),
            separations: outcome
                .separations()
                .map(|e| SeparationSummary {
                    time_s: e.time,
                    altitude_m: e.altitude,
                    speed_ms: e.speed,
                    mass_before_kg: e.mass_before,
                    mass_after_kg: e.mass_after,
                })
                .collect(),
            ideal_speed_ms: ideal_velocity(&scenario.mission, final_time),
            speed_loss_ms: losses.map(|l| l.loss),
            efficiency: losses.map(|l| l.efficiency),
        }
    }
}

/// Write flight summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: W, summary: &FlightSummary) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// Write flight summary JSON to a file, creating parent directories as needed.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &FlightSummary) -> Result<(), ExportError> {
    let path = path.as_ref();
    super::create_parent_dirs(path)?;
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)?;
    writeln!(file)?;
    Ok(())
}

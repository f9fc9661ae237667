use serde::Serialize;

use crate::dynamics::state::TrajectorySample;
use crate::sim::SimOutcome;

/// Altitude checkpoints reported by default, m.
pub const DEFAULT_ALTITUDE_CHECKPOINTS: [f64; 6] =
    [10_000.0, 20_000.0, 30_000.0, 40_000.0, 50_000.0, 60_000.0];

/// Time checkpoints reported by default, s.
pub const DEFAULT_TIME_CHECKPOINTS: [f64; 7] = [25.0, 50.0, 75.0, 100.0, 125.0, 140.0, 150.0];

// ---------------------------------------------------------------------------
// Sample lookups
// ---------------------------------------------------------------------------

fn nearest_by<F>(samples: &[TrajectorySample], key: F) -> Option<&TrajectorySample>
where
    F: Fn(&TrajectorySample) -> f64,
{
    let mut best: Option<(&TrajectorySample, f64)> = None;
    for s in samples {
        let d = key(s);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((s, d)),
        }
    }
    best.map(|(s, _)| s)
}

/// Sample whose altitude is closest to `altitude` (first one on ties).
pub fn nearest_by_altitude(samples: &[TrajectorySample], altitude: f64) -> Option<&TrajectorySample> {
    nearest_by(samples, |s| (s.altitude - altitude).abs())
}

/// Sample whose time is closest to `time` (first one on ties).
pub fn nearest_by_time(samples: &[TrajectorySample], time: f64) -> Option<&TrajectorySample> {
    nearest_by(samples, |s| (s.time - time).abs())
}

pub fn max_speed_sample(samples: &[TrajectorySample]) -> Option<&TrajectorySample> {
    nearest_by(samples, |s| -s.speed)
}

// ---------------------------------------------------------------------------
// Flight report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Checkpoint {
    pub target: f64,
    pub sample: TrajectorySample,
}

/// Reference points along a simulated trajectory: fixed altitudes and times
/// that were actually reached, the speed peak, and every separation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightReport {
    pub altitude_checkpoints: Vec<Checkpoint>,
    pub time_checkpoints: Vec<Checkpoint>,
    pub max_speed: Option<TrajectorySample>,
    pub separations: Vec<TrajectorySample>,
}

impl FlightReport {
    pub fn from_outcome(outcome: &SimOutcome, altitudes: &[f64], times: &[f64]) -> Self {
        let samples = outcome.trajectory.as_slice();
        let max_altitude = outcome.max_altitude();
        let final_time = samples.last().map_or(f64::NEG_INFINITY, |s| s.time);
        let dt = match samples {
            [a, b, ..] => b.time - a.time,
            _ => 0.0,
        };

        let altitude_checkpoints = altitudes
            .iter()
            .filter(|&&h| h <= max_altitude)
            .filter_map(|&h| {
                nearest_by_altitude(samples, h).map(|s| Checkpoint { target: h, sample: *s })
            })
            .collect();

        let time_checkpoints = times
            .iter()
            // Half a step of slack for accumulated time drift
            .filter(|&&t| t <= final_time + 0.5 * dt)
            .filter_map(|&t| nearest_by_time(samples, t).map(|s| Checkpoint { target: t, sample: *s }))
            .collect();

        let separations = outcome
            .separations()
            .filter_map(|e| e.sample_index.and_then(|i| samples.get(i)).copied())
            .collect();

        Self {
            altitude_checkpoints,
            time_checkpoints,
            max_speed: max_speed_sample(samples).copied(),
            separations,
        }
    }

    /// Report at the default altitude and time checkpoints.
    pub fn standard(outcome: &SimOutcome) -> Self {
        Self::from_outcome(outcome, &DEFAULT_ALTITUDE_CHECKPOINTS, &DEFAULT_TIME_CHECKPOINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{simulate, Scenario, Termination};

    fn sample(time: f64, altitude: f64, speed: f64) -> TrajectorySample {
        TrajectorySample {
            time,
            altitude,
            horizontal_velocity: 0.0,
            vertical_velocity: speed,
            speed,
            mass: 1.0,
            stage: 0,
        }
    }

    #[test]
    fn nearest_lookups() {
        let s = vec![sample(0.0, 0.0, 0.0), sample(1.0, 100.0, 50.0), sample(2.0, 300.0, 40.0)];
        assert_eq!(nearest_by_altitude(&s, 180.0).unwrap().time, 1.0);
        assert_eq!(nearest_by_time(&s, 1.6).unwrap().time, 2.0);
        assert_eq!(max_speed_sample(&s).unwrap().time, 1.0);
        // Tie resolves to the earlier sample
        assert_eq!(nearest_by_altitude(&s, 50.0).unwrap().time, 0.0);
    }

    #[test]
    fn empty_series_has_no_nearest() {
        assert!(nearest_by_time(&[], 1.0).is_none());
        assert!(max_speed_sample(&[]).is_none());
    }

    #[test]
    fn time_checkpoints_stop_at_final_sample() {
        let mut out = SimOutcome {
            trajectory: vec![sample(0.1, 1.0, 2.0), sample(0.2, 3.0, 4.0)],
            events: vec![],
            termination: Termination::TimeLimit,
            staging_policy: "BurnTimeStaging".to_string(),
        };
        let report = FlightReport::from_outcome(&out, &[2.0, 5.0], &[0.1, 0.24, 0.3]);
        let targets: Vec<f64> = report.time_checkpoints.iter().map(|c| c.target).collect();
        assert_eq!(targets, vec![0.1, 0.24]);
        assert_eq!(report.time_checkpoints[1].sample.time, 0.2);
        assert_eq!(report.altitude_checkpoints.len(), 1);

        // A lone sample gives no step to pad the final time with
        out.trajectory.truncate(1);
        let report = FlightReport::from_outcome(&out, &[], &[0.1, 0.12]);
        assert_eq!(report.time_checkpoints.len(), 1);
    }

    #[test]
    fn standard_report_for_heavy_ascent() {
        let out = simulate(&Scenario::kerbin_heavy()).unwrap();
        let report = FlightReport::standard(&out);

        // Final time is 150 s so every time checkpoint is reached
        assert_eq!(report.time_checkpoints.len(), DEFAULT_TIME_CHECKPOINTS.len());
        for cp in &report.time_checkpoints {
            assert!((cp.sample.time - cp.target).abs() <= 0.05 + 1e-9);
        }
        // Only altitudes below the final ~43.7 km are reported
        let max_alt = out.max_altitude();
        assert!(report.altitude_checkpoints.iter().all(|c| c.target <= max_alt));
        assert_eq!(report.altitude_checkpoints.len(), 4);

        assert_eq!(report.separations.len(), 1);
        assert_eq!(report.separations[0].stage, 1);
        assert!(report.max_speed.is_some());
    }
}

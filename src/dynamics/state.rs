use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

/// Standard gravity used for specific impulse, m/s^2.
pub const G0: f64 = 9.80665;

// ---------------------------------------------------------------------------
// Planar vehicle state (downrange is not tracked, only its velocity)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub time: f64,              // s since ignition
    pub altitude: f64,          // m above the reference surface
    pub vel: Vector2<f64>,      // m/s [horizontal, vertical]
    pub mass: f64,              // kg
    pub active_stage: usize,    // index into the mission's stage list
}

impl VehicleState {
    /// State on the pad at ignition.
    pub fn at_ignition(mass: f64) -> Self {
        Self {
            time: 0.0,
            altitude: 0.0,
            vel: Vector2::zeros(),
            mass,
            active_stage: 0,
        }
    }

    pub fn horizontal_velocity(&self) -> f64 {
        self.vel.x
    }

    pub fn vertical_velocity(&self) -> f64 {
        self.vel.y
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn sample(&self) -> TrajectorySample {
        TrajectorySample {
            time: self.time,
            altitude: self.altitude,
            horizontal_velocity: self.vel.x,
            vertical_velocity: self.vel.y,
            speed: self.speed(),
            mass: self.mass,
            stage: self.active_stage,
        }
    }
}

// ---------------------------------------------------------------------------
// Trajectory sample (one per integration step, chronological)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,
    pub altitude: f64,
    pub horizontal_velocity: f64,
    pub vertical_velocity: f64,
    pub speed: f64,
    pub mass: f64,
    pub stage: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignition_state_is_at_rest() {
        let s = VehicleState::at_ignition(439_000.0);
        assert_eq!(s.time, 0.0);
        assert_eq!(s.altitude, 0.0);
        assert_eq!(s.speed(), 0.0);
        assert_eq!(s.active_stage, 0);
    }

    #[test]
    fn sample_copies_state() {
        let s = VehicleState {
            time: 12.5,
            altitude: 3_000.0,
            vel: Vector2::new(30.0, 40.0),
            mass: 1_000.0,
            active_stage: 1,
        };
        let sample = s.sample();
        assert_eq!(sample.horizontal_velocity, 30.0);
        assert_eq!(sample.vertical_velocity, 40.0);
        assert!((sample.speed - 50.0).abs() < 1e-12);
        assert_eq!(sample.stage, 1);
    }
}

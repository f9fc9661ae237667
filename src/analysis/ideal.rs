use serde::Serialize;

use super::checkpoints::nearest_by_time;
use crate::dynamics::state::{TrajectorySample, G0};
use crate::vehicle::Mission;

// ---------------------------------------------------------------------------
// Ideal (loss-free) velocity from the rocket equation
// ---------------------------------------------------------------------------

/// Tsiolkovsky velocity at time `t` with no gravity or drag losses.
///
/// Stages burn for their burn duration in order, each contributing
/// `Isp * g0 * ln(m_start / m_end)`; jettison mass is dropped between stages.
/// After the last stage the value stays constant.
pub fn ideal_velocity(mission: &Mission, t: f64) -> f64 {
    let mut remaining = t.max(0.0);
    let mut mass = mission.initial_mass;
    let mut v = 0.0;

    for (k, stage) in mission.stages.iter().enumerate() {
        let burn = stage.burn_time();
        let elapsed = remaining.min(burn);
        let m_end = mass - stage.mass_flow() * elapsed;
        if m_end <= 0.0 {
            break;
        }
        v += stage.isp * G0 * (mass / m_end).ln();
        if remaining <= burn {
            break;
        }
        remaining -= burn;
        mass = m_end;
        if k + 1 < mission.stages.len() {
            mass -= stage.jettison_mass;
        }
    }
    v
}

/// `points` evenly spaced `(t, v_ideal)` pairs over `[0, t_end]`.
pub fn ideal_curve(mission: &Mission, t_end: f64, points: usize) -> Vec<(f64, f64)> {
    let n = points.max(2);
    (0..n)
        .map(|i| {
            let t = t_end * i as f64 / (n - 1) as f64;
            (t, ideal_velocity(mission, t))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Velocity losses (gravity + drag + steering) against the ideal curve
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VelocityLosses {
    pub time: f64,
    pub ideal: f64,
    pub actual: f64,
    pub loss: f64,
    pub loss_percent: f64,
    pub efficiency: f64, // actual / ideal
}

impl VelocityLosses {
    /// Losses at the sample nearest `t`. `None` for an empty trajectory or
    /// before any ideal velocity has accumulated.
    pub fn at(mission: &Mission, samples: &[TrajectorySample], t: f64) -> Option<Self> {
        let sample = nearest_by_time(samples, t)?;
        let ideal = ideal_velocity(mission, sample.time);
        if ideal <= 0.0 {
            return None;
        }
        let loss = ideal - sample.speed;
        Some(Self {
            time: sample.time,
            ideal,
            actual: sample.speed,
            loss,
            loss_percent: loss / ideal * 100.0,
            efficiency: 1.0 - loss / ideal,
        })
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_pitch, ConfigError};

// ---------------------------------------------------------------------------
// Guidance: commanded pitch as a function of altitude and horizontal speed
// ---------------------------------------------------------------------------

/// Open-loop ascent pitch program (degrees above local horizontal).
/// - Phase 1 (h < turn start): vertical ascent
/// - Phase 2 (turn start <= h < turn end): linear pitchover by altitude
/// - Phase 3 (h >= turn end): shallow hold, flatter once horizontal speed is high
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchProgram {
    pub turn_start_altitude: f64,   // m
    pub turn_end_altitude: f64,     // m
    #[serde(default = "default_vertical_pitch")]
    pub vertical_pitch: f64,        // deg
    #[serde(default = "default_turn_end_pitch")]
    pub turn_end_pitch: f64,        // deg, reached at the end of the band
    #[serde(default = "default_fast_pitch")]
    pub fast_pitch: f64,            // deg, final phase above the speed threshold
    #[serde(default = "default_fast_threshold")]
    pub fast_horizontal_speed: f64, // m/s, strict threshold
}

fn default_vertical_pitch() -> f64 { 90.0 }
fn default_turn_end_pitch() -> f64 { 10.0 }
fn default_fast_pitch() -> f64 { 5.0 }
fn default_fast_threshold() -> f64 { 800.0 }

impl PitchProgram {
    pub fn new(turn_start_altitude: f64, turn_end_altitude: f64) -> Self {
        Self {
            turn_start_altitude,
            turn_end_altitude,
            vertical_pitch: default_vertical_pitch(),
            turn_end_pitch: default_turn_end_pitch(),
            fast_pitch: default_fast_pitch(),
            fast_horizontal_speed: default_fast_threshold(),
        }
    }

    /// 800 m to 25 km turn band.
    pub fn kerbin_ascent() -> Self {
        Self::new(800.0, 25_000.0)
    }

    /// Commanded pitch in degrees. Band boundaries are half-open: at exactly
    /// the turn start the pitchover branch applies, at exactly the turn end
    /// the final branch applies.
    pub fn commanded_pitch(&self, altitude: f64, horizontal_velocity: f64) -> f64 {
        if altitude < self.turn_start_altitude {
            self.vertical_pitch
        } else if altitude < self.turn_end_altitude {
            let frac = (altitude - self.turn_start_altitude)
                / (self.turn_end_altitude - self.turn_start_altitude);
            self.vertical_pitch - frac * (self.vertical_pitch - self.turn_end_pitch)
        } else if horizontal_velocity > self.fast_horizontal_speed {
            self.fast_pitch
        } else {
            self.turn_end_pitch
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("guidance.turn_start_altitude", self.turn_start_altitude)?;
        if !(self.turn_end_altitude > self.turn_start_altitude) {
            return Err(ConfigError::InvalidTurnBand {
                start: self.turn_start_altitude,
                end: self.turn_end_altitude,
            });
        }
        require_pitch("guidance.vertical_pitch", self.vertical_pitch)?;
        require_pitch("guidance.turn_end_pitch", self.turn_end_pitch)?;
        require_pitch("guidance.fast_pitch", self.fast_pitch)?;
        require_non_negative("guidance.fast_horizontal_speed", self.fast_horizontal_speed)?;
        Ok(())
    }
}

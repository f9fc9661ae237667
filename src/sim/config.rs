use serde::{Deserialize, Serialize};

use crate::error::{require_positive, ConfigError};
use crate::gnc::PitchProgram;
use crate::physics::PlanetModel;
use crate::telemetry::SignatureDetector;
use crate::vehicle::{presets, Mission};

// ---------------------------------------------------------------------------
// Integrator settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub dt: f64,                        // s, fixed step
    pub max_time: f64,                  // s, run limit
    pub altitude_ceiling: f64,          // m, stop when reached
    pub propellant_floor_fraction: f64, // of initial mass, in [0, 1)
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            max_time: 150.0,
            altitude_ceiling: 70_000.0,
            propellant_floor_fraction: 0.1,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("sim.dt", self.dt)?;
        require_positive("sim.max_time", self.max_time)?;
        require_positive("sim.altitude_ceiling", self.altitude_ceiling)?;
        let f = self.propellant_floor_fraction;
        if !(0.0..1.0).contains(&f) {
            return Err(ConfigError::out_of_range(
                "sim.propellant_floor_fraction",
                f,
                "in [0, 1)",
            ));
        }
        Ok(())
    }

    /// Upper bound on the number of recorded steps.
    pub fn max_steps(&self) -> usize {
        (self.max_time / self.dt).ceil() as usize
    }
}

// ---------------------------------------------------------------------------
// Scenario: the full configuration bundle for one run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub planet: PlanetModel,
    pub mission: Mission,
    pub guidance: PitchProgram,
    pub sim: SimConfig,
    /// Booster cutoff detection for telemetry-driven staging.
    #[serde(default)]
    pub signature: SignatureDetector,
}

impl Scenario {
    pub fn new(planet: PlanetModel, mission: Mission, guidance: PitchProgram, sim: SimConfig) -> Self {
        Self {
            planet,
            mission,
            guidance,
            sim,
            signature: SignatureDetector::default(),
        }
    }

    /// Two-stage Kerbin Heavy ascent: dt 0.1 s, 70 km ceiling, 150 s, 10% floor.
    pub fn kerbin_heavy() -> Self {
        Self::new(
            PlanetModel::kerbin(),
            presets::kerbin_heavy(),
            PitchProgram::kerbin_ascent(),
            SimConfig::default(),
        )
    }

    /// All five engines from lift-off until the mass floor.
    pub fn kerbin_all_engines() -> Self {
        Self::new(
            PlanetModel::kerbin(),
            presets::kerbin_all_engines(),
            PitchProgram::kerbin_ascent(),
            SimConfig::default(),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.planet.validate()?;
        self.mission.validate()?;
        self.guidance.validate()?;
        self.sim.validate()?;
        self.signature.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(Scenario::kerbin_heavy().validate().is_ok());
        assert!(Scenario::kerbin_all_engines().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_timestep() {
        let mut s = Scenario::kerbin_heavy();
        s.sim.dt = 0.0;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::OutOfRange { field: "sim.dt", .. })
        ));
        s.sim.dt = -0.1;
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_floor_outside_unit_interval() {
        let mut s = Scenario::kerbin_heavy();
        s.sim.propellant_floor_fraction = 1.0;
        assert!(s.validate().is_err());
        s.sim.propellant_floor_fraction = -0.01;
        assert!(s.validate().is_err());
        s.sim.propellant_floor_fraction = 0.0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_turn_band() {
        let mut s = Scenario::kerbin_heavy();
        s.guidance = PitchProgram::new(25_000.0, 800.0);
        assert!(matches!(s.validate(), Err(ConfigError::InvalidTurnBand { .. })));
    }

    #[test]
    fn rejects_signature_drop_ratio_above_one() {
        let mut s = Scenario::kerbin_heavy();
        s.signature.drop_ratio = 1.5;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::OutOfRange { field: "signature.drop_ratio", .. })
        ));
    }

    #[test]
    fn max_steps_covers_run_limit() {
        assert_eq!(SimConfig::default().max_steps(), 1500);
    }
}

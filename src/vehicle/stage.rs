use serde::{Deserialize, Serialize};

use crate::dynamics::state::G0;
use crate::error::{require_non_negative, require_positive, ConfigError};

// ---------------------------------------------------------------------------
// Stage definition (one propulsion phase, ordered by burn sequence)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSpec {
    pub name: String,
    pub engine_thrust: f64,          // N, per engine
    #[serde(default = "default_engine_count")]
    pub engine_count: u32,
    pub isp: f64,                    // s
    pub propellant_mass: f64,        // kg
    #[serde(default)]
    pub burn_time: Option<f64>,      // s, overrides the propellant-derived duration
    pub jettison_mass: f64,          // kg dropped in one step at separation
}

fn default_engine_count() -> u32 {
    1
}

impl StageSpec {
    /// Total thrust of all engines in the stage.
    pub fn thrust(&self) -> f64 {
        self.engine_thrust * self.engine_count as f64
    }

    /// Propellant mass flow rate: mdot = n * F / (Isp * g0)
    pub fn mass_flow(&self) -> f64 {
        self.engine_count as f64 * (self.engine_thrust / (self.isp * G0))
    }

    /// Seconds until the carried propellant is gone: propellant / mass flow.
    pub fn propellant_burn_time(&self) -> f64 {
        let flow = self.mass_flow();
        if flow > 0.0 {
            self.propellant_mass / flow
        } else {
            0.0
        }
    }

    /// Burn duration: the explicit limit if given, never longer than the
    /// propellant lasts.
    pub fn burn_time(&self) -> f64 {
        let limit = self.propellant_burn_time();
        match self.burn_time {
            Some(t) => t.min(limit),
            None => limit,
        }
    }

    /// Combine engine groups that burn together into one stage.
    ///
    /// Thrust and mass flow add; the specific impulse is the effective value
    /// that reproduces the summed flow.
    pub fn cluster(name: impl Into<String>, groups: &[StageSpec]) -> StageSpec {
        let thrust: f64 = groups.iter().map(|g| g.thrust()).sum();
        let mass_flow: f64 = groups.iter().map(|g| g.mass_flow()).sum();
        let isp = if mass_flow > 0.0 { thrust / (mass_flow * G0) } else { 0.0 };
        StageSpec {
            name: name.into(),
            engine_thrust: thrust,
            engine_count: 1,
            isp,
            propellant_mass: groups.iter().map(|g| g.propellant_mass).sum(),
            burn_time: None,
            jettison_mass: groups.iter().map(|g| g.jettison_mass).sum(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("stage.engine_thrust", self.engine_thrust)?;
        if self.engine_count == 0 {
            return Err(ConfigError::out_of_range("stage.engine_count", 0.0, ">= 1"));
        }
        require_positive("stage.isp", self.isp)?;
        require_non_negative("stage.propellant_mass", self.propellant_mass)?;
        require_non_negative("stage.jettison_mass", self.jettison_mass)?;
        if let Some(t) = self.burn_time {
            require_positive("stage.burn_time", t)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stage builder
// ---------------------------------------------------------------------------

pub struct StageBuilder {
    name: String,
    engine_thrust: f64,
    engine_count: u32,
    isp: f64,
    propellant_mass: f64,
    burn_time: Option<f64>,
    jettison_mass: f64,
}

impl StageBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine_thrust: 1_000_000.0,
            engine_count: 1,
            isp: 250.0,
            propellant_mass: 50_000.0,
            burn_time: None,
            jettison_mass: 0.0,
        }
    }

    pub fn engine_thrust(mut self, v: f64) -> Self { self.engine_thrust = v; self }
    pub fn engine_count(mut self, v: u32) -> Self { self.engine_count = v; self }
    pub fn isp(mut self, v: f64) -> Self { self.isp = v; self }
    pub fn propellant_mass(mut self, v: f64) -> Self { self.propellant_mass = v; self }
    pub fn burn_time(mut self, v: f64) -> Self { self.burn_time = Some(v); self }
    pub fn jettison_mass(mut self, v: f64) -> Self { self.jettison_mass = v; self }

    pub fn build(self) -> StageSpec {
        StageSpec {
            name: self.name,
            engine_thrust: self.engine_thrust,
            engine_count: self.engine_count,
            isp: self.isp,
            propellant_mass: self.propellant_mass,
            burn_time: self.burn_time,
            jettison_mass: self.jettison_mass,
        }
    }
}

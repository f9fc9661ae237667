use serde::{Deserialize, Serialize};

use super::stage::{StageBuilder, StageSpec};
use crate::error::{require_non_negative, require_positive, ConfigError};

// ---------------------------------------------------------------------------
// Mission: launch vehicle with an ordered sequence of stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub name: String,
    pub initial_mass: f64,      // kg, lift-off mass including every stage
    pub cd: f64,                // drag coefficient (dimensionless)
    pub area: f64,              // aerodynamic reference area, m^2
    pub stages: Vec<StageSpec>,
}

impl Mission {
    pub fn active_stage(&self, idx: usize) -> Option<&StageSpec> {
        self.stages.get(idx)
    }

    /// Mass that leaves the vehicle over a full flight: all propellant plus
    /// every jettison except the last stage's (it never separates).
    pub fn expendable_mass(&self) -> f64 {
        let propellant: f64 = self.stages.iter().map(|s| s.propellant_mass).sum();
        let jettison: f64 = self
            .stages
            .iter()
            .rev()
            .skip(1)
            .map(|s| s.jettison_mass)
            .sum();
        propellant + jettison
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("mission.initial_mass", self.initial_mass)?;
        require_non_negative("mission.cd", self.cd)?;
        require_non_negative("mission.area", self.area)?;
        if self.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }
        for stage in &self.stages {
            stage.validate()?;
        }
        let expendable = self.expendable_mass();
        if expendable >= self.initial_mass {
            return Err(ConfigError::StageMassExceedsVehicle {
                stages: expendable,
                initial: self.initial_mass,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mission builder
// ---------------------------------------------------------------------------

pub struct MissionBuilder {
    name: String,
    initial_mass: f64,
    cd: f64,
    area: f64,
    stages: Vec<StageSpec>,
}

impl MissionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_mass: 100_000.0,
            cd: 0.3,
            area: 5.0,
            stages: vec![],
        }
    }

    pub fn initial_mass(mut self, v: f64) -> Self { self.initial_mass = v; self }
    pub fn cd(mut self, v: f64) -> Self { self.cd = v; self }
    pub fn area(mut self, v: f64) -> Self { self.area = v; self }

    pub fn stage(mut self, stage: StageSpec) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> Mission {
        Mission {
            name: self.name,
            initial_mass: self.initial_mass,
            cd: self.cd,
            area: self.area,
            stages: self.stages,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset missions
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    const LIFTOFF_MASS: f64 = 439_000.0;

    fn booster_cluster() -> StageSpec {
        StageBuilder::new("Boosters")
            .engine_thrust(1_515_000.0)
            .engine_count(4)
            .isp(205.0)
            .propellant_mass(240_000.0)
            .jettison_mass(12_000.0) // casings
            .build()
    }

    fn core_stage() -> StageSpec {
        StageBuilder::new("Core")
            .engine_thrust(1_443_000.0)
            .isp(275.0)
            .propellant_mass(118_000.0)
            .build()
    }

    /// Four boosters burning alone, then the core engine alone.
    pub fn kerbin_heavy() -> Mission {
        MissionBuilder::new("Kerbin Heavy")
            .initial_mass(LIFTOFF_MASS)
            .cd(0.25)
            .area(7.07)
            .stage(booster_cluster())
            .stage(core_stage())
            .build()
    }

    /// Same vehicle with all five engines lit from lift-off and no staging.
    ///
    /// Propellant is sized so the burn only ends at the 10% mass floor.
    pub fn kerbin_all_engines() -> Mission {
        let mut all = StageSpec::cluster("All engines", &[booster_cluster(), core_stage()]);
        all.propellant_mass = LIFTOFF_MASS * 0.9;
        all.jettison_mass = 0.0;
        MissionBuilder::new("Kerbin Heavy (all engines)")
            .initial_mass(LIFTOFF_MASS)
            .cd(0.25)
            .area(7.07)
            .stage(all)
            .build()
    }
}

use log::{info, warn};

use super::staging::{StagingContext, StagingPolicy};
use crate::dynamics::state::VehicleState;
use crate::error::PropellantExhausted;
use crate::vehicle::Mission;

// ---------------------------------------------------------------------------
// Propulsion phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropulsionPhase {
    /// Stage at this index is delivering thrust.
    Burning(usize),
    /// Final stage has burnt out; no thrust, no flow.
    Burnout,
}

/// Instantaneous stage separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub time: f64,
    pub from: usize,
    pub to: usize,
    pub mass_before: f64,
    pub mass_after: f64,
}

/// Discrete change of the propulsion state, reported by [`Propulsion::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Separated(Separation),
    Burnout { stage: usize, time: f64 },
}

// ---------------------------------------------------------------------------
// Propulsion/staging state machine
// ---------------------------------------------------------------------------

/// Owns the vehicle mass and the active stage for one run.
///
/// Stages advance strictly forward. Thrust and mass flow are pure lookups
/// against the current phase; only [`update`](Propulsion::update) and
/// [`apply_burn`](Propulsion::apply_burn) mutate.
#[derive(Debug, Clone)]
pub struct Propulsion<'m> {
    mission: &'m Mission,
    phase: PropulsionPhase,
    mass: f64,
    floor: f64,
    ignition_time: f64, // mission time at which the active stage lit
}

impl<'m> Propulsion<'m> {
    pub fn new(mission: &'m Mission, floor_fraction: f64) -> Self {
        Self {
            mission,
            phase: PropulsionPhase::Burning(0),
            mass: mission.initial_mass,
            floor: floor_fraction * mission.initial_mass,
            ignition_time: 0.0,
        }
    }

    pub fn phase(&self) -> PropulsionPhase {
        self.phase
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mass below which a burn is refused, kg.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Stage currently (or, after burnout, last) attached.
    pub fn active_stage_index(&self) -> usize {
        match self.phase {
            PropulsionPhase::Burning(idx) => idx,
            PropulsionPhase::Burnout => self.mission.stages.len().saturating_sub(1),
        }
    }

    pub fn current_thrust(&self) -> f64 {
        match self.phase {
            PropulsionPhase::Burning(idx) => {
                self.mission.active_stage(idx).map_or(0.0, |s| s.thrust())
            }
            PropulsionPhase::Burnout => 0.0,
        }
    }

    pub fn current_mass_flow_rate(&self) -> f64 {
        match self.phase {
            PropulsionPhase::Burning(idx) => {
                self.mission.active_stage(idx).map_or(0.0, |s| s.mass_flow())
            }
            PropulsionPhase::Burnout => 0.0,
        }
    }

    /// Ask the staging policy whether the active burn is over and, if so,
    /// separate to the next stage (dropping its jettison mass in one step)
    /// or enter burnout after the last stage. At most one transition per call.
    pub fn update(
        &mut self,
        policy: &mut dyn StagingPolicy,
        state: &VehicleState,
    ) -> Option<Transition> {
        let PropulsionPhase::Burning(idx) = self.phase else {
            return None;
        };
        let mission = self.mission;
        let stage = mission.active_stage(idx)?;
        let ctx = StagingContext {
            stage_index: idx,
            stage,
            stage_elapsed: state.time - self.ignition_time,
            state,
        };
        if !policy.should_end_burn(&ctx) {
            return None;
        }

        if idx + 1 < mission.stages.len() {
            let mass_before = self.mass;
            self.mass -= stage.jettison_mass;
            self.phase = PropulsionPhase::Burning(idx + 1);
            self.ignition_time = state.time;
            let sep = Separation {
                time: state.time,
                from: idx,
                to: idx + 1,
                mass_before,
                mass_after: self.mass,
            };
            info!(
                "t={:.1}s: {} separated ({}), {} ignition, mass {:.0} -> {:.0} kg",
                sep.time,
                stage.name,
                policy.name(),
                mission.stages[idx + 1].name,
                sep.mass_before,
                sep.mass_after,
            );
            Some(Transition::Separated(sep))
        } else {
            self.phase = PropulsionPhase::Burnout;
            info!(
                "t={:.1}s: {} burnout, coasting at {:.0} kg",
                state.time, stage.name, self.mass
            );
            Some(Transition::Burnout { stage: idx, time: state.time })
        }
    }

    /// Consume propellant for one step. A burn that would take the mass
    /// below the floor, or to zero, is refused and the mass is left unchanged.
    pub fn apply_burn(&mut self, dt: f64) -> Result<f64, PropellantExhausted> {
        let next = self.mass - self.current_mass_flow_rate() * dt;
        if next < self.floor || next <= 0.0 {
            warn!(
                "propellant floor reached: {:.0} kg would fall below {:.0} kg",
                next, self.floor
            );
            return Err(PropellantExhausted { mass: self.mass, floor: self.floor });
        }
        self.mass = next;
        Ok(next)
    }
}

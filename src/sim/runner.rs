use log::{debug, info, warn};

use super::config::Scenario;
use super::event::{EventKind, SimEvent, Termination};
use crate::dynamics::planar::{acceleration, euler_step};
use crate::dynamics::state::{TrajectorySample, VehicleState};
use crate::error::ConfigError;
use crate::propulsion::{BurnTimeStaging, Propulsion, StagingPolicy};

/// Altitude above which the vehicle counts as having left the pad, m.
pub const LIFTOFF_ALTITUDE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimOutcome {
    /// One sample per integration step, chronological.
    pub trajectory: Vec<TrajectorySample>,
    pub events: Vec<SimEvent>,
    pub termination: Termination,
    pub staging_policy: String,
}

impl SimOutcome {
    pub fn final_sample(&self) -> Option<&TrajectorySample> {
        self.trajectory.last()
    }

    pub fn separations(&self) -> impl Iterator<Item = &SimEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Separation { .. }))
    }

    pub fn max_altitude(&self) -> f64 {
        self.trajectory.iter().map(|s| s.altitude).fold(0.0_f64, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Full ascent simulation
// ---------------------------------------------------------------------------

/// Simulate the ascent with a custom staging policy.
///
/// Each step: staging check, guidance, forces, Euler update, propellant burn,
/// record, termination checks. A burn refused at the propellant floor ends
/// the run without recording that step.
pub fn simulate_with(
    scenario: &Scenario,
    policy: &mut dyn StagingPolicy,
) -> Result<SimOutcome, ConfigError> {
    scenario.validate()?;
    policy.reset();

    let Scenario { planet, mission, guidance, sim, .. } = scenario;
    info!(
        "{}: {} stage(s), dt={}s, ceiling {:.0} m, limit {:.0} s, staging by {}",
        mission.name,
        mission.stages.len(),
        sim.dt,
        sim.altitude_ceiling,
        sim.max_time,
        policy.name()
    );

    let mut propulsion = Propulsion::new(mission, sim.propellant_floor_fraction);
    let mut state = VehicleState::at_ignition(propulsion.mass());

    let mut trajectory = Vec::with_capacity(sim.max_steps().min(200_000));
    let mut events = vec![SimEvent {
        time: 0.0,
        kind: EventKind::Ignition,
        altitude: 0.0,
        speed: 0.0,
        mass_before: state.mass,
        mass_after: state.mass,
        sample_index: None,
    }];

    let mut lifted_off = false;

    let termination = loop {
        // Staging
        let mut pending = None;
        if let Some(transition) = propulsion.update(policy, &state) {
            pending = Some(SimEvent::from_transition(
                &transition,
                state.altitude,
                state.speed(),
                state.mass,
            ));
            state.mass = propulsion.mass();
            state.active_stage = propulsion.active_stage_index();
        }

        // Guidance + forces
        let pitch = guidance.commanded_pitch(state.altitude, state.horizontal_velocity());
        let accel = acceleration(&state, propulsion.current_thrust(), pitch, planet, mission);
        let mut next = euler_step(&state, &accel, sim.dt);

        // Propellant
        if let Err(exhausted) = propulsion.apply_burn(sim.dt) {
            events.extend(pending);
            events.push(SimEvent {
                time: state.time,
                kind: EventKind::PropellantExhausted,
                altitude: state.altitude,
                speed: state.speed(),
                mass_before: exhausted.mass,
                mass_after: exhausted.mass,
                sample_index: trajectory.len().checked_sub(1),
            });
            break Termination::PropellantExhausted;
        }
        next.mass = propulsion.mass();

        // Pad hold until thrust exceeds weight
        if !lifted_off && next.altitude < 0.0 {
            next.altitude = 0.0;
            next.vel.y = next.vel.y.max(0.0);
        }
        if !lifted_off && next.altitude > LIFTOFF_ALTITUDE {
            lifted_off = true;
            events.push(SimEvent {
                time: next.time,
                kind: EventKind::Liftoff,
                altitude: next.altitude,
                speed: next.speed(),
                mass_before: next.mass,
                mass_after: next.mass,
                sample_index: Some(trajectory.len()),
            });
        }
        // Impact sample rests on the surface: altitude and descent rate are zeroed
        let impact = lifted_off && next.altitude <= 0.0;
        if impact {
            debug!("t={:.1}s: ground impact at {:.1} m/s descent", next.time, -next.vel.y);
            next.altitude = 0.0;
            next.vel.y = 0.0;
        }

        state = next;
        trajectory.push(state.sample());
        if let Some(mut event) = pending {
            event.sample_index = Some(trajectory.len() - 1);
            events.push(event);
        }

        // Termination
        if impact {
            break Termination::GroundImpact;
        }
        if state.altitude >= sim.altitude_ceiling {
            break Termination::AltitudeCeiling;
        }
        if state.time >= sim.max_time - 0.5 * sim.dt {
            break Termination::TimeLimit;
        }
    };

    if termination == Termination::PropellantExhausted {
        warn!(
            "t={:.1}s: propellant floor of {:.0} kg reached, run stopped",
            state.time,
            propulsion.floor()
        );
    }
    info!(
        "{}: {} after {} steps, t={:.1}s, h={:.0} m, v={:.1} m/s, m={:.0} kg",
        mission.name,
        termination,
        trajectory.len(),
        state.time,
        state.altitude,
        state.speed(),
        state.mass
    );

    Ok(SimOutcome {
        trajectory,
        events,
        termination,
        staging_policy: policy.name().to_string(),
    })
}

/// Simulate with time-triggered staging (convenience wrapper).
pub fn simulate(scenario: &Scenario) -> Result<SimOutcome, ConfigError> {
    let mut policy = BurnTimeStaging;
    simulate_with(scenario, &mut policy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

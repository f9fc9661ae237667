use nalgebra::Vector2;

use crate::dynamics::state::VehicleState;
use crate::physics::{aerodynamics, PlanetModel};
use crate::vehicle::Mission;

// ---------------------------------------------------------------------------
// Equations of motion (planar point mass)
// ---------------------------------------------------------------------------

/// Net acceleration `[horizontal, vertical]` for the current state.
///
/// Forces modeled:
///   1. Thrust  - magnitude `thrust` along the commanded pitch above horizontal
///   2. Drag    - quadratic, opposing velocity, exponential atmosphere
///   3. Gravity - inverse-square, vertical axis only
pub fn acceleration(
    state: &VehicleState,
    thrust: f64,
    pitch_deg: f64,
    planet: &PlanetModel,
    mission: &Mission,
) -> Vector2<f64> {
    let theta = pitch_deg.to_radians();
    let density = planet.atmospheric_density(state.altitude);
    let g = planet.gravitational_acceleration(state.altitude);

    let f_thrust = Vector2::new(thrust * theta.cos(), thrust * theta.sin());
    let f_drag = aerodynamics::drag_force(&state.vel, density, mission.cd, mission.area);

    let a = (f_thrust + f_drag) / state.mass;
    Vector2::new(a.x, a.y - g)
}

/// One explicit Euler step of velocity, altitude and time.
///
/// Altitude advances with the already-updated vertical velocity. Mass is left
/// untouched: the propulsion model owns it.
pub fn euler_step(state: &VehicleState, accel: &Vector2<f64>, dt: f64) -> VehicleState {
    let vel = state.vel + accel * dt;
    VehicleState {
        time: state.time + dt,
        altitude: state.altitude + vel.y * dt,
        vel,
        mass: state.mass,
        active_stage: state.active_stage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::presets;
    use approx::assert_relative_eq;

    #[test]
    fn vertical_thrust_on_pad() {
        let planet = PlanetModel::kerbin();
        let mission = presets::kerbin_heavy();
        let state = VehicleState::at_ignition(mission.initial_mass);
        let thrust = mission.stages[0].thrust();

        let a = acceleration(&state, thrust, 90.0, &planet, &mission);
        assert_relative_eq!(a.y, thrust / mission.initial_mass - 9.81, epsilon = 1e-9);
        assert!(a.x.abs() < 1e-6, "Vertical thrust leaves only cos(90) residue");
    }

    #[test]
    fn gravity_only_when_coasting_at_rest() {
        let planet = PlanetModel::kerbin();
        let mission = presets::kerbin_heavy();
        let mut state = VehicleState::at_ignition(1_000.0);
        state.altitude = 10_000.0;
        let a = acceleration(&state, 0.0, 45.0, &planet, &mission);
        assert_eq!(a.x, 0.0);
        assert_relative_eq!(a.y, -planet.gravitational_acceleration(10_000.0), epsilon = 1e-12);
    }

    #[test]
    fn euler_uses_updated_vertical_velocity() {
        let state = VehicleState {
            time: 1.0,
            altitude: 100.0,
            vel: Vector2::new(0.0, 10.0),
            mass: 500.0,
            active_stage: 0,
        };
        let next = euler_step(&state, &Vector2::new(2.0, 5.0), 0.1);
        assert_relative_eq!(next.vel.x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(next.vel.y, 10.5, epsilon = 1e-12);
        assert_relative_eq!(next.altitude, 101.05, epsilon = 1e-12);
        assert_relative_eq!(next.time, 1.1, epsilon = 1e-12);
        assert_eq!(next.mass, 500.0);
    }
}

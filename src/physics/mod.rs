pub mod aerodynamics;
pub mod environment;

pub use aerodynamics::drag_force;
pub use environment::{atmospheric_density, gravitational_acceleration, PlanetModel};

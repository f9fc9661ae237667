pub mod planar;
pub mod state;

pub use planar::{acceleration, euler_step};
pub use state::{TrajectorySample, VehicleState, G0};

pub mod checkpoints;
pub mod ideal;

pub use checkpoints::{
    max_speed_sample, nearest_by_altitude, nearest_by_time, Checkpoint, FlightReport,
    DEFAULT_ALTITUDE_CHECKPOINTS, DEFAULT_TIME_CHECKPOINTS,
};
pub use ideal::{ideal_curve, ideal_velocity, VelocityLosses};

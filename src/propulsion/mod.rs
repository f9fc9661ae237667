pub mod model;
pub mod staging;

pub use model::{Propulsion, PropulsionPhase, Separation, Transition};
pub use staging::{BurnTimeStaging, ScheduledStaging, StagingContext, StagingPolicy};

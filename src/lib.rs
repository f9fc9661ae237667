pub mod analysis;
pub mod dynamics;
pub mod error;
pub mod gnc;
pub mod io;
pub mod physics;
pub mod propulsion;
pub mod sim;
pub mod telemetry;
pub mod vehicle;

pub use error::{ConfigError, PropellantExhausted, ScenarioError, SignatureError};
pub use sim::{simulate, simulate_with, Scenario, SimConfig, SimOutcome, Termination};

pub mod config;
pub mod event;
pub mod runner;

pub use config::{Scenario, SimConfig};
pub use event::{EventKind, SimEvent, Termination};
pub use runner::{simulate, simulate_with, SimOutcome};

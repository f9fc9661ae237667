pub mod mission;
pub mod stage;

pub use mission::{presets, Mission, MissionBuilder};
pub use stage::{StageBuilder, StageSpec};

pub mod guidance;

pub use guidance::PitchProgram;

use serde::{Deserialize, Serialize};

use crate::propulsion::{Separation, Transition};

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Ignition,
    Liftoff,
    Separation { from: usize, to: usize },
    Burnout { stage: usize },
    PropellantExhausted,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub altitude: f64,
    pub speed: f64,
    pub mass_before: f64,
    pub mass_after: f64,
    /// Index of the trajectory sample recorded for the step this event opened.
    pub sample_index: Option<usize>,
}

impl SimEvent {
    pub fn from_transition(transition: &Transition, altitude: f64, speed: f64, mass: f64) -> Self {
        match *transition {
            Transition::Separated(Separation { time, from, to, mass_before, mass_after }) => Self {
                time,
                kind: EventKind::Separation { from, to },
                altitude,
                speed,
                mass_before,
                mass_after,
                sample_index: None,
            },
            Transition::Burnout { stage, time } => Self {
                time,
                kind: EventKind::Burnout { stage },
                altitude,
                speed,
                mass_before: mass,
                mass_after: mass,
                sample_index: None,
            },
        }
    }

    pub fn label(&self) -> String {
        match self.kind {
            EventKind::Ignition => "Ignition".into(),
            EventKind::Liftoff => "Liftoff".into(),
            EventKind::Separation { from, to } => format!("Separation {} -> {}", from, to),
            EventKind::Burnout { stage } => format!("Burnout stage {}", stage),
            EventKind::PropellantExhausted => "Propellant exhausted".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Run termination
// ---------------------------------------------------------------------------

/// Why the integration loop stopped. None of these is a failure of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    AltitudeCeiling,
    TimeLimit,
    PropellantExhausted,
    GroundImpact,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Termination::AltitudeCeiling => "altitude ceiling reached",
            Termination::TimeLimit => "time limit reached",
            Termination::PropellantExhausted => "propellant exhausted",
            Termination::GroundImpact => "ground impact",
        };
        f.write_str(s)
    }
}

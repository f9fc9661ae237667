use thiserror::Error;

// ---------------------------------------------------------------------------
// Configuration errors (rejected before the integration loop starts)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range: must be {requirement}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("mission has no stages")]
    NoStages,

    #[error("pitch turn band is empty: turn end {end} m must be above turn start {start} m")]
    InvalidTurnBand { start: f64, end: f64 },

    #[error("stage propellant and jettison mass ({stages} kg) must be below the initial mass ({initial} kg)")]
    StageMassExceedsVehicle { stages: f64, initial: f64 },
}

impl ConfigError {
    pub(crate) fn out_of_range(field: &'static str, value: f64, requirement: &'static str) -> Self {
        ConfigError::OutOfRange { field, value, requirement }
    }
}

/// Check helpers shared by every configuration struct.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value, "finite and > 0"))
    }
}

/// Pitch angle in degrees above the local horizontal.
pub(crate) fn require_pitch(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value, "in [0, 90] degrees"))
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value, "finite and >= 0"))
    }
}

// ---------------------------------------------------------------------------
// Propulsion: the one terminal condition internal to the propulsion model
// ---------------------------------------------------------------------------

/// Burning for the requested step would drop the vehicle below its mass floor.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("propellant exhausted: burn would leave {mass:.1} kg, floor is {floor:.1} kg")]
pub struct PropellantExhausted {
    pub mass: f64,
    pub floor: f64,
}

// ---------------------------------------------------------------------------
// Telemetry staging detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignatureError {
    #[error("too few telemetry samples for staging detection: got {got}, need more than {need}")]
    TooFewSamples { got: usize, need: usize },

    #[error("no booster separation signature found in {samples} telemetry samples")]
    NotFound { samples: usize },
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to read telemetry: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse telemetry CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Scenario files and exports
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scenario: {0}")]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

use std::path::Path;

use log::debug;

use crate::error::ScenarioError;
use crate::sim::Scenario;

/// Parse a scenario from TOML text and validate it.
pub fn parse_scenario(text: &str) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = toml::from_str(text)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load and validate a TOML scenario file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scenario = parse_scenario(&text)?;
    debug!(
        "loaded scenario '{}' from {} ({} stage(s))",
        scenario.mission.name,
        path.display(),
        scenario.mission.stages.len()
    );
    Ok(scenario)
}

/// Serialize a scenario back to TOML.
pub fn scenario_to_toml(scenario: &Scenario) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(scenario)
}

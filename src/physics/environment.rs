use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, ConfigError};

// ---------------------------------------------------------------------------
// Planet model: exponential atmosphere + inverse-square gravity
// ---------------------------------------------------------------------------

/// Planetary constants feeding the environment model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetModel {
    pub name: String,
    pub radius: f64,             // m
    pub surface_gravity: f64,    // m/s^2
    pub sea_level_density: f64,  // kg/m^3
    pub scale_height: f64,       // m, density falls by 1/e over this height
}

impl PlanetModel {
    /// Kerbin: 600 km radius, 9.81 m/s^2, 1.223 kg/m^3, 5 km scale height.
    pub fn kerbin() -> Self {
        Self {
            name: "Kerbin".into(),
            radius: 600_000.0,
            surface_gravity: 9.81,
            sea_level_density: 1.223,
            scale_height: 5_000.0,
        }
    }

    /// Air density at `altitude`: rho0 * exp(-h / H).
    ///
    /// Positive for every altitude and never exactly zero; there is no
    /// atmosphere edge.
    pub fn atmospheric_density(&self, altitude: f64) -> f64 {
        self.sea_level_density * (-altitude / self.scale_height).exp()
    }

    /// Gravitational acceleration magnitude at `altitude`: g0 * (R / (R + h))^2.
    pub fn gravitational_acceleration(&self, altitude: f64) -> f64 {
        self.surface_gravity * (self.radius / (self.radius + altitude)).powi(2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("planet.radius", self.radius)?;
        require_positive("planet.surface_gravity", self.surface_gravity)?;
        require_non_negative("planet.sea_level_density", self.sea_level_density)?;
        require_positive("planet.scale_height", self.scale_height)?;
        Ok(())
    }
}

/// Free-function form of [`PlanetModel::atmospheric_density`].
pub fn atmospheric_density(planet: &PlanetModel, altitude: f64) -> f64 {
    planet.atmospheric_density(altitude)
}

/// Free-function form of [`PlanetModel::gravitational_acceleration`].
pub fn gravitational_acceleration(planet: &PlanetModel, altitude: f64) -> f64 {
    planet.gravitational_acceleration(altitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sea_level_values() {
        let k = PlanetModel::kerbin();
        assert_eq!(k.atmospheric_density(0.0), 1.223);
        assert_eq!(k.gravitational_acceleration(0.0), 9.81);
    }

    #[test]
    fn density_drops_by_e_per_scale_height() {
        let k = PlanetModel::kerbin();
        let ratio = k.atmospheric_density(5_000.0) / k.atmospheric_density(0.0);
        assert_relative_eq!(ratio, (-1.0_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn density_never_reaches_zero() {
        let k = PlanetModel::kerbin();
        let rho_70k = k.atmospheric_density(70_000.0);
        let rho_200k = k.atmospheric_density(200_000.0);
        assert!(rho_70k > 0.0);
        assert!(rho_200k > 0.0);
        assert!(rho_200k < rho_70k);
    }

    #[test]
    fn gravity_follows_inverse_square() {
        let k = PlanetModel::kerbin();
        // One planet radius up: a quarter of surface gravity
        assert_relative_eq!(k.gravitational_acceleration(600_000.0), 9.81 / 4.0, epsilon = 1e-12);
        let g10 = gravitational_acceleration(&k, 10_000.0);
        let g50 = gravitational_acceleration(&k, 50_000.0);
        assert!(g50 < g10 && g10 < 9.81);
    }

    #[test]
    fn rejects_non_positive_scale_height() {
        let mut k = PlanetModel::kerbin();
        k.scale_height = 0.0;
        assert!(matches!(
            k.validate(),
            Err(ConfigError::OutOfRange { field: "planet.scale_height", .. })
        ));
        assert!(PlanetModel::kerbin().validate().is_ok());
    }
}

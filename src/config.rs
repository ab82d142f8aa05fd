use serde::{Deserialize, Serialize};

use crate::error::{Result, ZenError};


/// Tunables for the scene. Every field has a default, so an empty JSON object
/// (or no configuration at all) yields the stock visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// id of the element the markup is mounted into
    pub container_id: String,
    /// fixed seed for reproducible scenes; random when absent
    pub seed: Option<u64>,
    pub quantum_particle_count: usize,
    pub halo_particle_count: usize,
    pub background_star_count: usize,
    pub galaxy_particle_count: usize,
    pub planet_count: usize,
    pub nebula_count: usize,
    /// side length of the procedural texture in pixels
    pub texture_size: usize,
    /// vertical field of view in degrees
    pub fov_degrees: f32,
    pub camera_eye: [f32; 3],
    pub z_near: f32,
    pub z_far: f32,
    /// load the external library manifest before building the scene
    pub load_libraries: bool,
    /// show the generic on-page banner when initialization fails
    pub show_error_overlay: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_id: "zen-root".to_string(),
            seed: None,
            quantum_particle_count: 100,
            halo_particle_count: 500,
            background_star_count: 5000,
            galaxy_particle_count: 10_000,
            planet_count: 8,
            nebula_count: 5,
            texture_size: 512,
            fov_degrees: 75.0,
            camera_eye: [0.0, 5.0, 10.0],
            z_near: 0.1,
            z_far: 2000.0,
            load_libraries: true,
            show_error_overlay: true,
        }
    }
}

impl SceneConfig {
    /// Parses a JSON configuration; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: SceneConfig = serde_json::from_str(trimmed)?;
        Ok(config)
    }

    /// Rejects values the scene cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.texture_size == 0 {
            return Err(ZenError::InvalidConfig("texture_size must be positive".to_string()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ZenError::InvalidConfig(format!("fov_degrees {} is outside (0, 180)", self.fov_degrees)));
        }
        if !(self.z_near > 0.0 && self.z_near < self.z_far) {
            return Err(ZenError::InvalidConfig(format!(
                "clip planes must satisfy 0 < z_near < z_far, got {} and {}",
                self.z_near, self.z_far
            )));
        }
        if self.camera_eye.iter().any(|c| !c.is_finite()) {
            return Err(ZenError::InvalidConfig("camera_eye must be finite".to_string()));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_default() {
        assert_eq!(SceneConfig::from_json("").unwrap(), SceneConfig::default());
        assert_eq!(SceneConfig::from_json("{}").unwrap(), SceneConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SceneConfig::from_json(r#"{ "seed": 7, "planet_count": 3 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.planet_count, 3);
        assert_eq!(config.texture_size, 512);
        assert!(config.load_libraries);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SceneConfig::from_json("{ seed: }").unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn validation_catches_degenerate_values() {
        assert!(SceneConfig::default().validate().is_ok());

        let mut config = SceneConfig::default();
        config.texture_size = 0;
        assert!(matches!(config.validate(), Err(ZenError::InvalidConfig(_))));

        let mut config = SceneConfig::default();
        config.z_near = 3000.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.fov_degrees = 0.0;
        assert!(config.validate().is_err());
    }
}

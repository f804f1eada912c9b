use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use super::focus::{MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE};

use crate::error::ConfigError;

/// Tuning for the orbit view.
///
/// One canonical parameter set. Any subset can be overridden from a JSON
/// file; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Number of concentric bands (G)
    pub orbit_groups: usize,
    /// Radius of band 0 (R0)
    pub base_radius: f32,
    /// Radius added per band (Rstep)
    pub radius_step: f32,
    /// Per-entity radius jitter modulus (J) and step (Jstep)
    pub jitter_modulus: usize,
    pub jitter_step: f32,
    /// Angular speed of band 0, rad/s (S0)
    pub base_speed: f32,
    /// Angular speed added per band, rad/s (Sstep)
    pub speed_step: f32,
    pub speed_jitter_modulus: usize,
    pub speed_jitter_step: f32,
    /// Floor so no orbit ever stalls
    pub min_speed: f32,
    /// Vertical offset between the three height rows
    pub height_step: f32,
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    /// Extra bob amplitude on odd indices
    pub bob_amplitude_odd: f32,
    /// Visual radius bounds
    pub size_min: f32,
    pub size_max: f32,
    /// Weight at which a bubble reaches `size_max`
    pub size_saturation_weight: u32,
    /// Repulsion threshold (Dmin)
    pub min_distance: f32,
    /// Repulsion gain
    pub stiffness: f32,
    /// Fraction of the remaining distance to the origin covered per frame by the focus target
    pub recenter_damping: f32,
    /// Cosmetic mesh spin per frame (radians)
    pub spin_rate: f32,
    /// Fraction of the remaining camera-target distance closed per frame
    pub approach_fraction: f32,
    /// Camera stops approaching within this distance
    pub arrival_threshold: f32,
    /// Delay between arrival and navigation, seconds
    pub navigation_delay: f32,
    /// Default camera position
    pub home_camera: [f32; 3],
    /// Vertical field of view, degrees
    pub fov_y_degrees: f32,
    /// Radius of the central anchor sphere
    pub anchor_radius: f32,
    /// Deterministic background stars
    pub star_count: usize,
    pub star_radius: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            orbit_groups: 5,
            base_radius: 4.0,
            radius_step: 1.5,
            jitter_modulus: 3,
            jitter_step: 0.3,
            base_speed: 0.30,
            speed_step: -0.04,
            speed_jitter_modulus: 4,
            speed_jitter_step: 0.01,
            min_speed: 0.02,
            height_step: 0.8,
            bob_frequency: 0.5,
            bob_amplitude: 0.3,
            bob_amplitude_odd: 0.15,
            size_min: 0.6,
            size_max: 1.6,
            size_saturation_weight: 15,
            min_distance: 2.0,
            stiffness: 0.05,
            recenter_damping: 0.05,
            spin_rate: 0.001,
            approach_fraction: 0.2,
            arrival_threshold: 3.0,
            navigation_delay: 0.5,
            home_camera: [0.0, 0.0, 15.0],
            fov_y_degrees: 60.0,
            anchor_radius: 1.2,
            star_count: 400,
            star_radius: 60.0,
        }
    }
}

impl OrbitConfig {
    /// Read a JSON override file and validate the merged result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded orbit config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: OrbitConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }
        // NaN fails every range check
        let positive = |x: f32| x > 0.0;
        let within = |x: f32, lo: f32, hi: f32| x > lo && x <= hi;

        if self.orbit_groups == 0 {
            return invalid("orbit_groups", "must be at least 1");
        }
        if self.jitter_modulus == 0 {
            return invalid("jitter_modulus", "must be at least 1");
        }
        if self.speed_jitter_modulus == 0 {
            return invalid("speed_jitter_modulus", "must be at least 1");
        }
        if !positive(self.min_speed) {
            return invalid("min_speed", "must be positive");
        }
        if !positive(self.size_min) || self.size_max < self.size_min {
            return invalid("size_max", "size bounds must satisfy 0 < size_min <= size_max");
        }
        if self.size_saturation_weight == 0 {
            return invalid("size_saturation_weight", "must be at least 1");
        }
        if !positive(self.min_distance) {
            return invalid("min_distance", "must be positive");
        }
        if !within(self.stiffness, 0.0, 0.5) {
            return invalid("stiffness", "must be in (0, 0.5]");
        }
        if !within(self.recenter_damping, 0.0, 1.0) {
            return invalid("recenter_damping", "must be in (0, 1]");
        }
        if !positive(self.approach_fraction) || self.approach_fraction >= 1.0 {
            return invalid("approach_fraction", "must be in (0, 1)");
        }
        if !positive(self.arrival_threshold) {
            return invalid("arrival_threshold", "must be positive");
        }
        if self.navigation_delay.is_nan() || self.navigation_delay < 0.0 {
            return invalid("navigation_delay", "must not be negative");
        }
        if !within(self.fov_y_degrees, 1.0, 179.0) || self.fov_y_degrees >= 179.0 {
            return invalid("fov_y_degrees", "must be in (1, 179)");
        }
        let home = Vec3::from_array(self.home_camera).length();
        if !(MIN_CAMERA_DISTANCE..=MAX_CAMERA_DISTANCE).contains(&home) {
            return invalid(
                "home_camera",
                &format!(
                    "distance from the origin must be in [{}, {}]",
                    MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE
                ),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(OrbitConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let c = OrbitConfig::from_json(r#"{ "min_distance": 2.5, "orbit_groups": 3 }"#).unwrap();
        assert_eq!(c.min_distance, 2.5);
        assert_eq!(c.orbit_groups, 3);
        assert_eq!(c.base_radius, OrbitConfig::default().base_radius);
    }

    #[test]
    fn rejects_unstable_stiffness() {
        let err = OrbitConfig::from_json(r#"{ "stiffness": 0.9 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "stiffness", .. }));
    }

    #[test]
    fn names_the_zero_modulus() {
        let err = OrbitConfig::from_json(r#"{ "speed_jitter_modulus": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "speed_jitter_modulus",
                ..
            }
        ));
    }

    #[test]
    fn home_must_sit_inside_zoom_range() {
        for home in ["[0, 0, 2.5]", "[0, 0, 0]", "[0, 70, 0]"] {
            let json = format!(r#"{{ "home_camera": {} }}"#, home);
            let err = OrbitConfig::from_json(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: "home_camera", .. }),
                "{} accepted",
                home
            );
        }
        assert!(OrbitConfig::from_json(r#"{ "home_camera": [0, 3, 20] }"#).is_ok());
    }

    #[test]
    fn nan_is_rejected() {
        let c = OrbitConfig {
            min_speed: f32::NAN,
            ..OrbitConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            OrbitConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}

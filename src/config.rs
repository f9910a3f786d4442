//! # Configuration
//!
//! Runtime tuning of the world, the player and the headless demo loop. The
//! configuration is a JSON document; every field is optional and falls back to
//! the defaults below.
//!
//! ```json
//! {
//!     "pick_radius": 5,
//!     "seed": 7,
//!     "scene": { "kind": "hills", "material": "grass", "extent": 16, "amplitude": 6 },
//!     "demo": { "frames": 120, "frame_time_ms": 16.0 }
//! }
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine_state::player::PlayerSettings;
use crate::engine_state::voxels::scene::ScenePreset;
use crate::engine_state::voxels::world::{WorldSettings, MAX_PICK_RADIUS};
use crate::engine_state::SessionSettings;
use crate::error::ConfigError;

/// Settings of the headless demo loop.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to simulate.
    pub frames: u32,
    /// Simulated time per frame.
    pub frame_time_ms: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            frames: 600,
            frame_time_ms: 16.0,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of the pick search cube around the eye.
    pub pick_radius: i32,
    /// Accumulated frame time between two liquid animation steps.
    pub liquid_animation_interval_ms: f32,
    /// Highest z the ground scan starts from.
    pub ground_scan_top: i32,
    /// World length of a drawn debug ray.
    pub debug_ray_length: f32,
    /// Seed of every random choice; a random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Starting layout.
    pub scene: ScenePreset,
    /// Feet position the player starts at.
    pub spawn: [f32; 3],
    /// Player physics.
    pub player: PlayerSettings,
    /// Headless demo loop.
    pub demo: DemoConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            pick_radius: 5,
            liquid_animation_interval_ms: 100.0,
            ground_scan_top: 10,
            debug_ray_length: 100.0,
            seed: None,
            scene: ScenePreset::default(),
            spawn: [0.0, 0.0, 5.0],
            player: PlayerSettings::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Parses and validates a configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PICK_RADIUS).contains(&self.pick_radius) {
            return Err(ConfigError::Invalid {
                field: "pick_radius",
                reason: format!(
                    "must be between 1 and {MAX_PICK_RADIUS}, got {}",
                    self.pick_radius
                ),
            });
        }
        positive("liquid_animation_interval_ms", self.liquid_animation_interval_ms)?;
        positive("debug_ray_length", self.debug_ray_length)?;
        positive("demo.frame_time_ms", self.demo.frame_time_ms)?;
        positive("player.liquid_damping", self.player.liquid_damping)?;
        if self.player.liquid_min_velocity > self.player.liquid_max_velocity {
            return Err(ConfigError::Invalid {
                field: "player.liquid_min_velocity",
                reason: format!(
                    "{} exceeds liquid_max_velocity {}",
                    self.player.liquid_min_velocity, self.player.liquid_max_velocity
                ),
            });
        }
        if self.spawn.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "spawn",
                reason: "coordinates must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Settings of the world controller.
    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            ground_scan_top: self.ground_scan_top,
            debug_ray_length: self.debug_ray_length,
        }
    }

    /// Settings of the game session.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            pick_radius: self.pick_radius,
            liquid_animation_interval_ms: self.liquid_animation_interval_ms,
            player: self.player,
        }
    }

    /// The random source for scene generation.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

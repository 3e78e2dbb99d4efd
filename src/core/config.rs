//! Game configuration loaded from an external RON file.
//!
//! Allows tweaking bundle paths, movement tuning, the shrine animation and
//! key bindings without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use thiserror::Error;

use super::states::Mode;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game.ron";

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Where the world bundle lives and which resource to pull out of it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldSource {
    /// Bundle path, resolved against the asset root
    pub bundle_path: String,
    /// Named resource inside the bundle
    pub asset_name: String,
}

impl Default for WorldSource {
    fn default() -> Self {
        Self {
            bundle_path: "bundles/world.glb".to_string(),
            asset_name: "World".to_string(),
        }
    }
}

/// Movement tuning for the player character.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed in units per second
    pub speed: f32,
    /// Apex height of a jump
    pub jump_height: f32,
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    pub spawn: (f32, f32, f32),
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 2.0,
            jump_height: 1.0,
            gravity: -9.81,
            spawn: (0.0, 1.0, 4.0),
        }
    }
}

/// Shrine sphere animation parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShrineTuning {
    /// Bob frequency, also the settle speed toward the rest height
    pub speed: f32,
    /// Bob amplitude
    pub amplitude: f32,
    /// Rest height of the sphere above the platform
    pub offset_y: f32,
    pub position: (f32, f32, f32),
}

impl Default for ShrineTuning {
    fn default() -> Self {
        Self {
            speed: 0.8,
            amplitude: 0.5,
            offset_y: 1.2,
            position: (3.0, 0.1, -2.0),
        }
    }
}

/// Keyboard bindings for the logical inputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    /// Debug shortcut, only acted on while in Game
    pub back_to_menu: KeyCode,
    pub exit_game: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            back_to_menu: KeyCode::KeyM,
            exit_game: KeyCode::Escape,
        }
    }
}

/// Game configuration loaded from assets/data/game.ron.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Mode requested once at startup
    pub initial_mode: Mode,
    pub world: WorldSource,
    pub player: PlayerTuning,
    pub shrine: ShrineTuning,
    pub input: InputBindings,
}

impl GameConfig {
    /// Parse a configuration from RON text. Missing fields take defaults.
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Read and parse the configuration file at `path`.
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents)
    }

    /// Load the game config, falling back to defaults on any error.
    pub fn load() -> Self {
        match Self::read(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded game config from {}", CONFIG_PATH);
                config
            }
            Err(e @ ConfigError::ParseError(_)) => {
                error!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

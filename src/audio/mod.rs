//! Audio module - sound effects played through Kira.

mod plugin;

pub use plugin::{AudioAssets, GameAudioPlugin};

//! Player module - player entity, movement, and camera follow.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{camera_relative, jump_velocity, read_move_input, spawn_player};
pub use plugin::PlayerPlugin;

//! Player plugin - movement, camera follow, and controller wiring.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles player movement, camera, and mode subscription.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}

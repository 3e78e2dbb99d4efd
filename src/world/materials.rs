//! Materials shared by the stage geometry.

use bevy::prelude::*;

/// Material handles for the static stage.
#[derive(Resource, Clone)]
pub struct StageMaterials {
    /// Ground - muted moss green
    pub ground: Handle<StandardMaterial>,
    /// Shrine platform before activation
    pub stone: Handle<StandardMaterial>,
    /// Shrine platform after activation
    pub gold: Handle<StandardMaterial>,
    pub pedestal: Handle<StandardMaterial>,
    /// Gingerbread brown for the character figure and the sphere
    pub gingerbread: Handle<StandardMaterial>,
}

impl StageMaterials {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            ground: materials.add(StandardMaterial {
                base_color: Color::srgb(0.30, 0.38, 0.24),
                perceptual_roughness: 0.95,
                ..default()
            }),
            stone: materials.add(StandardMaterial {
                base_color: Color::srgb(0.28, 0.27, 0.26),
                perceptual_roughness: 0.9,
                ..default()
            }),
            gold: materials.add(StandardMaterial {
                base_color: Color::srgb(0.83, 0.65, 0.22),
                perceptual_roughness: 0.3,
                metallic: 0.9,
                ..default()
            }),
            pedestal: materials.add(StandardMaterial {
                base_color: Color::srgb(0.42, 0.42, 0.44),
                perceptual_roughness: 0.6,
                ..default()
            }),
            gingerbread: materials.add(StandardMaterial {
                base_color: Color::srgb(0.55, 0.33, 0.18),
                perceptual_roughness: 0.8,
                ..default()
            }),
        }
    }
}

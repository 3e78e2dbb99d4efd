//! Gingerbread - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Space: Jump
//! - M: Back to menu
//! - Escape: Quit

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin as KiraAudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, with Bevy's own audio replaced by Kira
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Gingerbread".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(KiraAudioPlugin)

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(gingerbread::GingerbreadPlugin)

        .run();
}

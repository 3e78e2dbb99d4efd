//! Audio plugin - loads the sound effects used by the UI and the shrine.

use bevy::prelude::*;
use bevy_kira_audio::AudioSource;

/// Sound effect handles.
#[derive(Resource)]
pub struct AudioAssets {
    pub button_click: Handle<AudioSource>,
    pub shrine_chime: Handle<AudioSource>,
}

/// Audio plugin - expects `bevy_kira_audio::AudioPlugin` to be added by the app.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_audio_assets);
    }
}

fn load_audio_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(AudioAssets {
        button_click: asset_server.load("sounds/button_click.ogg"),
        shrine_chime: asset_server.load("sounds/shrine_chime.ogg"),
    });
}

//! Gingerbread - a small third-person prototype in Bevy.
//!
//! A gingerbread character walks and jumps around a stage, a main menu
//! switches to gameplay and back, a shrine platform reacts to the player, and
//! the playable world is streamed in from a bundle each time a game starts.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Modes, configuration, global events, input signals
//! - **Flow**: The menu/game state machine and the cancellable world loader
//! - **Player**: Movement, jumping, camera follow, mode subscription
//! - **World**: Stage geometry, pedestal, interactive shrine
//! - **Audio**: Sound effects
//! - **UI**: Main menu panel and back-to-menu button

pub mod audio;
pub mod core;
pub mod flow;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GingerbreadPlugin;

impl Plugin for GingerbreadPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Scene state controller and world loading
            .add_plugins(flow::FlowPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Stage and shrine
            .add_plugins(world::WorldPlugin)

            // Sound effects
            .add_plugins(audio::GameAudioPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}

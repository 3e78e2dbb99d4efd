//! Core plugin that sets up configuration, events, and input signals.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::FlowSignal;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The [`GameConfig`] resource (read once, before anything else builds)
/// - The [`FlowSignal`] event
/// - Keyboard shortcuts that raise flow signals
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::load());
        }

        app
            // Register global events
            .add_event::<FlowSignal>()

            // Signals are raised before they are applied within a tick
            .configure_sets(Update, (FlowSet::Input, FlowSet::Apply).chain())

            // Back-to-menu and exit shortcuts
            .add_systems(Update, emit_keyboard_signals.in_set(FlowSet::Input));
    }
}

/// Ordering of the per-tick flow work in `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlowSet {
    /// Systems that send [`FlowSignal`]s
    Input,
    /// Systems that apply signals and drive the world loader
    Apply,
}

/// Translate the configured shortcut keys into flow signals.
fn emit_keyboard_signals(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    config: Res<GameConfig>,
    mut signals: EventWriter<FlowSignal>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.just_pressed(config.input.back_to_menu) {
        signals.send(FlowSignal::ReturnToMenu);
    }
    if keyboard.just_pressed(config.input.exit_game) {
        signals.send(FlowSignal::Quit);
    }
}

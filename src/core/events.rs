//! Global events used for cross-system communication.
//!
//! Input sources (menu buttons, keyboard bindings) never touch the scene
//! state controller directly. They send a [`FlowSignal`] and the flow plugin
//! applies the collected signals once per tick.

use bevy::prelude::*;

/// Logical signals understood by the scene state controller.
///
/// Each signal fires at most once per tick, however many sources raised it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowSignal {
    /// Leave the menu and load the world
    StartGame,
    /// Tear down the world and go back to the menu (ignored outside Game)
    ReturnToMenu,
    /// Ask the host application to exit
    Quit,
}

impl FlowSignal {
    /// Collapse a tick's worth of signals, keeping first-seen order.
    pub fn dedup(signals: impl IntoIterator<Item = FlowSignal>) -> Vec<FlowSignal> {
        let mut unique = Vec::with_capacity(3);
        for signal in signals {
            if !unique.contains(&signal) {
                unique.push(signal);
            }
        }
        unique
    }
}

//! Game flow module - the menu/game state machine and the world loader.

mod bevy_host;
mod controller;
mod error;
mod host;
mod loader;
mod plugin;
#[cfg(test)]
pub(crate) mod testing;

pub use bevy_host::{BevyFlowHost, FlowPanel, WorldInstance};
pub use controller::{ModeCallback, SceneStateController, SubscriptionId};
pub use error::LoadError;
pub use host::{BundleStorage, FlowHost, Panel, PanelHost, QuitHost, SceneSpawner};
pub use loader::{LoadStatus, WorldLoader};
pub use plugin::{in_mode, install_controller, FlowPlugin, GameFlow};

//! World plugin - stage setup and the interactive shrine.

use bevy::prelude::*;

use super::shrine::{activate_shrines, bob_shrine_spheres};
use super::stage::{setup_stage, spin_pedestal_figure};
use crate::core::Mode;
use crate::flow::in_mode;

/// World plugin - spawns the static stage and animates the shrine.
///
/// The loaded world bundle itself is owned by the flow plugin.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_stage)
            .add_systems(Update, spin_pedestal_figure.run_if(in_mode(Mode::MainMenu)))
            .add_systems(
                Update,
                (activate_shrines, bob_shrine_spheres)
                    .chain()
                    .run_if(in_mode(Mode::Game)),
            );
    }
}

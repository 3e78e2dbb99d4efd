//! World module - the static stage and the shrine.

mod materials;
mod plugin;
mod shrine;
mod stage;

pub use materials::StageMaterials;
pub use plugin::WorldPlugin;
pub use shrine::{move_towards, Shrine, ShrineBob, ShrineSphere, ShrineTrigger};
pub use stage::PedestalFigure;

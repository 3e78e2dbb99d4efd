//! Top-level application modes.
//!
//! Only the scene state controller changes the current mode. Everything else
//! either asks it to (through a [`FlowSignal`](super::FlowSignal)) or mirrors
//! the broadcast it sends.

use serde::Deserialize;

/// The two top-level modes of the game.
///
/// - `MainMenu`: menu panel and character pedestal are shown, no world loaded
/// - `Game`: the world bundle is loaded and the player can move
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Deserialize)]
pub enum Mode {
    /// Title screen with the character pedestal
    #[default]
    MainMenu,
    /// Active gameplay with the loaded world
    Game,
}

impl Mode {
    pub fn is_game(self) -> bool {
        matches!(self, Mode::Game)
    }
}

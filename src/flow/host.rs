//! Collaborator traits the scene state controller calls into.
//!
//! The controller and the world loader only ever see these traits. The game
//! implements them on top of Bevy in [`BevyFlowHost`](super::BevyFlowHost);
//! tests implement them in memory.

use std::task::Poll;

use super::error::LoadError;

/// UI elements whose visibility follows the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Title and main menu buttons
    MainMenu,
    /// Character display shown behind the menu
    Pedestal,
    /// Button that returns to the menu during play
    BackToMenu,
}

/// Shows and hides the mode-dependent panels.
pub trait PanelHost {
    fn set_visible(&mut self, panel: Panel, visible: bool);
}

/// Loads packaged resources asynchronously.
///
/// Loads are started by the `load_*` methods and then polled once per tick.
/// Dropping a handle is not enough to release it; the loader always hands
/// partially acquired handles back through the `release_*` methods.
pub trait BundleStorage {
    /// Handle to a bundle that is loading or loaded
    type Bundle;
    /// Handle to a named resource inside a bundle
    type Asset;

    /// Begin streaming the bundle at `path`.
    fn load_bundle(&mut self, path: &str) -> Self::Bundle;

    /// Check whether the bundle has finished loading.
    fn poll_bundle(&mut self, bundle: &Self::Bundle) -> Poll<Result<(), LoadError>>;

    /// Request the resource called `name` from a loaded bundle.
    fn load_asset(&mut self, bundle: &Self::Bundle, name: &str) -> Result<Self::Asset, LoadError>;

    /// Check whether the resource has finished loading.
    fn poll_asset(&mut self, asset: &Self::Asset) -> Poll<Result<(), LoadError>>;

    fn release_bundle(&mut self, bundle: Self::Bundle);

    fn release_asset(&mut self, asset: Self::Asset);
}

/// Places loaded resources into the active scene.
pub trait SceneSpawner {
    type Resource;
    type Instance;

    /// Instantiate `resource` as an active scene object.
    fn instantiate(&mut self, resource: &Self::Resource) -> Self::Instance;

    fn destroy(&mut self, instance: Self::Instance);
}

/// Terminates the application (or stops play in a debug host).
pub trait QuitHost {
    fn request_exit(&mut self);
}

/// Everything the scene state controller needs from its host.
pub trait FlowHost:
    PanelHost + BundleStorage + SceneSpawner<Resource = <Self as BundleStorage>::Asset> + QuitHost
{
}

impl<T> FlowHost for T where
    T: PanelHost + BundleStorage + SceneSpawner<Resource = <T as BundleStorage>::Asset> + QuitHost
{
}

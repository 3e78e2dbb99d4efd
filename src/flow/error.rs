//! Error types for world bundle loading.

use thiserror::Error;

/// Errors that can occur while loading the world bundle.
///
/// These never escape the loader: they are logged and the loader moves to
/// [`LoadStatus::Failed`](super::LoadStatus::Failed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The bundle file is missing or corrupt.
    #[error("Failed to load bundle '{path}': {details}")]
    BundleUnavailable { path: String, details: String },

    /// The bundle loaded but has no resource with the requested name.
    #[error("Bundle '{path}' has no resource named '{name}'")]
    AssetMissing { path: String, name: String },

    /// The named resource exists but failed to load.
    #[error("Failed to load resource '{name}': {details}")]
    AssetUnavailable { name: String, details: String },
}

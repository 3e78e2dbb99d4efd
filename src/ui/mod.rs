//! UI module - menu panel and back-to-menu button.

mod plugin;

pub use plugin::{MenuButton, UiPlugin};

//! Core game module - modes, events, configuration and input signals.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod events;
mod plugin;
mod states;

pub use config::*;
pub use events::*;
pub use plugin::{CorePlugin, FlowSet};
pub use states::*;

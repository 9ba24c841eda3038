// Copyright (c) 2024 Mike Tsao

//! System utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::{AssetPaths, CrossbeamChannel, Settings};
}

pub use channels::CrossbeamChannel;
pub use paths::{AssetPaths, PluginInfo, ReadOnlyAssetPath, WritableAssetPath};
pub use settings::{AudioSettings, MidiSettings, Settings};

mod channels;
mod paths;
mod settings;

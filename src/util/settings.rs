// Copyright (c) 2024 Mike Tsao

//! Structs that hold the user's persistent global preferences. Intended to be
//! serialized to `settings.json` beneath the user root.

use super::{AssetPaths, WritableAssetPath};
use crate::{prelude::*, types::MidiPortDescriptor};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contains persistent audio settings.
#[derive(Debug, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct AudioSettings {
    sample_rate: SampleRate,
    #[derivative(Default(value = "2"))]
    channel_count: u16,

    #[serde(skip)]
    has_been_saved: bool,
}
impl HasSettings for AudioSettings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl AudioSettings {
    /// Returns the currently selected audio sample rate, in Hertz (samples per
    /// second). This is the rate at which the rack ticks.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_sample_rate(&mut self, sample_rate: SampleRate) {
        if sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.needs_save();
        }
    }

    /// Returns the currently selected number of audio channels.
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }
}

/// Contains persistent MIDI settings.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MidiSettings {
    selected_input: Option<MidiPortDescriptor>,

    #[serde(skip)]
    has_been_saved: bool,
}
impl HasSettings for MidiSettings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl MidiSettings {
    /// The input port that the MIDI service should open at startup.
    pub fn selected_input(&self) -> Option<&MidiPortDescriptor> {
        self.selected_input.as_ref()
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_input(&mut self, input: Option<MidiPortDescriptor>) {
        if input != self.selected_input {
            self.selected_input = input;
            self.needs_save();
        }
    }
}

/// Global preferences.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    #[allow(missing_docs)]
    pub audio_settings: AudioSettings,
    #[allow(missing_docs)]
    pub midi_settings: MidiSettings,
}
impl Settings {
    /// The name of the settings file beneath the user root.
    pub const FILENAME: &'static str = "settings.json";

    /// Where settings live for the given roots.
    pub fn path(paths: &AssetPaths) -> WritableAssetPath {
        paths.user(Self::FILENAME)
    }

    /// Reads settings from `path`. Fields missing from the file take their
    /// defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading preferences from {path:?}");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::format_err!("Couldn't read {path:?}: {}", e))?;
        let mut settings: Self = serde_json::from_str(&contents)
            .map_err(|e| anyhow::format_err!("Couldn't parse {path:?}: {}", e))?;
        settings.mark_clean();
        Ok(settings)
    }

    /// Like [Settings::load()], but falls back to defaults if the file is
    /// missing or broken, which is normal on first run.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default preferences: {e:?}");
                Self::default()
            }
        }
    }

    /// Writes settings to `path`. Only user-root paths are accepted.
    pub fn save(&mut self, path: &WritableAssetPath) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self)
            .map_err(|_| anyhow::format_err!("Unable to serialize settings JSON"))?;
        if let Some(dir) = path.as_path().parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                anyhow::format_err!("Unable to create {path} parent directories: {}", e)
            })?;
        }
        std::fs::write(path, json)
            .map_err(|e| anyhow::format_err!("Unable to write {path}: {}", e))?;

        self.mark_clean();
        Ok(())
    }
}
impl HasSettings for Settings {
    fn has_been_saved(&self) -> bool {
        self.audio_settings.has_been_saved() && self.midi_settings.has_been_saved()
    }

    fn needs_save(&mut self) {
        self.audio_settings.needs_save();
        self.midi_settings.needs_save();
    }

    fn mark_clean(&mut self) {
        self.audio_settings.mark_clean();
        self.midi_settings.mark_clean();
    }
}

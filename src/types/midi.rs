// Copyright (c) 2024 Mike Tsao

use serde::{Deserialize, Serialize};
use synonym::Synonym;

pub use midly::num::{u4, u7};

/// Newtype for MIDI channel.
#[derive(Synonym, Serialize, Deserialize)]
pub struct MidiChannel(pub u8);
impl From<u4> for MidiChannel {
    fn from(value: u4) -> Self {
        Self(value.as_int())
    }
}

/// A MIDI note number. Well-behaved notes are 0..=127, but nothing here
/// enforces it, because mappings loaded from disk are taken as-is.
#[derive(Synonym, Serialize, Deserialize)]
pub struct MidiNote(pub u8);
impl MidiNote {
    const NAMES: [&'static str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];

    /// The conventional kick-drum note, which is also where drum pads usually
    /// start.
    pub const C2: MidiNote = MidiNote(36);

    /// Returns a short human-readable name like "C2" or "A#4". Octave numbering
    /// puts middle C (60) in octave 4.
    pub fn label(&self) -> String {
        let octave = self.0 as i32 / 12 - 1;
        let semitone = self.0 as usize % 12;
        format!("{}{}", Self::NAMES[semitone], octave)
    }
}
impl From<u7> for MidiNote {
    fn from(value: u7) -> Self {
        Self(value.as_int())
    }
}

/// Provides user-friendly strings for displaying available MIDI ports.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MidiPortDescriptor {
    /// The port descriptor's index.
    pub index: usize,
    /// The port descriptor's human-readable name.
    pub name: String,
}
impl std::fmt::Display for MidiPortDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        MidiChannel, MidiNote, SampleRate, Seconds, Uid, UidFactory, Vec2, Voltage, WidgetBox,
    };
}

pub use {
    geometry::{mm_to_px, Vec2, WidgetBox, RACK_GRID_HEIGHT, RACK_GRID_WIDTH},
    midi::{u4, u7, MidiChannel, MidiNote, MidiPortDescriptor},
    numbers::{Voltage, VoltageType},
    time::{SampleRate, Seconds},
    uid::{Uid, UidFactory},
};

mod geometry;
mod midi;
mod numbers;
mod time;
mod uid;

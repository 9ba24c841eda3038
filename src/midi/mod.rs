// Copyright (c) 2024 Mike Tsao

//! Incoming MIDI: the message type that devices deliver, and the queue that
//! carries messages from a device to the module that consumes them.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{MidiInputMessage, MidiInputQueue, MidiInputSettings};
}

pub use message::MidiInputMessage;
pub use queue::{MidiInputQueue, MidiInputSettings};

mod message;
mod queue;

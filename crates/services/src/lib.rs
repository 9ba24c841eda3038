// Copyright (c) 2024 Mike Tsao

//! Wrappers around third-party crates that make them easier to use with
//! crossbeam channels.

#![deny(missing_docs)]

/// The most commonly used imports.
pub mod prelude {
    #[cfg(feature = "midi")]
    pub use super::{MidiService, MidiServiceEvent, MidiServiceInput};
}

#[cfg(feature = "midi")]
pub use midi::{MidiService, MidiServiceEvent, MidiServiceInput};

#[cfg(feature = "midi")]
mod midi;

// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Patchbay hosts modular-synthesizer modules. Each module is a panel in a
//! [Rack](rack::Rack); the rack ticks every module once per audio sample, and
//! the modules turn what they hear (MIDI, voltages) into output voltages.
//!
//! There are several ways to use Patchbay, depending on the level of control
//! you need.
//!
//! * *Easiest*: Load a [Patch](rack::Patch) with the global
//! [ModelRegistry](modules::ModelRegistry), turn it into a rack, and call
//! [Rack::tick()](rack::Rack::tick()) from your audio callback.
//! * *More control*: Build [modules] yourself and
//! [insert](rack::Rack::insert_module()) them, or drive them directly through
//! the [traits].
//! * *Maximum control, fewest batteries included*: Use bare [cores] and feed
//! them MIDI messages yourself.

/// A collection of imports that are useful to users of this crate. `use
/// patchbay::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        midi::prelude::*, modules::prelude::*, rack::prelude::*, traits::prelude::*,
        types::prelude::*, ui::prelude::*, util::prelude::*, views::prelude::*,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use version::app_version;
pub use {
    modules::ModelRegistry,
    rack::{Patch, Rack},
};

pub mod cores;
pub mod midi;
pub mod modules;
pub mod rack;
pub mod traits;
pub mod types;
pub mod ui;
pub mod util;
pub mod views;

mod version;

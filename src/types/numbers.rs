// Copyright (c) 2024 Mike Tsao

//! Numeric types used throughout the system.

use serde::{Deserialize, Serialize};

/// The primitive Rust type of a control voltage.
pub type VoltageType = f32;

/// [Voltage] is the value of a signal on a patch cable. By Eurorack convention,
/// gates and triggers sit at 0V (low) and 10V (high).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Voltage(pub VoltageType);
impl Voltage {
    /// A [Voltage] at rest.
    pub const ZERO: Voltage = Voltage(0.0);
    /// The level of a high gate or trigger.
    pub const GATE_HIGH: Voltage = Voltage(10.0);

    /// Linearly maps `value` from the range `[from_low, from_high]` onto
    /// `[to_low, to_high]`. Nothing is clamped.
    pub fn rescale(
        value: VoltageType,
        from_low: VoltageType,
        from_high: VoltageType,
        to_low: VoltageType,
        to_high: VoltageType,
    ) -> Self {
        Self(to_low + (value - from_low) / (from_high - from_low) * (to_high - to_low))
    }
}
impl From<f32> for Voltage {
    fn from(value: f32) -> Self {
        Self(value)
    }
}
impl From<Voltage> for f32 {
    fn from(value: Voltage) -> Self {
        value.0
    }
}

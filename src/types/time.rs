// Copyright (c) 2024 Mike Tsao

//! Handles digital-audio and wall-clock time.

use core::ops::SubAssign;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Represents the [seconds](https://en.wikipedia.org/wiki/Second) unit of time.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seconds(pub f64);
impl Seconds {
    /// One millisecond.
    pub const fn one_millisecond() -> Seconds {
        Seconds(0.001)
    }

    /// Whether any time remains.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}
impl SubAssign for Seconds {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Samples per second. Always a positive integer; cannot be zero.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default))]
#[serde(rename_all = "kebab-case")]
pub struct SampleRate(#[derivative(Default(value = "44100"))] pub usize);
#[allow(missing_docs)]
impl SampleRate {
    pub const DEFAULT_SAMPLE_RATE: usize = 44100;
    pub const DEFAULT: SampleRate = SampleRate::new(Self::DEFAULT_SAMPLE_RATE);

    pub const fn new(value: usize) -> Self {
        if value != 0 {
            Self(value)
        } else {
            Self(Self::DEFAULT_SAMPLE_RATE)
        }
    }

    /// The duration of a single sample at this rate. This is what the host
    /// hands each module on every tick.
    pub fn sample_time(&self) -> Seconds {
        Seconds(1.0 / self.0 as f64)
    }
}

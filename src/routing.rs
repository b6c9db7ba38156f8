//! Configuration-to-routing table
//!
//! Every wiring topology maps to a fixed set of live analog terminals,
//! components per terminal and strip indices.

use core::ops::Range;

use crate::model::OutputConfig;
use crate::{ANALOG_N, STRIP_N};

/// Live outputs implied by a wiring topology
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routing {
    /// Analog terminals `0..terminals` take part
    pub terminals: usize,
    /// Components bound per live terminal
    pub components: usize,
    /// First live strip index
    pub strip_start: usize,
    /// One past the last live strip index
    pub strip_end: usize,
}

impl Routing {
    /// Nothing is live
    pub const INACTIVE: Self = Self {
        terminals: 0,
        components: 0,
        strip_start: 0,
        strip_end: 0,
    };

    pub const fn of(config: Option<OutputConfig>) -> Self {
        let Some(config) = config else {
            return Self::INACTIVE;
        };
        match config {
            OutputConfig::DualStrip => Self::new(0, 0, 0..STRIP_N),
            OutputConfig::RgbPlusDualStrip => Self::new(1, 3, 0..STRIP_N),
            OutputConfig::RgbPlusStrip => Self::new(1, 3, 1..STRIP_N),
            OutputConfig::RgbwPlusStrip => Self::new(1, 4, 1..STRIP_N),
            OutputConfig::RgbRgb => Self::new(ANALOG_N, 3, 0..0),
            OutputConfig::Rgbwww => Self::new(1, 5, 0..0),
        }
    }

    const fn new(terminals: usize, components: usize, strips: Range<usize>) -> Self {
        Self {
            terminals,
            components,
            strip_start: strips.start,
            strip_end: strips.end,
        }
    }

    pub const fn strips(&self) -> Range<usize> {
        self.strip_start..self.strip_end
    }

    pub const fn has_strip(&self, index: usize) -> bool {
        index >= self.strip_start && index < self.strip_end
    }

    pub const fn has_analog(&self) -> bool {
        self.terminals > 0 && self.components > 0
    }
}

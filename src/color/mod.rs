mod cie;

pub use cie::{CieTable, cie_duty};
use smart_leds::RGB8;

use crate::COMPONENT_N;

pub type Rgb = RGB8;

/// One of the five analog color components
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Component {
    R = 0,
    G = 1,
    B = 2,
    W = 3,
    Ww = 4,
}

impl Component {
    pub const ALL: [Self; COMPONENT_N] = [Self::R, Self::G, Self::B, Self::W, Self::Ww];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Five-component color state of an analog terminal
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgbww {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
    pub ww: u8,
}

impl Rgbww {
    pub const fn new(r: u8, g: u8, b: u8, w: u8, ww: u8) -> Self {
        Self { r, g, b, w, ww }
    }

    pub const fn get(&self, component: Component) -> u8 {
        match component {
            Component::R => self.r,
            Component::G => self.g,
            Component::B => self.b,
            Component::W => self.w,
            Component::Ww => self.ww,
        }
    }

    pub const fn set(&mut self, component: Component, value: u8) {
        match component {
            Component::R => self.r = value,
            Component::G => self.g = value,
            Component::B => self.b = value,
            Component::W => self.w = value,
            Component::Ww => self.ww = value,
        }
    }

    pub const fn to_array(self) -> [u8; COMPONENT_N] {
        [self.r, self.g, self.b, self.w, self.ww]
    }
}

/// Flat color shown on a strip when no live data is displayed
///
/// `white` is only used by four-component strips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolidColor {
    pub rgb: Rgb,
    pub white: u8,
}

impl SolidColor {
    pub const fn new(r: u8, g: u8, b: u8, white: u8) -> Self {
        Self {
            rgb: Rgb { r, g, b },
            white,
        }
    }

    /// Bytes of one pixel in RGBW8 layout
    pub const fn rgbw_bytes(self) -> [u8; 4] {
        [self.rgb.r, self.rgb.g, self.rgb.b, self.white]
    }
}

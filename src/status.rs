//! PoE power-class status indicator
//!
//! The PoE powered-device controller reports the negotiated class on three
//! pins plus a power-good line. The status LED shows the class as a color.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;

/// Raw pin levels read from the PoE controller
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerPins {
    pub bt: bool,
    pub tpl: bool,
    pub tph: bool,
    pub power_good: bool,
}

/// Power class negotiated with the switch
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerClass {
    PowerBad,
    Type1To2Class0To3,
    Type2Class4,
    Type3To4Class0To3,
    Type3To4Class4,
    Type3To4Class5To6,
    Type4Class7To8,
    Invalid,
}

impl PowerClass {
    pub const fn from_pins(pins: PowerPins) -> Self {
        if !pins.power_good {
            return Self::PowerBad;
        }
        let bits = ((pins.tph as u8) << 2) | ((pins.tpl as u8) << 1) | ((!pins.bt) as u8);
        match bits {
            0b110 => Self::Type1To2Class0To3,
            0b010 => Self::Type2Class4,
            0b111 => Self::Type3To4Class0To3,
            0b101 => Self::Type3To4Class4,
            0b011 => Self::Type3To4Class5To6,
            0b001 => Self::Type4Class7To8,
            _ => Self::Invalid,
        }
    }

    /// Indicator color for this class
    pub const fn color(self) -> Rgb {
        let (r, g, b) = match self {
            Self::Type1To2Class0To3 | Self::Type3To4Class0To3 => (0x0f, 0x07, 0x00),
            Self::Type2Class4 | Self::Type3To4Class4 => (0x0f, 0x0f, 0x00),
            Self::Type3To4Class5To6 => (0x07, 0x0f, 0x00),
            Self::Type4Class7To8 => (0x00, 0x0f, 0x00),
            Self::PowerBad | Self::Invalid => (0x00, 0x00, 0x0f),
        };
        Rgb { r, g, b }
    }

    /// Upper power budget in watts, if the class grants one
    pub const fn budget_watts(self) -> Option<u8> {
        match self {
            Self::Type1To2Class0To3 | Self::Type3To4Class0To3 => Some(12),
            Self::Type2Class4 | Self::Type3To4Class4 => Some(25),
            Self::Type3To4Class5To6 => Some(50),
            Self::Type4Class7To8 => Some(70),
            Self::PowerBad | Self::Invalid => None,
        }
    }
}

/// Single bit-banged status LED
///
/// Implementations must not be interrupted while shifting bits out;
/// [`StatusLed`] calls `write` inside a critical section.
pub trait Indicator {
    fn write(&mut self, color: Rgb);
}

/// Shows the power class on an [`Indicator`]
pub struct StatusLed<I: Indicator> {
    indicator: I,
    class: Option<PowerClass>,
    scheduled: bool,
}

impl<I: Indicator> StatusLed<I> {
    pub const fn new(indicator: I) -> Self {
        Self {
            indicator,
            class: None,
            scheduled: false,
        }
    }

    /// Request a refresh on the next [`StatusLed::update`]
    pub fn schedule(&mut self) {
        self.scheduled = true;
    }

    /// Re-read the power class and repaint the LED when it changed
    pub fn update(&mut self, pins: PowerPins) {
        if !core::mem::take(&mut self.scheduled) {
            return;
        }
        let class = PowerClass::from_pins(pins);
        if self.class == Some(class) {
            return;
        }
        self.class = Some(class);
        #[cfg(feature = "esp32-log")]
        println!("[StatusLed.update] power class {:?}", class);
        self.show(class.color());
    }

    /// Write a color with interrupts masked
    pub fn show(&mut self, color: Rgb) {
        critical_section::with(|_| self.indicator.write(color));
    }

    pub const fn class(&self) -> Option<PowerClass> {
        self.class
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

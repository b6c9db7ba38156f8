//! Analog PWM driver terminals
//!
//! Each terminal holds five perceptual 8-bit components. They are kept
//! untouched until `sync`, which maps them through the CIE lightness
//! table and writes the resulting duties to the timer.

use crate::color::{CieTable, Rgbww};
use crate::{ANALOG_N, COMPONENT_N};

/// Number of driver terminals
pub const TERMINAL_N: usize = ANALOG_N;

/// Default PWM period in timer ticks
pub const DEFAULT_MAX_DUTY: u16 = 0xFFFF;

/// PWM timer capability
pub trait PwmOutput {
    /// Write the duties of all five components of `terminal`
    fn set_duty(&mut self, terminal: usize, duty: [u16; COMPONENT_N]);
}

impl<P: PwmOutput + ?Sized> PwmOutput for &mut P {
    fn set_duty(&mut self, terminal: usize, duty: [u16; COMPONENT_N]) {
        (**self).set_duty(terminal, duty);
    }
}

/// Analog driver with `TERMINAL_N` terminals
pub struct Driver<P: PwmOutput> {
    pwm: P,
    colors: [Rgbww; TERMINAL_N],
    table: CieTable,
}

impl<P: PwmOutput> Driver<P> {
    pub fn new(pwm: P) -> Self {
        Self::with_max_duty(pwm, DEFAULT_MAX_DUTY)
    }

    pub fn with_max_duty(pwm: P, max_duty: u16) -> Self {
        Self {
            pwm,
            colors: [Rgbww::default(); TERMINAL_N],
            table: CieTable::new(max_duty),
        }
    }

    /// Current (uncorrected) color of a terminal
    pub fn color(&self, terminal: usize) -> Option<Rgbww> {
        self.colors.get(terminal).copied()
    }

    pub fn set_color(&mut self, terminal: usize, color: Rgbww) {
        if let Some(slot) = self.colors.get_mut(terminal) {
            *slot = color;
        }
    }

    /// Push a terminal's corrected color to the timer
    pub fn sync(&mut self, terminal: usize) {
        let Some(color) = self.color(terminal) else {
            return;
        };
        let duty = self.corrected(color);
        self.pwm.set_duty(terminal, duty);
    }

    /// PWM duties for `color` after lightness correction
    pub fn corrected(&self, color: Rgbww) -> [u16; COMPONENT_N] {
        color.to_array().map(|value| self.table.duty(value))
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn pwm_mut(&mut self) -> &mut P {
        &mut self.pwm
    }
}

//! CIE 1931 lightness correction
//!
//! Analog terminals receive perceptual 8-bit values from the network.
//! PWM duty is linear in luminance, so each value is mapped through the
//! CIE lightness curve before it reaches the timer.

/// Convert an 8-bit perceptual value into a PWM duty in `0..=max_duty`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
pub fn cie_duty(value: u8, max_duty: u16) -> u16 {
    let lightness = f32::from(value) * 100.0 / 255.0;
    let luminance = if lightness <= 8.0 {
        lightness / 902.3
    } else {
        libm::powf((lightness + 16.0) / 116.0, 3.0)
    };
    let duty = libm::roundf(luminance * f32::from(max_duty));
    duty.clamp(0.0, f32::from(max_duty)) as u16
}

/// Precomputed lightness table for one PWM period
#[derive(Debug, Clone)]
pub struct CieTable {
    duties: [u16; 256],
}

impl CieTable {
    pub fn new(max_duty: u16) -> Self {
        let mut duties = [0; 256];
        for (value, duty) in (0..=u8::MAX).zip(duties.iter_mut()) {
            *duty = cie_duty(value, max_duty);
        }
        Self { duties }
    }

    #[inline]
    pub fn duty(&self, value: u8) -> u16 {
        self.duties[usize::from(value)]
    }

    pub fn max_duty(&self) -> u16 {
        self.duties[255]
    }
}

//! Wire pixel encodings and LED chip types

use crate::CHANNEL_N;

const INPUT_RGB8: u8 = 0;
const INPUT_RGBW8: u8 = 1;
const INPUT_RGB16_MSB: u8 = 2;
const INPUT_RGB16_LSB: u8 = 3;
const INPUT_RGBW16_MSB: u8 = 4;
const INPUT_RGBW16_LSB: u8 = 5;

const OUTPUT_WS2812: u8 = 0;
const OUTPUT_SK6812_RGBW: u8 = 1;
const OUTPUT_WS2801: u8 = 2;
const OUTPUT_APA102: u8 = 3;

/// Layout of pixels inside a universe payload
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InputType {
    #[default]
    Rgb8 = INPUT_RGB8,
    Rgbw8 = INPUT_RGBW8,
    /// 16-bit components, high byte first
    Rgb16Msb = INPUT_RGB16_MSB,
    /// 16-bit components, low byte first
    Rgb16Lsb = INPUT_RGB16_LSB,
    Rgbw16Msb = INPUT_RGBW16_MSB,
    Rgbw16Lsb = INPUT_RGBW16_LSB,
}

impl InputType {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            INPUT_RGB8 => Self::Rgb8,
            INPUT_RGBW8 => Self::Rgbw8,
            INPUT_RGB16_MSB => Self::Rgb16Msb,
            INPUT_RGB16_LSB => Self::Rgb16Lsb,
            INPUT_RGBW16_MSB => Self::Rgbw16Msb,
            INPUT_RGBW16_LSB => Self::Rgbw16Lsb,
            _ => return None,
        })
    }

    /// Color components per pixel (3 or 4)
    pub const fn components(self) -> usize {
        match self {
            Self::Rgb8 | Self::Rgb16Msb | Self::Rgb16Lsb => 3,
            Self::Rgbw8 | Self::Rgbw16Msb | Self::Rgbw16Lsb => 4,
        }
    }

    /// Bytes per component on the wire
    pub const fn component_width(self) -> usize {
        match self {
            Self::Rgb8 | Self::Rgbw8 => 1,
            _ => 2,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        self.components() * self.component_width()
    }

    /// Whole pixels carried by one universe
    pub const fn pixels_per_universe(self) -> usize {
        CHANNEL_N / self.bytes_per_pixel()
    }

    /// Offset of the significant byte within one wire component
    pub(crate) const fn significant_byte(self) -> usize {
        match self {
            Self::Rgb16Lsb | Self::Rgbw16Lsb => 1,
            _ => 0,
        }
    }
}

/// LED chip family attached to a strip bus
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum OutputType {
    /// Self-clocked, GRB order
    #[default]
    Ws2812 = OUTPUT_WS2812,
    /// Self-clocked, GRBW order
    Sk6812Rgbw = OUTPUT_SK6812_RGBW,
    /// Clocked, RGB order
    Ws2801 = OUTPUT_WS2801,
    /// Clocked, framed BGR with a global brightness header
    Apa102 = OUTPUT_APA102,
}

impl OutputType {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            OUTPUT_WS2812 => Self::Ws2812,
            OUTPUT_SK6812_RGBW => Self::Sk6812Rgbw,
            OUTPUT_WS2801 => Self::Ws2801,
            OUTPUT_APA102 => Self::Apa102,
            _ => return None,
        })
    }

    /// Native components per pixel held in the strip buffer
    pub const fn components(self) -> usize {
        match self {
            Self::Sk6812Rgbw => 4,
            Self::Ws2812 | Self::Ws2801 | Self::Apa102 => 3,
        }
    }

    pub const fn needs_clock(self) -> bool {
        matches!(self, Self::Ws2801 | Self::Apa102)
    }

    /// Encoded frame size for `pixels` pixels
    pub const fn frame_len(self, pixels: usize) -> usize {
        match self {
            Self::Apa102 => APA102_START_LEN + pixels * 4 + apa102_end_len(pixels),
            _ => pixels * self.components(),
        }
    }
}

pub(crate) const APA102_START_LEN: usize = 4;

/// One clock edge per pixel is needed to push the last pixel through
pub(crate) const fn apa102_end_len(pixels: usize) -> usize {
    let len = pixels.div_ceil(16);
    if len < 4 { 4 } else { len }
}

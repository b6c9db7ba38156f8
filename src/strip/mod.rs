//! Addressable LED strip output
//!
//! A strip owns its pixel buffer and the bus it is wired to. Universe
//! payloads are decoded from their wire encoding into the chip's native
//! component layout; `transfer` encodes the buffer into the chip's wire
//! order and hands it to the bus.

mod format;

pub use format::{InputType, OutputType};

use format::{APA102_START_LEN, apa102_end_len};

use crate::model::StripConfig;
use crate::transport::Transport;
use crate::{STRIP_BYTES_MAX, UNIVERSE_N};

/// Largest encoded frame any chip type can produce
pub const FRAME_BYTES_MAX: usize = OutputType::Apa102.frame_len(STRIP_BYTES_MAX / 3);

/// Full global brightness in the APA102 pixel header
const APA102_HEADER: u8 = 0xE0 | 0x1F;

/// One LED strip bus
pub struct Strip<T: Transport> {
    transport: T,
    output_type: OutputType,
    pixel_count: usize,
    received: bool,
    /// Native components, `output_type.components()` bytes per pixel
    pixels: [u8; STRIP_BYTES_MAX],
    frame: [u8; FRAME_BYTES_MAX],
}

impl<T: Transport> Strip<T> {
    pub fn new(transport: T, config: &StripConfig) -> Self {
        let mut strip = Self {
            transport,
            output_type: config.output_type,
            pixel_count: 0,
            received: false,
            pixels: [0; STRIP_BYTES_MAX],
            frame: [0; FRAME_BYTES_MAX],
        };
        strip.configure(config);
        strip
    }

    /// Apply chip type and length, clamping the length to the buffer
    pub fn configure(&mut self, config: &StripConfig) {
        self.output_type = config.output_type;
        self.pixel_count = usize::from(config.pixel_count).min(self.max_pixels());
    }

    pub const fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Pixels that fit the buffer for the current chip type
    pub const fn max_pixels(&self) -> usize {
        STRIP_BYTES_MAX / self.output_type.components()
    }

    /// Native bytes per pixel (3 or 4)
    pub const fn bytes_per_pixel(&self) -> usize {
        self.output_type.components()
    }

    pub const fn needs_clock(&self) -> bool {
        self.output_type.needs_clock()
    }

    /// Does universe `slot` cover any pixel of this strip for `input`?
    pub const fn is_universe_active(&self, slot: usize, input: InputType) -> bool {
        slot < UNIVERSE_N && slot * input.pixels_per_universe() < self.pixel_count
    }

    /// Decode one universe payload into the pixels covered by `slot`
    pub fn set_universe_data(&mut self, slot: usize, data: &[u8], input: InputType) {
        if !self.is_universe_active(slot, input) {
            return;
        }
        let per_universe = input.pixels_per_universe();
        self.write_pixels(slot * per_universe, data, input, per_universe);
    }

    /// Decode a payload starting at the first pixel
    pub fn set_data(&mut self, data: &[u8], input: InputType) {
        self.write_pixels(0, data, input, self.pixel_count);
    }

    fn write_pixels(&mut self, first: usize, data: &[u8], input: InputType, limit: usize) {
        let components = self.output_type.components();
        let width = input.component_width();
        let significant = input.significant_byte();
        let end = self.pixel_count.min(first + limit);

        for (pixel, src) in (first..end).zip(data.chunks_exact(input.bytes_per_pixel())) {
            let mut value = [0u8; 4];
            for (index, component) in value.iter_mut().take(input.components()).enumerate() {
                *component = src[index * width + significant];
            }
            let Some(dst) = self
                .pixels
                .get_mut(pixel * components..(pixel + 1) * components)
            else {
                break;
            };
            if input.components() > components {
                // Fold white into the color channels of RGB chips
                for (channel, color) in dst.iter_mut().zip(value) {
                    *channel = color.saturating_add(value[3]);
                }
            } else {
                dst.copy_from_slice(&value[..components]);
            }
        }
    }

    /// Native pixel bytes of the configured length
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.pixel_count * self.output_type.components()]
    }

    /// Encode and send the buffer unless the bus is still busy
    ///
    /// Returns whether a transfer was started.
    pub fn transfer(&mut self) -> bool {
        if self.transport.busy() {
            return false;
        }
        let len = self.encode();
        self.transport
            .transfer(&self.frame[..len], self.output_type.needs_clock());
        true
    }

    fn encode(&mut self) -> usize {
        let components = self.output_type.components();
        let pixels = self.pixels.chunks_exact(components).take(self.pixel_count);

        match self.output_type {
            OutputType::Ws2812 => {
                for (dst, px) in self.frame.chunks_exact_mut(3).zip(pixels) {
                    dst.copy_from_slice(&[px[1], px[0], px[2]]);
                }
            }
            OutputType::Sk6812Rgbw => {
                for (dst, px) in self.frame.chunks_exact_mut(4).zip(pixels) {
                    dst.copy_from_slice(&[px[1], px[0], px[2], px[3]]);
                }
            }
            OutputType::Ws2801 => {
                for (dst, px) in self.frame.chunks_exact_mut(3).zip(pixels) {
                    dst.copy_from_slice(px);
                }
            }
            OutputType::Apa102 => {
                self.frame[..APA102_START_LEN].fill(0x00);
                let body = &mut self.frame[APA102_START_LEN..];
                for (dst, px) in body.chunks_exact_mut(4).zip(pixels) {
                    dst.copy_from_slice(&[APA102_HEADER, px[2], px[1], px[0]]);
                }
                let end_start = APA102_START_LEN + self.pixel_count * 4;
                let end_len = apa102_end_len(self.pixel_count);
                self.frame[end_start..end_start + end_len].fill(0xFF);
            }
        }

        self.output_type.frame_len(self.pixel_count)
    }

    /// Mark that universe data landed on this strip since the last check
    pub fn mark_received(&mut self) {
        self.received = true;
    }

    /// Return and clear the received flag
    pub fn take_received(&mut self) -> bool {
        core::mem::take(&mut self.received)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

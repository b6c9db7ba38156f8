//! Output configuration model
//!
//! Plain data describing how the device is wired and which universe/channel
//! feeds every output. The router consumes a validated snapshot of it.

use embassy_time::Duration;

use crate::color::{Component, SolidColor};
use crate::strip::{InputType, OutputType};
use crate::{ANALOG_N, CHANNEL_N, COMPONENT_N, STRIP_N, UNIVERSE_N};

const OUTPUT_CONFIG_DUAL_STRIP: u8 = 0;
const OUTPUT_CONFIG_RGB_DUAL_STRIP: u8 = 1;
const OUTPUT_CONFIG_RGB_STRIP: u8 = 2;
const OUTPUT_CONFIG_RGBW_STRIP: u8 = 3;
const OUTPUT_CONFIG_RGB_RGB: u8 = 4;
const OUTPUT_CONFIG_RGBWWW: u8 = 5;

const MODE_MAIN_LOOP: u8 = 0;
const MODE_INTERRUPT: u8 = 1;

const DEFAULT_PIXEL_COUNT: u16 = 64;

/// Hardware wiring topology
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputConfig {
    /// Two LED strips
    DualStrip = OUTPUT_CONFIG_DUAL_STRIP,
    /// One RGB analog terminal and two LED strips
    RgbPlusDualStrip = OUTPUT_CONFIG_RGB_DUAL_STRIP,
    /// One RGB analog terminal and the second LED strip
    RgbPlusStrip = OUTPUT_CONFIG_RGB_STRIP,
    /// One RGBW analog terminal and the second LED strip
    RgbwPlusStrip = OUTPUT_CONFIG_RGBW_STRIP,
    /// All analog terminals driven as RGB
    RgbRgb = OUTPUT_CONFIG_RGB_RGB,
    /// One analog terminal with all five components
    Rgbwww = OUTPUT_CONFIG_RGBWWW,
}

impl OutputConfig {
    pub const ALL: [Self; 6] = [
        Self::DualStrip,
        Self::RgbPlusDualStrip,
        Self::RgbPlusStrip,
        Self::RgbwPlusStrip,
        Self::RgbRgb,
        Self::Rgbwww,
    ];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            OUTPUT_CONFIG_DUAL_STRIP => Self::DualStrip,
            OUTPUT_CONFIG_RGB_DUAL_STRIP => Self::RgbPlusDualStrip,
            OUTPUT_CONFIG_RGB_STRIP => Self::RgbPlusStrip,
            OUTPUT_CONFIG_RGBW_STRIP => Self::RgbwPlusStrip,
            OUTPUT_CONFIG_RGB_RGB => Self::RgbRgb,
            OUTPUT_CONFIG_RGBWWW => Self::Rgbwww,
            _ => return None,
        })
    }
}

/// Who pumps strip transfers
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum OutputMode {
    /// Transfers are started from the main loop
    #[default]
    MainLoop = MODE_MAIN_LOOP,
    /// Transfers are restarted from the transport-completion interrupt
    Interrupt = MODE_INTERRUPT,
}

impl OutputMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            MODE_MAIN_LOOP => Some(Self::MainLoop),
            MODE_INTERRUPT => Some(Self::Interrupt),
            _ => None,
        }
    }
}

/// Network protocol a payload arrived on
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    ArtNet,
    /// Streaming ACN (E1.31)
    Sacn,
}

/// Universe and 1-based channel a single value is read from
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelBinding {
    pub universe: u16,
    pub channel: u16,
}

impl ChannelBinding {
    pub const fn new(universe: u16, channel: u16) -> Self {
        Self { universe, channel }
    }

    /// 0-based offset into the universe payload, always within `0..CHANNEL_N`
    pub const fn index(self) -> usize {
        let index = self.channel.saturating_sub(1) as usize;
        if index >= CHANNEL_N {
            CHANNEL_N - 1
        } else {
            index
        }
    }
}

/// Bindings of one analog component for both protocols
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentBinding {
    pub artnet: ChannelBinding,
    pub sacn: ChannelBinding,
}

impl ComponentBinding {
    pub const fn for_protocol(&self, protocol: Protocol) -> ChannelBinding {
        match protocol {
            Protocol::ArtNet => self.artnet,
            Protocol::Sacn => self.sacn,
        }
    }
}

/// Configuration of one analog terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalogConfig {
    pub components: [ComponentBinding; COMPONENT_N],
}

impl AnalogConfig {
    pub const fn binding(&self, component: Component, protocol: Protocol) -> ChannelBinding {
        self.components[component.index()].for_protocol(protocol)
    }
}

/// Configuration of one LED strip output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    pub output_type: OutputType,
    pub input_type: InputType,
    pub pixel_count: u16,
    pub color: SolidColor,
    pub artnet: [u16; UNIVERSE_N],
    pub sacn: [u16; UNIVERSE_N],
}

impl StripConfig {
    /// Universes feeding each slot for the given protocol
    pub const fn universes(&self, protocol: Protocol) -> &[u16; UNIVERSE_N] {
        match protocol {
            Protocol::ArtNet => &self.artnet,
            Protocol::Sacn => &self.sacn,
        }
    }
}

/// Complete output configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// `None` when the stored configuration is not recognised
    pub output_config: Option<OutputConfig>,
    pub output_mode: OutputMode,
    pub strips: [StripConfig; STRIP_N],
    pub analog: [AnalogConfig; ANALOG_N],
    /// Show the solid color after this long without universe data
    pub idle_timeout: Option<Duration>,
}

impl Model {
    /// Apply a stored output configuration value
    ///
    /// Unknown values disable every output rather than failing.
    pub fn set_output_config_raw(&mut self, value: u8) {
        self.output_config = OutputConfig::from_raw(value);
    }

    pub fn strip(&self, index: usize) -> Option<&StripConfig> {
        self.strips.get(index)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Default for Model {
    fn default() -> Self {
        let strips = core::array::from_fn(|strip| {
            let base = (strip * UNIVERSE_N) as u16;
            StripConfig {
                output_type: OutputType::Ws2812,
                input_type: InputType::Rgb8,
                pixel_count: DEFAULT_PIXEL_COUNT,
                color: SolidColor::default(),
                artnet: core::array::from_fn(|slot| base + slot as u16),
                sacn: core::array::from_fn(|slot| base + slot as u16 + 1),
            }
        });
        let analog = core::array::from_fn(|terminal| AnalogConfig {
            components: core::array::from_fn(|component| {
                let channel = (terminal * COMPONENT_N + component + 1) as u16;
                ComponentBinding {
                    artnet: ChannelBinding::new(0, channel),
                    sacn: ChannelBinding::new(1, channel),
                }
            }),
        });
        Self {
            output_config: Some(OutputConfig::DualStrip),
            output_mode: OutputMode::MainLoop,
            strips,
            analog,
            idle_timeout: None,
        }
    }
}

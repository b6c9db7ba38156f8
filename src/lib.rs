#![no_std]

pub mod color;
pub mod driver;
pub mod model;
pub mod router;
pub mod routing;
pub mod shared;
pub mod status;
pub mod strip;
pub mod transport;
pub mod universe_set;

pub use color::{Component, Rgb, Rgbww, SolidColor};
pub use driver::{Driver, PwmOutput};
pub use model::{
    AnalogConfig, ChannelBinding, ComponentBinding, Model, OutputConfig, OutputMode, Protocol,
    StripConfig,
};
pub use router::Router;
pub use routing::Routing;
pub use shared::Shared;
pub use status::{Indicator, PowerClass, PowerPins, StatusLed};
pub use strip::{InputType, OutputType, Strip};
pub use transport::{BusId, Transport};
pub use universe_set::{CapacityError, UniverseSet};

pub use embassy_time::{Duration, Instant};

/// Number of addressable LED strip outputs
pub const STRIP_N: usize = 2;

/// Number of universe slots each strip can be fed from
pub const UNIVERSE_N: usize = 6;

/// Number of analog driver terminals
pub const ANALOG_N: usize = 2;

/// Color components per analog terminal (R, G, B, W, WW)
pub const COMPONENT_N: usize = 5;

/// Channels carried by one universe
pub const CHANNEL_N: usize = 512;

/// Upper bound of distinct universes the device can subscribe to
pub const MAX_UNIVERSES: usize = STRIP_N * UNIVERSE_N + ANALOG_N * COMPONENT_N;

/// Size of a strip's native pixel buffer in bytes
pub const STRIP_BYTES_MAX: usize = UNIVERSE_N * CHANNEL_N;

/// Universe id marking an unassigned binding
pub const UNASSIGNED_UNIVERSE: u16 = 0xFFFF;

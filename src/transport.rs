//! Serial bus capability consumed by the strip outputs.
//!
//! The DMA mechanics live behind this trait. Strips only need to know
//! whether a transfer is still in flight and how to start the next one.

/// Identifies one of the serial buses feeding the strips.
///
/// Strip `n` is always wired to bus `n`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusId {
    Bus0,
    Bus1,
}

impl BusId {
    /// Strip index served by this bus
    pub const fn strip(self) -> usize {
        match self {
            Self::Bus0 => 0,
            Self::Bus1 => 1,
        }
    }
}

/// DMA-capable byte transport
pub trait Transport {
    /// Start sending `data`. `use_clock` selects the clocked (two-wire) mode.
    fn transfer(&mut self, data: &[u8], use_clock: bool);

    /// Non-blocking poll: is a transfer still in flight?
    fn busy(&self) -> bool;

    /// Select the fast bit rate used by self-clocked chips
    fn set_speed_mode(&mut self, fast: bool);

    /// Advance the transport's internal state machine once
    fn update(&mut self) {}
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn transfer(&mut self, data: &[u8], use_clock: bool) {
        (**self).transfer(data, use_clock);
    }

    fn busy(&self) -> bool {
        (**self).busy()
    }

    fn set_speed_mode(&mut self, fast: bool) {
        (**self).set_speed_mode(fast);
    }

    fn update(&mut self) {
        (**self).update();
    }
}

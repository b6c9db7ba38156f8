//! Interrupt-safe single-owner cell for `no_std` targets.
//!
//! The router is entered from two contexts: the main loop and the
//! transport-completion interrupt. Both go through `critical-section`,
//! so an entry from one context never overlaps the other.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;

use crate::driver::PwmOutput;
use crate::model::Protocol;
use crate::router::Router;
use crate::transport::{BusId, Transport};

/// Returned when the cell is used before [`Shared::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uninitialized;

/// A value owned by a `static` and borrowed under a critical section.
pub struct Shared<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> Shared<T> {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store the value. Returns the previous one, if any.
    pub fn init(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(value)))
    }

    /// Run `f` on the value with interrupts masked.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, Uninitialized> {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow(cs).borrow_mut();
            value.as_mut().map(f).ok_or(Uninitialized)
        })
    }

    /// Take the value out, leaving the cell empty.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).take())
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport, P: PwmOutput> Shared<Router<T, P>> {
    /// Transport-completion interrupt entry
    pub fn on_transfer_complete(&self, bus: BusId) {
        let _ = self.with(|router| router.sync_from_interrupt(bus));
    }

    /// Main loop entry
    ///
    /// Interrupts stay masked for the whole [`Router::update`], including a
    /// scheduled solid-color render and frame encode. A completion interrupt
    /// arriving meanwhile is serviced right after, so worst-case interrupt
    /// latency is one full strip encode. Firmware that cannot afford that
    /// should own the router from a single context instead of a `Shared`.
    pub fn poll(&self, now: Instant) {
        let _ = self.with(|router| router.update(now));
    }

    /// Network receive entry
    pub fn on_universe(&self, protocol: Protocol, universe: u16, data: &[u8]) {
        let _ = self.with(|router| router.apply_universe(protocol, universe, data, false));
    }
}

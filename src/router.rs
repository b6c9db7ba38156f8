//! Routing and output orchestration
//!
//! The router owns the configuration snapshot, both strips and the analog
//! driver. Universe payloads from either protocol are merged into the live
//! outputs selected by the active wiring topology, and transfers are pumped
//! either from the main loop or from the transport-completion interrupt.

use core::ops::Range;

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Component;
use crate::driver::{Driver, PwmOutput};
use crate::model::{Model, OutputMode, Protocol};
use crate::routing::Routing;
use crate::strip::{InputType, Strip};
use crate::transport::{BusId, Transport};
use crate::universe_set::UniverseSet;
use crate::{CHANNEL_N, COMPONENT_N, MAX_UNIVERSES, STRIP_BYTES_MAX, STRIP_N, UNASSIGNED_UNIVERSE};

/// Output router - the main orchestrator
pub struct Router<T: Transport, P: PwmOutput> {
    // Configuration
    model: Model,
    routing: Routing,

    // Outputs
    strips: [Strip<T>; STRIP_N],
    driver: Driver<P>,

    // Internal state
    deferred_sync: bool,
    color_scheduled: bool,
    idle: bool,
    started: Option<Instant>,
    last_data: Option<Instant>,
    scratch: [u8; STRIP_BYTES_MAX],
}

impl<T: Transport, P: PwmOutput> Router<T, P> {
    /// Create a router; strip `n` is wired to `transports[n]`
    pub fn new(model: Model, transports: [T; STRIP_N], pwm: P) -> Self {
        let mut index = 0;
        let strips = transports.map(|transport| {
            let strip = Strip::new(transport, &model.strips[index]);
            index += 1;
            strip
        });
        let mut router = Self {
            routing: Routing::INACTIVE,
            model,
            strips,
            driver: Driver::new(pwm),
            deferred_sync: false,
            color_scheduled: false,
            idle: false,
            started: None,
            last_data: None,
            scratch: [0; STRIP_BYTES_MAX],
        };
        router.reload();
        router
    }

    /// Replace the configuration snapshot and reconfigure the strips
    pub fn set_model(&mut self, model: Model) {
        self.model = model;
        self.reload();
    }

    fn reload(&mut self) {
        self.routing = Routing::of(self.model.output_config);
        for (strip, config) in self.strips.iter_mut().zip(&self.model.strips) {
            strip.configure(config);
        }
        #[cfg(feature = "esp32-log")]
        if self.model.output_config.is_none() {
            println!("[Router.reload] unknown output configuration, all outputs inactive");
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub const fn routing(&self) -> Routing {
        self.routing
    }

    pub fn strip(&self, index: usize) -> Option<&Strip<T>> {
        self.strips.get(index)
    }

    pub fn strip_mut(&mut self, index: usize) -> Option<&mut Strip<T>> {
        self.strips.get_mut(index)
    }

    pub fn driver(&self) -> &Driver<P> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut Driver<P> {
        &mut self.driver
    }

    /// Hold hardware pushes back until the next explicit [`Router::sync`]
    pub fn set_deferred_sync(&mut self, deferred: bool) {
        self.deferred_sync = deferred;
    }

    pub const fn deferred_sync(&self) -> bool {
        self.deferred_sync
    }

    /// Show the configured solid color on the next [`Router::update`]
    pub fn schedule_color(&mut self) {
        self.color_scheduled = true;
    }

    /// Time of the last update cycle that followed received universe data
    pub const fn last_data(&self) -> Option<Instant> {
        self.last_data
    }

    /// Universes the live outputs currently listen to
    pub fn active_universes(&self, protocol: Protocol) -> UniverseSet<MAX_UNIVERSES> {
        self.collect_active_universes(protocol)
    }

    /// Collect the universes referenced by every live output
    ///
    /// Analog components always count; strip slots only count while they
    /// cover pixels for the strip's input type. Universes beyond `N` are
    /// dropped and flagged on the returned set.
    pub fn collect_active_universes<const N: usize>(&self, protocol: Protocol) -> UniverseSet<N> {
        let mut universes = UniverseSet::new();
        let routing = self.routing;

        for analog in self.model.analog.iter().take(routing.terminals) {
            for &component in Component::ALL.iter().take(routing.components) {
                let _ = universes.insert(analog.binding(component, protocol).universe);
            }
        }

        for index in routing.strips() {
            let (Some(config), Some(strip)) = (self.model.strip(index), self.strips.get(index))
            else {
                continue;
            };
            for (slot, &universe) in config.universes(protocol).iter().enumerate() {
                if strip.is_universe_active(slot, config.input_type) {
                    let _ = universes.insert(universe);
                }
            }
        }

        #[cfg(feature = "esp32-log")]
        if universes.saturated() {
            println!(
                "[Router.collect] universe set full, {} universe(s) dropped",
                universes.dropped()
            );
        }

        universes
    }

    /// Call `f` for every active universe in discovery order
    pub fn for_each_active_universe(&self, protocol: Protocol, mut f: impl FnMut(u16)) {
        for &universe in &self.active_universes(protocol) {
            f(universe);
        }
    }

    /// Route one universe payload to every live output
    ///
    /// With `skip_driver` the analog terminals are left alone.
    pub fn apply_universe(
        &mut self,
        protocol: Protocol,
        universe: u16,
        data: &[u8],
        skip_driver: bool,
    ) {
        if universe == UNASSIGNED_UNIVERSE {
            return;
        }
        let data = &data[..data.len().min(CHANNEL_N)];
        let routing = self.routing;

        if routing.has_analog() && !skip_driver {
            self.apply_universe_to_driver(
                protocol,
                routing.terminals,
                routing.components,
                universe,
                data,
            );
        }
        self.apply_universe_to_strips(protocol, routing.strips(), universe, data);
    }

    /// Patch the first `components` components of terminals `0..terminals`
    ///
    /// Only components bound to `universe` whose channel lies inside `data`
    /// change. Touched terminals are synced unless sync is deferred.
    pub fn apply_universe_to_driver(
        &mut self,
        protocol: Protocol,
        terminals: usize,
        components: usize,
        universe: u16,
        data: &[u8],
    ) {
        let components = components.min(COMPONENT_N);

        for (terminal, analog) in self.model.analog.iter().enumerate().take(terminals) {
            let Some(mut color) = self.driver.color(terminal) else {
                continue;
            };
            let mut touched = false;
            for &component in Component::ALL[..components].iter().rev() {
                let binding = analog.binding(component, protocol);
                if binding.universe != universe {
                    continue;
                }
                if let Some(&value) = data.get(binding.index()) {
                    color.set(component, value);
                    touched = true;
                }
            }
            if !touched {
                continue;
            }
            self.driver.set_color(terminal, color);
            if !self.deferred_sync {
                self.driver.sync(terminal);
            }
        }
    }

    /// Hand `data` to every slot of `strips` bound to `universe`
    ///
    /// In main-loop mode a strip that received data is transferred at once
    /// unless sync is deferred.
    pub fn apply_universe_to_strips(
        &mut self,
        protocol: Protocol,
        strips: Range<usize>,
        universe: u16,
        data: &[u8],
    ) {
        let immediate = !self.deferred_sync && self.model.output_mode == OutputMode::MainLoop;

        for index in strips {
            let (Some(config), Some(strip)) =
                (self.model.strips.get(index), self.strips.get_mut(index))
            else {
                continue;
            };
            let mut set = false;
            for (slot, &bound) in config.universes(protocol).iter().enumerate() {
                if bound == universe {
                    strip.set_universe_data(slot, data, config.input_type);
                    set = true;
                }
            }
            if !set {
                continue;
            }
            strip.mark_received();
            if immediate {
                strip.transfer();
            }
        }
    }

    /// Push the state of every live output to hardware
    ///
    /// Strips are only transferred here in main-loop mode; in interrupt mode
    /// the completion interrupt keeps them going.
    pub fn sync(&mut self) {
        let routing = self.routing;
        for terminal in 0..routing.terminals {
            self.driver.sync(terminal);
        }
        if self.model.output_mode == OutputMode::MainLoop {
            self.transfer_strips(routing.strips());
        }
    }

    /// Restart the strip wired to `bus` after its transfer completed
    pub fn sync_from_interrupt(&mut self, bus: BusId) {
        if self.model.output_mode != OutputMode::Interrupt {
            return;
        }
        let index = bus.strip();
        if !self.routing.has_strip(index) {
            return;
        }
        if let Some(strip) = self.strips.get_mut(index) {
            strip.transfer();
        }
    }

    /// Main loop step. Call once per iteration.
    pub fn update(&mut self, now: Instant) {
        self.track_idle(now);

        if self.color_scheduled {
            self.color_scheduled = false;
            self.render_solid_color();
            self.transfer_strips(self.routing.strips());
        }

        critical_section::with(|_| {
            for strip in &mut self.strips {
                let fast = !strip.needs_clock();
                strip.transport_mut().set_speed_mode(fast);
            }
        });

        if self.model.output_mode == OutputMode::MainLoop {
            for strip in self.strips.iter_mut().rev() {
                strip.transport_mut().update();
            }
        }
    }

    fn track_idle(&mut self, now: Instant) {
        let started = *self.started.get_or_insert(now);
        let received = self
            .strips
            .iter_mut()
            .fold(false, |received, strip| strip.take_received() | received);
        if received {
            self.last_data = Some(now);
            self.idle = false;
        }

        let Some(timeout) = self.model.idle_timeout else {
            return;
        };
        let reference = self.last_data.unwrap_or(started);
        let silent = now.as_millis().saturating_sub(reference.as_millis());
        if !self.idle && silent >= timeout.as_millis() {
            self.idle = true;
            self.color_scheduled = true;
            #[cfg(feature = "esp32-log")]
            println!("[Router.update] no universe data for {} ms, showing solid color", silent);
        }
    }

    fn transfer_strips(&mut self, strips: Range<usize>) {
        for strip in self.strips.iter_mut().take(strips.end).skip(strips.start) {
            strip.transfer();
        }
    }

    /// Fill every live strip with its configured flat color
    fn render_solid_color(&mut self) {
        for index in self.routing.strips() {
            let (Some(config), Some(strip)) =
                (self.model.strips.get(index), self.strips.get_mut(index))
            else {
                continue;
            };
            let bytes = config.color.rgbw_bytes();
            let (pixel, input) = match strip.bytes_per_pixel() {
                4 => (&bytes[..], InputType::Rgbw8),
                _ => (&bytes[..3], InputType::Rgb8),
            };
            let len = strip.pixel_count() * pixel.len();
            for chunk in self.scratch[..len].chunks_exact_mut(pixel.len()) {
                chunk.copy_from_slice(pixel);
            }
            strip.set_data(&self.scratch[..len], input);
        }
    }
}

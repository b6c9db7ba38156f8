#![allow(dead_code)]

use myrtio_light_router::{
    COMPONENT_N, Indicator, Model, PwmOutput, Rgb, Router, STRIP_N, Transport, UNIVERSE_N,
    UNASSIGNED_UNIVERSE,
};

/// Transport that records every frame it is asked to send
#[derive(Debug, Default)]
pub struct MockTransport {
    pub frames: Vec<(Vec<u8>, bool)>,
    pub busy: bool,
    pub fast: Option<bool>,
    pub updates: usize,
}

impl Transport for MockTransport {
    fn transfer(&mut self, data: &[u8], use_clock: bool) {
        self.frames.push((data.to_vec(), use_clock));
    }

    fn busy(&self) -> bool {
        self.busy
    }

    fn set_speed_mode(&mut self, fast: bool) {
        self.fast = Some(fast);
    }

    fn update(&mut self) {
        self.updates += 1;
    }
}

/// PWM timer that records every duty write
#[derive(Debug, Default)]
pub struct MockPwm {
    pub writes: Vec<(usize, [u16; COMPONENT_N])>,
}

impl PwmOutput for MockPwm {
    fn set_duty(&mut self, terminal: usize, duty: [u16; COMPONENT_N]) {
        self.writes.push((terminal, duty));
    }
}

impl MockPwm {
    pub fn terminals(&self) -> Vec<usize> {
        self.writes.iter().map(|(terminal, _)| *terminal).collect()
    }
}

#[derive(Debug, Default)]
pub struct MockIndicator {
    pub colors: Vec<Rgb>,
}

impl Indicator for MockIndicator {
    fn write(&mut self, color: Rgb) {
        self.colors.push(color);
    }
}

pub type TestRouter = Router<MockTransport, MockPwm>;

pub fn router(model: Model) -> TestRouter {
    Router::new(
        model,
        [MockTransport::default(), MockTransport::default()],
        MockPwm::default(),
    )
}

/// Number of frames sent on each strip bus
pub fn frames(router: &TestRouter) -> [usize; STRIP_N] {
    core::array::from_fn(|index| router.strip(index).unwrap().transport().frames.len())
}

pub fn pwm_terminals(router: &TestRouter) -> Vec<usize> {
    router.driver().pwm().terminals()
}

/// Model with every binding unassigned
pub fn blank_model() -> Model {
    let mut model = Model::default();
    for strip in &mut model.strips {
        strip.artnet = [UNASSIGNED_UNIVERSE; UNIVERSE_N];
        strip.sacn = [UNASSIGNED_UNIVERSE; UNIVERSE_N];
    }
    for analog in &mut model.analog {
        for component in &mut analog.components {
            component.artnet.universe = UNASSIGNED_UNIVERSE;
            component.sacn.universe = UNASSIGNED_UNIVERSE;
        }
    }
    model
}

mod common;

mod tests {
    use myrtio_light_router::color::cie_duty;
    use myrtio_light_router::{
        ChannelBinding, Component, Driver, OutputConfig, Protocol, Rgbww,
    };

    use crate::common::{MockPwm, blank_model, pwm_terminals, router};

    fn bind(
        model: &mut myrtio_light_router::Model,
        terminal: usize,
        component: Component,
        protocol: Protocol,
        binding: ChannelBinding,
    ) {
        let slot = &mut model.analog[terminal].components[component.index()];
        match protocol {
            Protocol::ArtNet => slot.artnet = binding,
            Protocol::Sacn => slot.sacn = binding,
        }
    }

    #[test]
    fn test_rgbw_terminal_takes_four_components() {
        let mut model = blank_model();
        model.output_config = Some(OutputConfig::RgbwPlusStrip);
        for (offset, component) in Component::ALL[..4].iter().enumerate() {
            let channel = 11 + offset as u16;
            bind(&mut model, 0, *component, Protocol::Sacn, ChannelBinding::new(3, channel));
        }
        bind(&mut model, 0, Component::Ww, Protocol::Sacn, ChannelBinding::new(3, 15));

        let mut router = router(model);
        router.driver_mut().set_color(0, Rgbww::new(1, 2, 3, 4, 77));

        let mut data = [0u8; 14];
        data[10..14].copy_from_slice(&[200, 100, 50, 9]);
        router.apply_universe(Protocol::Sacn, 3, &data, false);

        assert_eq!(router.driver().color(0), Some(Rgbww::new(200, 100, 50, 9, 77)));
        assert_eq!(pwm_terminals(&router), vec![0]);
    }

    #[test]
    fn test_unmatched_universe_leaves_state_untouched() {
        let mut model = blank_model();
        model.output_config = Some(OutputConfig::Rgbwww);
        for component in Component::ALL {
            bind(&mut model, 0, component, Protocol::ArtNet, ChannelBinding::new(4, 1));
        }
        let mut router = router(model);
        let state = Rgbww::new(9, 8, 7, 6, 5);
        router.driver_mut().set_color(0, state);

        router.apply_universe(Protocol::ArtNet, 5, &[255; 512], false);

        assert_eq!(router.driver().color(0), Some(state));
        assert!(pwm_terminals(&router).is_empty());
    }

    #[test]
    fn test_components_are_gated_independently() {
        let mut model = blank_model();
        model.output_config = Some(OutputConfig::RgbPlusStrip);
        bind(&mut model, 0, Component::R, Protocol::ArtNet, ChannelBinding::new(1, 1));
        bind(&mut model, 0, Component::G, Protocol::ArtNet, ChannelBinding::new(2, 1));
        bind(&mut model, 0, Component::B, Protocol::ArtNet, ChannelBinding::new(1, 40));
        let mut router = router(model);
        router.driver_mut().set_color(0, Rgbww::new(1, 2, 3, 0, 0));

        // Blue's channel lies past the end of this short payload
        router.apply_universe(Protocol::ArtNet, 1, &[42; 10], false);
        assert_eq!(router.driver().color(0), Some(Rgbww::new(42, 2, 3, 0, 0)));

        router.apply_universe(Protocol::ArtNet, 2, &[24; 10], false);
        assert_eq!(router.driver().color(0), Some(Rgbww::new(42, 24, 3, 0, 0)));
    }

    #[test]
    fn test_channel_index_is_clamped() {
        assert_eq!(ChannelBinding::new(0, 0).index(), 0);
        assert_eq!(ChannelBinding::new(0, 1).index(), 0);
        assert_eq!(ChannelBinding::new(0, 512).index(), 511);
        assert_eq!(ChannelBinding::new(0, 513).index(), 511);
        assert_eq!(ChannelBinding::new(0, u16::MAX).index(), 511);
    }

    #[test]
    fn test_out_of_range_channel_reads_last_slot() {
        let mut model = blank_model();
        model.output_config = Some(OutputConfig::RgbRgb);
        bind(&mut model, 1, Component::B, Protocol::ArtNet, ChannelBinding::new(0, 9000));
        bind(&mut model, 1, Component::R, Protocol::ArtNet, ChannelBinding::new(0, 0));
        let mut router = router(model);

        let mut data = [0u8; 512];
        data[0] = 11;
        data[511] = 99;
        router.apply_universe(Protocol::ArtNet, 0, &data, false);
        assert_eq!(router.driver().color(1), Some(Rgbww::new(11, 0, 99, 0, 0)));

        // A payload shorter than the clamped index leaves blue alone
        router.apply_universe(Protocol::ArtNet, 0, &[55; 511], false);
        assert_eq!(router.driver().color(1), Some(Rgbww::new(55, 0, 99, 0, 0)));
    }

    #[test]
    fn test_rgb_rgb_ignores_white_components() {
        let mut model = blank_model();
        model.output_config = Some(OutputConfig::RgbRgb);
        for terminal in 0..2 {
            for component in Component::ALL {
                bind(&mut model, terminal, component, Protocol::ArtNet, ChannelBinding::new(0, 1));
            }
        }
        let mut router = router(model);
        router.apply_universe(Protocol::ArtNet, 0, &[200], false);

        for terminal in 0..2 {
            assert_eq!(router.driver().color(terminal), Some(Rgbww::new(200, 200, 200, 0, 0)));
        }
        assert_eq!(pwm_terminals(&router), vec![0, 1]);
    }

    #[test]
    fn test_deferred_sync_holds_back_pwm_writes() {
        let mut model = blank_model();
        model.output_config = Some(OutputConfig::RgbRgb);
        bind(&mut model, 0, Component::R, Protocol::ArtNet, ChannelBinding::new(0, 1));
        let mut router = router(model);
        router.set_deferred_sync(true);

        router.apply_universe(Protocol::ArtNet, 0, &[128], false);
        assert_eq!(router.driver().color(0).map(|color| color.r), Some(128));
        assert!(pwm_terminals(&router).is_empty());

        router.sync();
        assert_eq!(pwm_terminals(&router), vec![0, 1]);
    }

    #[test]
    fn test_cie_correction() {
        assert_eq!(cie_duty(0, 1000), 0);
        assert_eq!(cie_duty(255, 1000), 1000);
        let mut previous = 0;
        for value in 0..=255u8 {
            let duty = cie_duty(value, 0xFFFF);
            assert!(duty >= previous);
            previous = duty;
        }
        // Mid-scale input is far below half power
        assert!(cie_duty(128, 1000) < 250);
    }

    #[test]
    fn test_driver_sync_writes_corrected_duties() {
        let mut driver = Driver::with_max_duty(MockPwm::default(), 1000);
        driver.set_color(0, Rgbww::new(255, 0, 0, 0, 255));
        driver.sync(0);
        driver.sync(7);

        assert_eq!(driver.pwm().writes, vec![(0, [1000, 0, 0, 0, 1000])]);
        assert_eq!(driver.color(7), None);
    }
}

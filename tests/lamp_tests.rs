//! Integration tests for Lamp

mod common;
use common::*;

use hsi_lamp::{
    Chromaticity, Colorspace, Fader, HsiColor, HueDirection, Lamp, Led, MicrosDuration,
    MicrosInstant, RandomFader, TimeSource,
};
use rand::rngs::mock::StepRng;

#[test]
fn new_lamp_turns_every_channel_off() {
    let colorspace = tri_colorspace();
    let time = MockTimeSource::new();
    let lamp = Lamp::new(&colorspace, MockOutput::new(), &time);

    assert_eq!(
        lamp.output().writes(),
        &[(0, 0.0), (1, 0.0), (2, 0.0), (WHITE_CHANNEL, 0.0)]
    );
    assert_eq!(lamp.current_color(), None);
}

#[test]
fn set_color_scales_levels_by_channel_max() {
    let mut colorspace = Colorspace::<u8, 2>::new(Led::new(
        Chromaticity::new(0.0, 0.0),
        0.5,
        WHITE_CHANNEL,
    ));
    colorspace
        .add_led(Led::new(Chromaticity::new(1.0, 0.0), 0.8, 0))
        .unwrap();
    colorspace
        .add_led(Led::new(Chromaticity::new(-1.0, 0.5), 1.0, 1))
        .unwrap();

    let time = MockTimeSource::new();
    let mut lamp = Lamp::new(&colorspace, MockOutput::new(), &time);
    lamp.output_mut().clear();

    lamp.set_color(HsiColor::new(0.0, 0.5, 1.0));

    assert!(approx_eq(lamp.output().last_level(0).unwrap(), 0.4));
    assert!(approx_eq(lamp.output().last_level(1).unwrap(), 0.0));
    assert!(approx_eq(lamp.output().last_level(WHITE_CHANNEL).unwrap(), 0.25));
    assert_eq!(lamp.current_color(), Some(HsiColor::new(0.0, 0.5, 1.0)));
}

#[test]
fn unchanged_color_is_not_rewritten() {
    let colorspace = tri_colorspace();
    let time = MockTimeSource::new();
    let mut lamp = Lamp::new(&colorspace, MockOutput::new(), &time);

    lamp.set_color(green());
    lamp.output_mut().clear();

    lamp.set_color(green());
    assert!(lamp.output().writes().is_empty());

    lamp.set_color(blue());
    assert_eq!(lamp.output().writes().len(), 4);
}

#[test]
fn write_levels_clamps_and_forgets_cached_color() {
    let colorspace = tri_colorspace();
    let time = MockTimeSource::new();
    let mut lamp = Lamp::new(&colorspace, MockOutput::new(), &time);

    lamp.set_color(red());
    lamp.output_mut().clear();

    let channels = [0u8, 1, 2];
    lamp.write_levels(channels.iter(), [1.5, -0.2, f32::NAN]);

    assert_eq!(lamp.output().writes(), &[(0, 1.0), (1, 0.0), (2, 0.0)]);
    assert_eq!(lamp.current_color(), None);

    // The same color is written again after a raw write.
    lamp.output_mut().clear();
    lamp.set_color(red());
    assert_eq!(lamp.output().writes().len(), 4);
}

#[test]
fn service_shows_generator_color_at_current_time() {
    let colorspace = tri_colorspace();
    let time = MockTimeSource::new();
    let mut lamp = Lamp::new(&colorspace, MockOutput::new(), &time);

    let mut fader = Fader::new(
        red(),
        green(),
        MicrosDuration(1000),
        HueDirection::Increasing,
        time.now(),
    );

    time.advance(MicrosDuration(500));
    let shown = lamp.service(&mut fader);

    assert!(colors_equal(shown, HsiColor::new(60.0, 1.0, 1.0)));
    assert!(approx_eq(lamp.output().last_level(0).unwrap(), 0.5));
    assert!(approx_eq(lamp.output().last_level(1).unwrap(), 0.5));
    assert_eq!(lamp.current_color(), Some(shown));
}

#[test]
fn service_random_writes_pool_then_effect_levels() {
    let colorspace = tri_colorspace();
    let time = MockTimeSource::new();
    let mut lamp = Lamp::new(&colorspace, MockOutput::new(), &time);

    let mut random: RandomFader<u8, MicrosInstant, StepRng, 2, 1> =
        RandomFader::new(MicrosDuration(1000), StepRng::new(0, 0));
    random
        .add_led(Led::new(Chromaticity::new(1.0, 0.0), 0.5, 4))
        .unwrap();
    random
        .add_effect_led(Led::new(Chromaticity::new(0.0, 1.0), 1.0, 7), 1.0)
        .unwrap();
    random.start_random(MicrosDuration(1000), time.now());
    lamp.output_mut().clear();

    time.advance(MicrosDuration(1500));
    lamp.service_random(&mut random);

    assert_eq!(lamp.output().writes().len(), 2);
    assert_eq!(lamp.output().writes()[0], (4, 0.5));
    assert_eq!(lamp.output().writes()[1].0, 7);
    assert!(approx_eq(lamp.output().writes()[1].1, 0.5));
}

//! Integration tests for HsiColor

mod common;
use common::*;

use hsi_lamp::{HsiColor, Hsv};

#[test]
fn set_hue_wraps_any_real_angle() {
    let cases = [
        (0.0, 0.0),
        (45.5, 45.5),
        (360.0, 0.0),
        (725.0, 5.0),
        (-30.0, 330.0),
        (-360.0, 0.0),
        (-725.0, 355.0),
    ];

    let mut color = HsiColor::OFF;
    for (input, expected) in cases {
        color.set_hue(input);
        assert!(
            approx_eq(color.hue(), expected),
            "set_hue({input}) gave {}",
            color.hue()
        );
    }
}

#[test]
fn saturation_and_intensity_clamp_to_unit_range() {
    let mut color = HsiColor::OFF;

    color.set_saturation(1.7);
    assert_eq!(color.saturation(), 1.0);
    color.set_saturation(-0.2);
    assert_eq!(color.saturation(), 0.0);
    color.set_saturation(0.35);
    assert_eq!(color.saturation(), 0.35);

    color.set_intensity(3.0);
    assert_eq!(color.intensity(), 1.0);
    color.set_intensity(-1.0);
    assert_eq!(color.intensity(), 0.0);
    color.set_intensity(0.6);
    assert_eq!(color.intensity(), 0.6);
}

#[test]
fn constructor_applies_same_normalization_as_setters() {
    let color = HsiColor::new(-90.0, 2.0, -1.0);
    assert_eq!(color.to_array(), [270.0, 1.0, 0.0]);

    let mut set = HsiColor::default();
    set.set_hsi(-90.0, 2.0, -1.0);
    assert_eq!(set, color);
}

#[test]
fn default_is_off() {
    assert_eq!(HsiColor::default(), HsiColor::OFF);
}

#[test]
fn converts_from_palette_hsv() {
    let hsv: Hsv = Hsv::new(-60.0, 0.5, 0.25);
    let color = HsiColor::from(hsv);
    assert!(colors_equal(color, HsiColor::new(300.0, 0.5, 0.25)));
}

//! Shared test infrastructure for hsi-lamp integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::f32::consts::PI;

use hsi_lamp::{
    Chromaticity, Colorspace, HsiColor, Led, LevelOutput, MicrosDuration, MicrosInstant,
    TimeSource,
};

// ============================================================================
// Mock Output
// ============================================================================

/// Mock output that records every channel write for testing
pub struct MockOutput {
    writes: Vec<(u8, f32)>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self { writes: Vec::new() }
    }

    pub fn writes(&self) -> &[(u8, f32)] {
        &self.writes
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Most recent level written to `channel`
    pub fn last_level(&self, channel: u8) -> Option<f32> {
        self.writes
            .iter()
            .rev()
            .find(|(written, _)| *written == channel)
            .map(|(_, level)| *level)
    }
}

impl LevelOutput<u8> for MockOutput {
    fn write_level(&mut self, channel: &u8, level: f32) {
        self.writes.push((*channel, level));
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<MicrosInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(MicrosInstant(0)),
        }
    }

    /// Advance time by the given duration, wrapping like a hardware counter
    pub fn advance(&self, duration: MicrosDuration) {
        let current = self.current_time.get();
        self.current_time
            .set(MicrosInstant(current.0.wrapping_add(duration.0)));
    }

    pub fn set_time(&self, time: MicrosInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<MicrosInstant> for MockTimeSource {
    fn now(&self) -> MicrosInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const WHITE_CHANNEL: u8 = 9;

/// LED on the unit circle around the origin at `degrees`
pub fn led_at(degrees: f32, channel: u8) -> Led<u8> {
    let radians = degrees * PI / 180.0;
    Led::new(
        Chromaticity::new(radians.cos(), radians.sin()),
        1.0,
        channel,
    )
}

pub fn white_led() -> Led<u8> {
    Led::new(Chromaticity::new(0.0, 0.0), 1.0, WHITE_CHANNEL)
}

/// Three LEDs at 0, 120 and 240 degrees around a white anchor at the origin
pub fn tri_colorspace() -> Colorspace<u8, 3> {
    let mut colorspace = Colorspace::new(white_led());
    colorspace.add_led(led_at(0.0, 0)).unwrap();
    colorspace.add_led(led_at(120.0, 1)).unwrap();
    colorspace.add_led(led_at(240.0, 2)).unwrap();
    colorspace
}

pub fn red() -> HsiColor {
    HsiColor::new(0.0, 1.0, 1.0)
}

pub fn green() -> HsiColor {
    HsiColor::new(120.0, 1.0, 1.0)
}

pub fn blue() -> HsiColor {
    HsiColor::new(240.0, 1.0, 1.0)
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const EPSILON: f32 = 1.0e-4;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn approx_eq_epsilon(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Compare two colors component-wise with floating-point tolerance
pub fn colors_equal(a: HsiColor, b: HsiColor) -> bool {
    approx_eq(a.hue(), b.hue())
        && approx_eq(a.saturation(), b.saturation())
        && approx_eq(a.intensity(), b.intensity())
}

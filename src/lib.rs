#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`HsiColor`**: Hue/saturation/intensity color, hue wrapped and ratios clamped
//! - **`Chromaticity`** / **`Led`**: Where an emitter sits in the (u*, v*) plane, its
//!   scale factor and its output channel
//! - **`Colorspace`**: LEDs sorted by angle around a white anchor; resolves a color into
//!   per-LED levels plus a white level
//! - **`Fader`**, **`Strober`**, **`Cycler`**: Time-driven `HsiColor` generators
//! - **`RandomFader`**: Random level cross-fades with stochastic effect channels
//! - **`Lamp`**: Clamps, scales and writes levels through a `LevelOutput`
//! - **`TimeSource`** / **`TimeInstant`** / **`TimeDuration`**: Traits to implement for
//!   your timing system; `MicrosInstant` covers wrapping microsecond counters
//!
//! Levels are `f32` in the 0.0-1.0 range. When implementing `LevelOutput` for your
//! hardware, convert them to the device's native format (e.g. PWM duty cycles).

// Re-export palette color types used for LED placement.
pub use palette::{Hsv, Luv, Srgb};

pub mod color;
pub mod colorspace;
pub mod generator;
pub mod lamp;
pub mod led;
pub mod time;

pub use color::HsiColor;
pub use colorspace::{Colorspace, ColorspaceError, Levels};
pub use generator::{
    ColorSource, Cycler, EffectState, Fader, HueDirection, RandomFader, RandomFaderError,
    RandomLevels, StrobePhase, Strober,
};
pub use lamp::{Lamp, LevelOutput};
pub use led::{Chromaticity, Led};
pub use time::{MicrosDuration, MicrosInstant, TimeDuration, TimeInstant, TimeSource};

//! Time-driven color and level generators.
//!
//! Each generator owns its timing state and is polled with the current
//! instant; nothing here blocks. [`Fader`], [`Strober`] and [`Cycler`] produce
//! an [`HsiColor`] for a [`Colorspace`](crate::Colorspace) to resolve, while
//! [`RandomFader`] produces output levels directly.

mod cycler;
mod fader;
mod random;
mod strober;

pub use cycler::Cycler;
pub use fader::Fader;
pub use random::{EffectState, RandomFader, RandomFaderError, RandomLevels};
pub use strober::{StrobePhase, Strober};

use crate::color::HsiColor;
use crate::time::TimeInstant;

/// Which way hue travels around the color circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HueDirection {
    /// Hue grows, red toward green.
    #[default]
    Increasing,

    /// Hue shrinks, red toward blue.
    Decreasing,

    /// Hue stays fixed.
    Constant,
}

/// A generator that yields a color for a point in time.
pub trait ColorSource<I: TimeInstant> {
    /// Returns the color to show at `now`, advancing internal timing state.
    fn color_at(&mut self, now: I) -> HsiColor;
}

/// Progress ratio `elapsed / span`, or `None` when `span` is zero.
#[inline]
pub(crate) fn progress(elapsed_micros: f32, span_micros: u64) -> Option<f32> {
    if span_micros == 0 {
        None
    } else {
        Some(elapsed_micros / span_micros as f32)
    }
}

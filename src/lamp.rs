//! Lamp driver tying a [`Colorspace`] to the hardware output.
//!
//! Provides [`Lamp`], which resolves colors through a configured colorspace,
//! clamps and scales the resulting levels, and writes them through a
//! [`LevelOutput`] in one pass per poll. Also defines the [`LevelOutput`]
//! trait for hardware abstraction.

use crate::color::HsiColor;
use crate::colorspace::Colorspace;
use crate::generator::{ColorSource, RandomFader};
use crate::time::{TimeInstant, TimeSource};
use rand::RngCore;

/// Trait for abstracting the hardware write of one output channel.
///
/// Implement this for your PWM, DAC or DMX backend. Levels are in the range
/// 0.0-1.0 and already scaled by the channel's max value; convert them to the
/// device's native duty cycle. Handle any hardware errors internally - this
/// method cannot fail.
pub trait LevelOutput<C> {
    /// Drives `channel` at `level`.
    fn write_level(&mut self, channel: &C, level: f32);
}

/// Drives one lamp from HSI colors or raw level vectors.
///
/// All writes for a poll go through a single `Lamp` call, so channels are
/// never left half updated between generators.
///
/// # Type Parameters
/// * `'a` - Lifetime of the colorspace and time source borrows
/// * `I` - Time instant type
/// * `C` - Channel identifier type
/// * `O` - Output implementation type
/// * `T` - Time source implementation type
/// * `N` - Colorspace capacity
pub struct Lamp<'a, I: TimeInstant, C, O: LevelOutput<C>, T: TimeSource<I>, const N: usize> {
    colorspace: &'a Colorspace<C, N>,
    output: O,
    time_source: &'a T,
    current_color: Option<HsiColor>,
    _instant: core::marker::PhantomData<I>,
}

impl<'a, I: TimeInstant, C, O: LevelOutput<C>, T: TimeSource<I>, const N: usize>
    Lamp<'a, I, C, O, T, N>
{
    /// Creates a lamp with every channel, white included, turned off.
    pub fn new(colorspace: &'a Colorspace<C, N>, mut output: O, time_source: &'a T) -> Self {
        for channel in colorspace.channels() {
            output.write_level(channel, 0.0);
        }

        Self {
            colorspace,
            output,
            time_source,
            current_color: None,
            _instant: core::marker::PhantomData,
        }
    }

    /// Shows `color`, skipping the write if it is already displayed.
    ///
    /// Each level is clamped into `[0, 1]` and multiplied by its channel's
    /// max value before writing.
    pub fn set_color(&mut self, color: HsiColor) {
        if self.current_color == Some(color) {
            return;
        }

        let levels = self.colorspace.hue_to_levels(color);
        let channels = self.colorspace.channels();
        let max_values = self.colorspace.max_values();

        for ((channel, max), level) in channels.zip(max_values).zip(levels.iter()) {
            self.output.write_level(channel, clamp_level(level) * max);
        }

        self.current_color = Some(color);
    }

    /// Writes raw levels to channels pairwise, clamped into `[0, 1]`.
    ///
    /// Bypasses the colorspace, so the cached color is forgotten.
    pub fn write_levels<'c>(
        &mut self,
        channels: impl IntoIterator<Item = &'c C>,
        levels: impl IntoIterator<Item = f32>,
    ) where
        C: 'c,
    {
        for (channel, level) in channels.into_iter().zip(levels) {
            self.output.write_level(channel, clamp_level(level));
        }
        self.current_color = None;
    }

    /// Polls `generator` at the current time and shows its color.
    pub fn service<G: ColorSource<I>>(&mut self, generator: &mut G) -> HsiColor {
        let color = generator.color_at(self.time_source.now());
        self.set_color(color);
        color
    }

    /// Polls a random fader at the current time and writes its levels.
    pub fn service_random<R: RngCore, const P: usize, const E: usize>(
        &mut self,
        fader: &mut RandomFader<C, I, R, P, E>,
    ) {
        let levels = fader.levels(self.time_source.now());
        self.write_levels(fader.channels(), levels.iter());
    }

    /// The color last written through [`Lamp::set_color`], if still displayed.
    pub fn current_color(&self) -> Option<HsiColor> {
        self.current_color
    }

    /// The colorspace this lamp resolves colors with.
    pub fn colorspace(&self) -> &'a Colorspace<C, N> {
        self.colorspace
    }

    /// Shared access to the output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Exclusive access to the output.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

use super::{ColorSource, HueDirection};
use crate::color::HsiColor;
use crate::time::{TimeDuration, TimeInstant, elapsed_micros};

/// Rotates hue continuously at a constant rate.
///
/// Each query advances hue by the time elapsed since the previous query and
/// re-bases the clock, so the generator integrates incrementally rather than
/// from a fixed start.
#[derive(Debug, Clone, Copy)]
pub struct Cycler<I: TimeInstant> {
    color: HsiColor,
    last: I,
    /// Degrees per microsecond, signed by direction.
    step: f32,
}

impl<I: TimeInstant> Cycler<I> {
    /// Creates a cycler making one full turn every `rotation`.
    ///
    /// A zero `rotation` or [`HueDirection::Constant`] holds the hue.
    pub fn new(color: HsiColor, rotation: I::Duration, direction: HueDirection, now: I) -> Self {
        Self {
            color,
            last: now,
            step: hue_step(rotation, direction),
        }
    }

    /// Replaces the color and rate, re-basing the clock at `now`.
    pub fn set_cycler(
        &mut self,
        color: HsiColor,
        rotation: I::Duration,
        direction: HueDirection,
        now: I,
    ) {
        self.color = color;
        self.last = now;
        self.step = hue_step(rotation, direction);
    }

    /// Advances hue to `now` and returns the updated color.
    pub fn color_at(&mut self, now: I) -> HsiColor {
        let elapsed = elapsed_micros(now, self.last);
        self.color.set_hue(self.color.hue() + elapsed * self.step);
        self.last = now;
        self.color
    }

    /// The color as of the last query.
    pub fn color(&self) -> HsiColor {
        self.color
    }
}

impl<I: TimeInstant> ColorSource<I> for Cycler<I> {
    fn color_at(&mut self, now: I) -> HsiColor {
        Cycler::color_at(self, now)
    }
}

fn hue_step<D: TimeDuration>(rotation: D, direction: HueDirection) -> f32 {
    let micros = rotation.as_micros();
    if micros == 0 {
        return 0.0;
    }

    let rate = 360.0 / micros as f32;
    match direction {
        HueDirection::Increasing => rate,
        HueDirection::Decreasing => -rate,
        HueDirection::Constant => 0.0,
    }
}

use super::{ColorSource, HueDirection, progress};
use crate::color::HsiColor;
use crate::time::{TimeDuration, TimeInstant, elapsed_micros};

/// Linear cross-fade between two HSI colors.
///
/// Saturation and intensity interpolate linearly. Hue interpolates linearly
/// in the requested [`HueDirection`]: decreasing treats the second hue as
/// `hue - 360` so the fade travels the other way around the circle. When both
/// hues are equal the direction is forced to [`HueDirection::Constant`].
///
/// The fade progress is not clamped: past the end of the fade the color keeps
/// extrapolating, so check [`Fader::is_running`] before trusting it.
#[derive(Debug, Clone, Copy)]
pub struct Fader<I: TimeInstant> {
    colors: [HsiColor; 2],
    start: I,
    duration: I::Duration,
    direction: HueDirection,
}

impl<I: TimeInstant> Fader<I> {
    /// Creates a fader that starts at `now`.
    pub fn new(
        from: HsiColor,
        to: HsiColor,
        duration: I::Duration,
        direction: HueDirection,
        now: I,
    ) -> Self {
        Self {
            colors: [from, to],
            start: now,
            duration,
            direction: effective_direction(from, to, direction),
        }
    }

    /// Restarts the fade at `now` with new endpoints.
    pub fn set_fader(
        &mut self,
        from: HsiColor,
        to: HsiColor,
        duration: I::Duration,
        direction: HueDirection,
        now: I,
    ) {
        self.colors = [from, to];
        self.start = now;
        self.duration = duration;
        self.direction = effective_direction(from, to, direction);
    }

    /// Color at `now`. A zero-length fade snaps straight to the second color.
    pub fn color_at(&self, now: I) -> HsiColor {
        let [from, to] = self.colors;
        let Some(f) = progress(elapsed_micros(now, self.start), self.duration.as_micros()) else {
            return to;
        };

        let hue = match self.direction {
            HueDirection::Increasing => lerp(from.hue(), to.hue(), f),
            HueDirection::Decreasing => lerp(from.hue(), to.hue() - 360.0, f),
            HueDirection::Constant => from.hue(),
        };

        HsiColor::new(
            hue,
            lerp(from.saturation(), to.saturation(), f),
            lerp(from.intensity(), to.intensity(), f),
        )
    }

    /// Returns true while elapsed time has not passed the fade duration.
    pub fn is_running(&self, now: I) -> bool {
        now.duration_since(self.start).as_micros() <= self.duration.as_micros()
    }

    /// The two endpoints, start first.
    pub fn colors(&self) -> [HsiColor; 2] {
        self.colors
    }

    /// Effective hue direction, after the equal-hue override.
    pub fn direction(&self) -> HueDirection {
        self.direction
    }
}

impl<I: TimeInstant> ColorSource<I> for Fader<I> {
    fn color_at(&mut self, now: I) -> HsiColor {
        Fader::color_at(self, now)
    }
}

fn effective_direction(from: HsiColor, to: HsiColor, requested: HueDirection) -> HueDirection {
    if from.hue() == to.hue() {
        HueDirection::Constant
    } else {
        requested
    }
}

#[inline]
fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a * (1.0 - f) + b * f
}

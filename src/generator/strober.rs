use super::ColorSource;
use crate::color::HsiColor;
use crate::time::{TimeDuration, TimeInstant};

/// Which half of a strobe period a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrobePhase {
    /// Shown for the first half of each period.
    First,

    /// Shown for the second half of each period.
    Second,
}

/// Alternates between two colors, half a period each.
///
/// Period changes are double buffered: [`Strober::set_period`] only stages the
/// new period, which becomes active at the next rollover so a flash already
/// in progress is never cut short or stretched.
#[derive(Debug, Clone, Copy)]
pub struct Strober<I: TimeInstant> {
    colors: [HsiColor; 2],
    start: I,
    period: I::Duration,
    pending_period: I::Duration,
}

impl<I: TimeInstant> Strober<I> {
    /// Creates a strober whose first period starts at `now`.
    pub fn new(first: HsiColor, second: HsiColor, period: I::Duration, now: I) -> Self {
        Self {
            colors: [first, second],
            start: now,
            period,
            pending_period: period,
        }
    }

    /// Replaces both colors immediately and stages a new period.
    pub fn set_strober(&mut self, first: HsiColor, second: HsiColor, period: I::Duration) {
        self.colors = [first, second];
        self.pending_period = period;
    }

    /// Stages a new period, applied at the next rollover.
    pub fn set_period(&mut self, period: I::Duration) {
        self.pending_period = period;
    }

    /// Replaces one of the two colors immediately.
    pub fn set_color(&mut self, phase: StrobePhase, color: HsiColor) {
        match phase {
            StrobePhase::First => self.colors[0] = color,
            StrobePhase::Second => self.colors[1] = color,
        }
    }

    /// The period currently in effect.
    pub fn period(&self) -> I::Duration {
        self.period
    }

    /// Color at `now`, rolling over to a new period once the current one ends.
    ///
    /// A rollover restarts timing at `now` and activates the staged period.
    /// While the active period is zero there is nothing to time, so the
    /// second color is shown and the staged period is picked up on every call.
    pub fn color_at(&mut self, now: I) -> HsiColor {
        if self.period.as_micros() == 0 {
            self.roll_over(now);
            if self.period.as_micros() == 0 {
                return self.colors[1];
            }
        }

        let elapsed = now.duration_since(self.start).as_micros();
        let period = self.period.as_micros();

        if elapsed > period {
            self.roll_over(now);
            self.colors[0]
        } else if elapsed < period / 2 {
            self.colors[0]
        } else {
            self.colors[1]
        }
    }

    fn roll_over(&mut self, now: I) {
        self.period = self.pending_period;
        self.start = now;
    }
}

impl<I: TimeInstant> ColorSource<I> for Strober<I> {
    fn color_at(&mut self, now: I) -> HsiColor {
        Strober::color_at(self, now)
    }
}

//! Time abstraction traits for platform-agnostic timing.
//!
//! Generators measure elapsed time in microseconds. Instants may come from a
//! free-running counter that wraps (the classic 32-bit `micros()` tick), so
//! [`TimeInstant::duration_since`] must be wrap-safe: [`MicrosInstant`] shows
//! the convention, using unsigned wrapping subtraction.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to microseconds.
    fn as_micros(&self) -> u64;

    /// Creates duration from microseconds.
    fn from_micros(micros: u64) -> Self;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self {
        Self::from_micros(millis.saturating_mul(1000))
    }

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations backed by a wrapping counter must return the correct
    /// duration across a single wrap.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Duration in microseconds, paired with [`MicrosInstant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MicrosDuration(pub u32);

impl TimeDuration for MicrosDuration {
    const ZERO: Self = MicrosDuration(0);

    fn as_micros(&self) -> u64 {
        u64::from(self.0)
    }

    fn from_micros(micros: u64) -> Self {
        MicrosDuration(u32::try_from(micros).unwrap_or(u32::MAX))
    }

    fn saturating_sub(self, other: Self) -> Self {
        MicrosDuration(self.0.saturating_sub(other.0))
    }
}

/// Reading of a free-running 32-bit microsecond counter.
///
/// The counter wraps roughly every 71.6 minutes. Differences use wrapping
/// arithmetic, so elapsed time stays correct as long as the caller polls at
/// least once per wrap period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MicrosInstant(pub u32);

impl TimeInstant for MicrosInstant {
    type Duration = MicrosDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MicrosDuration(self.0.wrapping_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        // The counter itself wraps, so addition is always defined.
        Some(MicrosInstant(self.0.wrapping_add(duration.0)))
    }
}

impl TimeDuration for core::time::Duration {
    const ZERO: Self = core::time::Duration::ZERO;

    fn as_micros(&self) -> u64 {
        u64::try_from(core::time::Duration::as_micros(self)).unwrap_or(u64::MAX)
    }

    fn from_micros(micros: u64) -> Self {
        core::time::Duration::from_micros(micros)
    }

    fn saturating_sub(self, other: Self) -> Self {
        core::time::Duration::saturating_sub(self, other)
    }
}

#[cfg(feature = "std")]
impl TimeInstant for std::time::Instant {
    type Duration = core::time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        self.saturating_duration_since(earlier)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        std::time::Instant::checked_add(&self, duration)
    }
}

/// Elapsed microseconds between two instants as `f32`, for ratio arithmetic.
#[inline]
pub(crate) fn elapsed_micros<I: TimeInstant>(now: I, earlier: I) -> f32 {
    now.duration_since(earlier).as_micros() as f32
}

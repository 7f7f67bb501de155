use crate::led::Led;
use crate::time::{TimeDuration, TimeInstant};
use heapless::Vec;
use rand::{Rng, RngCore};

/// State of an auxiliary effect channel, re-rolled once per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectState {
    /// Dark for the whole period.
    #[default]
    Off,

    /// Fully lit for the whole period.
    On,

    /// Ramping from dark to full over the period.
    FadingIn,

    /// Ramping from full to dark over the period.
    FadingOut,
}

impl EffectState {
    /// Next state given a uniform `draw` in `[0, 1)` and the channel's
    /// activation `probability`. A draw below the probability is a hit.
    ///
    /// | state      | hit      | miss      |
    /// |------------|----------|-----------|
    /// | Off        | FadingIn | Off       |
    /// | FadingIn   | On       | FadingOut |
    /// | On         | On       | FadingOut |
    /// | FadingOut  | FadingIn | Off       |
    pub fn next(self, draw: f32, probability: f32) -> Self {
        let hit = draw < probability;
        match (self, hit) {
            (EffectState::Off, true) => EffectState::FadingIn,
            (EffectState::Off, false) => EffectState::Off,
            (EffectState::FadingIn, true) => EffectState::On,
            (EffectState::FadingIn, false) => EffectState::FadingOut,
            (EffectState::On, true) => EffectState::On,
            (EffectState::On, false) => EffectState::FadingOut,
            (EffectState::FadingOut, true) => EffectState::FadingIn,
            (EffectState::FadingOut, false) => EffectState::Off,
        }
    }

    /// Output level at `progress` (`0..=1`) through the current period.
    pub fn level(self, progress: f32) -> f32 {
        match self {
            EffectState::Off => 0.0,
            EffectState::On => 1.0,
            EffectState::FadingIn => progress,
            EffectState::FadingOut => 1.0 - progress,
        }
    }
}

/// Errors returned while registering random fader channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RandomFaderError {
    /// Pool or effect capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for RandomFaderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RandomFaderError::CapacityExceeded => {
                write!(f, "random fader capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RandomFaderError {}

/// Output levels produced by [`RandomFader::levels`].
///
/// Pool levels come first, in registration order, followed by effect
/// channel levels.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomLevels<const N: usize, const E: usize> {
    pool: Vec<f32, N>,
    effects: Vec<f32, E>,
}

impl<const N: usize, const E: usize> RandomLevels<N, E> {
    /// Levels of the pool LEDs, already scaled by each LED's `max`.
    pub fn pool(&self) -> &[f32] {
        &self.pool
    }

    /// Levels of the effect channels, `0..=1`.
    pub fn effects(&self) -> &[f32] {
        &self.effects
    }

    /// Number of output channels.
    pub fn channel_count(&self) -> usize {
        self.pool.len() + self.effects.len()
    }

    /// Level at `index` in output order.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.iter().nth(index)
    }

    /// Iterates all levels in output order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.pool.iter().chain(self.effects.iter()).copied()
    }
}

struct EffectChannel<C> {
    led: Led<C>,
    probability: f32,
    state: EffectState,
}

/// Cross-fades between randomly chosen LEDs of a pool, one fade per period,
/// with independent on/off effect channels layered on top.
///
/// Fades run by output level, not by hue. At each rollover the LED faded
/// toward becomes the one faded from, a new target is drawn uniformly from the
/// other pool members, every effect channel re-rolls its [`EffectState`], and
/// the period base advances by exactly one period so polling latency does not
/// accumulate as drift.
///
/// A pool with a single LED holds it at full level; an empty pool leaves only
/// the effect channels.
///
/// # Type Parameters
/// * `C` - Channel identifier type
/// * `I` - Time instant type
/// * `R` - Random number generator
/// * `N` - Maximum pool size
/// * `E` - Maximum number of effect channels
pub struct RandomFader<C, I: TimeInstant, R: RngCore, const N: usize, const E: usize> {
    pool: Vec<Led<C>, N>,
    effects: Vec<EffectChannel<C>, E>,
    period: I::Duration,
    start: Option<I>,
    current: usize,
    target: usize,
    rng: R,
}

impl<C, I: TimeInstant, R: RngCore, const N: usize, const E: usize> RandomFader<C, I, R, N, E> {
    /// Creates an idle fader. Levels stay at zero until [`RandomFader::start_random`].
    pub fn new(period: I::Duration, rng: R) -> Self {
        Self {
            pool: Vec::new(),
            effects: Vec::new(),
            period,
            start: None,
            current: 0,
            target: 0,
            rng,
        }
    }

    /// Adds an LED to the fade pool.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The pool already holds `N` LEDs
    pub fn add_led(&mut self, led: Led<C>) -> Result<(), RandomFaderError> {
        self.pool
            .push(led)
            .map_err(|_| RandomFaderError::CapacityExceeded)
    }

    /// Adds an effect channel that activates with the given per-period
    /// probability, clamped into `[0, 1]`. New channels start [`EffectState::Off`].
    ///
    /// # Errors
    /// * `CapacityExceeded` - `E` effect channels are already registered
    pub fn add_effect_led(&mut self, led: Led<C>, probability: f32) -> Result<(), RandomFaderError> {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };

        self.effects
            .push(EffectChannel {
                led,
                probability,
                state: EffectState::Off,
            })
            .map_err(|_| RandomFaderError::CapacityExceeded)
    }

    /// Picks a random starting pair and starts timing at `now`.
    pub fn start_random(&mut self, period: I::Duration, now: I) {
        self.period = period;
        self.current = if self.pool.len() < 2 {
            0
        } else {
            self.rng.gen_range(0..self.pool.len())
        };
        self.target = self.draw_other(self.current);
        self.start = Some(now);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "random fader: started, {} -> {} of {}",
            self.current,
            self.target,
            self.pool.len()
        );
    }

    /// Levels at `now`, rolling over to a new fade once the period ends.
    ///
    /// At most one rollover happens per call; a caller that falls several
    /// periods behind catches up over subsequent calls.
    pub fn levels(&mut self, now: I) -> RandomLevels<N, E> {
        let mut levels = RandomLevels {
            pool: Vec::new(),
            effects: Vec::new(),
        };
        // Cannot fail: lengths never exceed N and E.
        let _ = levels.pool.resize(self.pool.len(), 0.0);
        let _ = levels.effects.resize(self.effects.len(), 0.0);

        let Some(start) = self.start else {
            return levels;
        };

        let period = self.period.as_micros();
        let mut elapsed = now.duration_since(start).as_micros();
        if elapsed > period {
            self.roll_over(start, now);
            elapsed -= period;
        }

        let progress = if period == 0 {
            1.0
        } else {
            (elapsed as f32 / period as f32).min(1.0)
        };

        if !self.pool.is_empty() {
            if self.current == self.target {
                levels.pool[self.current] = self.pool[self.current].max;
            } else {
                levels.pool[self.current] = self.pool[self.current].max * (1.0 - progress);
                levels.pool[self.target] = self.pool[self.target].max * progress;
            }
        }

        for (level, effect) in levels.effects.iter_mut().zip(self.effects.iter()) {
            *level = effect.state.level(progress);
        }

        levels
    }

    fn roll_over(&mut self, start: I, now: I) {
        self.current = self.target;
        self.target = self.draw_other(self.current);

        for effect in self.effects.iter_mut() {
            let draw: f32 = self.rng.r#gen();
            effect.state = effect.state.next(draw, effect.probability);
        }

        self.start = Some(start.checked_add(self.period).unwrap_or(now));

        #[cfg(feature = "defmt")]
        defmt::trace!("random fader: rollover, {} -> {}", self.current, self.target);
    }

    /// Uniformly picks a pool index other than `current`.
    ///
    /// Draws from the remaining `len - 1` members and skips over `current`,
    /// so it always terminates. Pools smaller than two have no other member
    /// and return `current` unchanged.
    fn draw_other(&mut self, current: usize) -> usize {
        let len = self.pool.len();
        if len < 2 {
            return current;
        }

        let others = len - 1;
        let pick = if others == 1 {
            0
        } else {
            self.rng.gen_range(0..others)
        };

        if pick >= current { pick + 1 } else { pick }
    }

    /// Channel identifiers in output order: pool, then effect channels.
    pub fn channels(&self) -> impl Iterator<Item = &C> + '_ {
        self.pool
            .iter()
            .map(|led| &led.channel)
            .chain(self.effects.iter().map(|effect| &effect.led.channel))
    }

    /// Indices of the pool LEDs currently faded from and toward.
    pub fn pair(&self) -> (usize, usize) {
        (self.current, self.target)
    }

    /// State of the effect channel at `index`.
    pub fn effect_state(&self, index: usize) -> Option<EffectState> {
        self.effects.get(index).map(|effect| effect.state)
    }

    /// Returns true once [`RandomFader::start_random`] has been called.
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }
}

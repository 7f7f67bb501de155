//! Hue-to-LED solver for arbitrary emitter sets.
//!
//! Provides [`Colorspace`], which holds the LEDs of a lamp sorted by their
//! angle around a white anchor in the (u*, v*) plane, and resolves an
//! [`HsiColor`] into one level per LED plus a white level.
//!
//! For a requested hue the solver picks the two angularly adjacent LEDs that
//! bracket it, intersects the hue ray from the white anchor with the chord
//! joining them, and splits `saturation * intensity` between the pair in
//! proportion to where the intersection falls along the chord. White carries
//! the remaining `intensity * (1 - saturation)`. Sweeping the hue therefore
//! cross-fades continuously from one LED to the next.

use core::f32::consts::PI;

use crate::color::HsiColor;
use crate::led::{Chromaticity, Led};
use heapless::Vec;

/// Minimum distance between an LED and the white anchor in either axis.
const COINCIDENT_EPSILON: f32 = 1.0e-6;

/// Below this normalized cross product the hue ray is treated as parallel to a chord.
const PARALLEL_EPSILON: f32 = 1.0e-6;

/// Errors returned while registering LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorspaceError {
    /// The LED sits on the white anchor, so it has no defined angle.
    CoincidesWithWhite,

    /// Another LED already occupies exactly this angle.
    DuplicateAngle,

    /// Colorspace capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for ColorspaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ColorspaceError::CoincidesWithWhite => {
                write!(f, "LED chromaticity coincides with the white anchor")
            }
            ColorspaceError::DuplicateAngle => {
                write!(f, "another LED already sits at the same angle around white")
            }
            ColorspaceError::CapacityExceeded => {
                write!(f, "colorspace capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ColorspaceError {}

/// Vector from one LED to its angular successor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Chord {
    du: f32,
    dv: f32,
}

impl Chord {
    fn between(from: Chromaticity, to: Chromaticity) -> Self {
        Self {
            du: to.u - from.u,
            dv: to.v - from.v,
        }
    }

    fn slope(&self) -> f32 {
        self.dv / self.du
    }

    fn length(&self) -> f32 {
        libm::hypotf(self.du, self.dv)
    }
}

/// Output levels produced by [`Colorspace::hue_to_levels`].
///
/// LED levels follow the colorspace's angle order; white comes last when
/// iterating. Values are not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Levels<const N: usize> {
    leds: Vec<f32, N>,
    white: f32,
}

impl<const N: usize> Levels<N> {
    /// Levels of the colored LEDs, in angle order.
    pub fn leds(&self) -> &[f32] {
        &self.leds
    }

    /// Level of the white channel.
    pub fn white(&self) -> f32 {
        self.white
    }

    /// Number of output channels, white included.
    pub fn channel_count(&self) -> usize {
        self.leds.len() + 1
    }

    /// Level at `index` in output order (white at `channel_count() - 1`).
    pub fn get(&self, index: usize) -> Option<f32> {
        match index.cmp(&self.leds.len()) {
            core::cmp::Ordering::Less => Some(self.leds[index]),
            core::cmp::Ordering::Equal => Some(self.white),
            core::cmp::Ordering::Greater => None,
        }
    }

    /// Iterates all levels in output order, white last.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.leds.iter().copied().chain(core::iter::once(self.white))
    }
}

/// A lamp's set of LEDs arranged around a white anchor.
///
/// Configure once with [`Colorspace::add_led`], then query with
/// [`Colorspace::hue_to_levels`]. The channel and scale-factor iterators are
/// index-aligned with the levels, which is what an output driver relies on.
///
/// # Type Parameters
/// * `C` - Channel identifier type
/// * `N` - Maximum number of colored LEDs (white excluded)
#[derive(Debug, Clone)]
pub struct Colorspace<C, const N: usize> {
    leds: Vec<Led<C>, N>,
    angles: Vec<f32, N>,
    chords: Vec<Chord, N>,
    white: Led<C>,
}

impl<C, const N: usize> Colorspace<C, N> {
    /// Creates an empty colorspace anchored on the given white LED.
    pub fn new(white: Led<C>) -> Self {
        Self {
            leds: Vec::new(),
            angles: Vec::new(),
            chords: Vec::new(),
            white,
        }
    }

    /// Registers a colored LED, keeping LEDs sorted by angle around white.
    ///
    /// # Errors
    /// * `CoincidesWithWhite` - The LED has the white anchor's chromaticity
    /// * `DuplicateAngle` - An LED with exactly the same angle exists
    /// * `CapacityExceeded` - `N` LEDs are already registered
    pub fn add_led(&mut self, led: Led<C>) -> Result<(), ColorspaceError> {
        if led
            .position
            .coincides_with(self.white.position, COINCIDENT_EPSILON)
        {
            return Err(ColorspaceError::CoincidesWithWhite);
        }

        if self.leds.is_full() {
            return Err(ColorspaceError::CapacityExceeded);
        }

        let angle = led.position.angle_from(self.white.position);
        let index = self
            .angles
            .iter()
            .position(|&existing| existing >= angle)
            .unwrap_or(self.angles.len());

        if self.angles.get(index) == Some(&angle) {
            return Err(ColorspaceError::DuplicateAngle);
        }

        self.angles
            .insert(index, angle)
            .map_err(|_| ColorspaceError::CapacityExceeded)?;
        self.leds
            .insert(index, led)
            .map_err(|_| ColorspaceError::CapacityExceeded)?;
        self.recompute_chords();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "colorspace: LED at {} deg inserted at index {} ({} total)",
            angle,
            index,
            self.leds.len()
        );

        Ok(())
    }

    // Configuration-time only, so a full pass per insertion is fine.
    fn recompute_chords(&mut self) {
        let count = self.leds.len();
        self.chords.clear();
        for i in 0..count {
            let from = self.leds[i].position;
            let to = self.leds[(i + 1) % count].position;
            // Cannot overflow: chords and LEDs share capacity N.
            let _ = self.chords.push(Chord::between(from, to));
        }
    }

    /// Converts a color into one level per LED followed by the white level.
    ///
    /// Exactly two LEDs are lit for a saturated color, their levels summing to
    /// `saturation * intensity`; white is always `intensity * (1 - saturation)`.
    ///
    /// Degenerate configurations resolve to a defined output instead of
    /// failing: with no colored LEDs only white is driven, a single LED gets the
    /// whole `saturation * intensity`, and a hue ray parallel to its bracketing
    /// chord snaps to the angularly nearer LED of the pair.
    pub fn hue_to_levels(&self, color: HsiColor) -> Levels<N> {
        let saturation = color.saturation();
        let intensity = color.intensity();
        let chroma = saturation * intensity;

        let mut levels = Levels {
            leds: Vec::new(),
            white: intensity * (1.0 - saturation),
        };
        // Cannot fail: the LED count never exceeds N.
        let _ = levels.leds.resize(self.leds.len(), 0.0);

        match self.leds.len() {
            0 => {}
            1 => levels.leds[0] = chroma,
            _ => {
                let hue = color.hue();
                let (first, second) = self.bracket(hue);
                let (first_weight, second_weight) = self.blend(first, second, hue);
                levels.leds[first] = chroma * first_weight;
                levels.leds[second] = chroma * second_weight;
            }
        }

        levels
    }

    /// Finds the angularly adjacent LED pair around `hue`. Needs at least two LEDs.
    fn bracket(&self, hue: f32) -> (usize, usize) {
        let last = self.angles.len() - 1;

        if hue < self.angles[0] || hue >= self.angles[last] {
            return (last, 0);
        }

        let upper = self
            .angles
            .iter()
            .position(|&angle| angle > hue)
            .unwrap_or(last);
        (upper - 1, upper)
    }

    /// Weights of `first` and `second` for the hue ray's crossing of their chord.
    fn blend(&self, first: usize, second: usize, hue: f32) -> (f32, f32) {
        let chord = self.chords[first];
        let radians = hue * PI / 180.0;
        let (dir_u, dir_v) = (libm::cosf(radians), libm::sinf(radians));

        // Chord parameter t of the crossing: W + s*d = A + t*chord.
        let denominator = chord.du * dir_v - chord.dv * dir_u;
        if libm::fabsf(denominator) <= PARALLEL_EPSILON * chord.length() {
            #[cfg(feature = "defmt")]
            defmt::trace!(
                "colorspace: hue {} parallel to chord {}-{}, snapping",
                hue,
                first,
                second
            );

            return if angular_distance(hue, self.angles[first])
                <= angular_distance(hue, self.angles[second])
            {
                (1.0, 0.0)
            } else {
                (0.0, 1.0)
            };
        }

        let from = self.leds[first].position;
        let offset_u = from.u - self.white.position.u;
        let offset_v = from.v - self.white.position.v;
        let t = (dir_u * offset_v - dir_v * offset_u) / denominator;

        (libm::fabsf(1.0 - t), libm::fabsf(t))
    }

    /// Angle of the LED at `index` (angle order), in degrees.
    pub fn angle(&self, index: usize) -> Option<f32> {
        self.angles.get(index).copied()
    }

    /// Slope dv*/du* of the chord from the LED at `index` to its angular successor.
    ///
    /// Infinite for a vertical chord; with a single LED the chord is degenerate
    /// and the slope is NaN.
    pub fn slope(&self, index: usize) -> Option<f32> {
        self.chords.get(index).map(Chord::slope)
    }

    /// Number of colored LEDs.
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    /// Returns true if no colored LED is registered.
    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    /// Colored LEDs in angle order.
    pub fn leds(&self) -> &[Led<C>] {
        &self.leds
    }

    /// The white anchor.
    pub fn white(&self) -> &Led<C> {
        &self.white
    }

    /// Channel identifiers in output order, white last.
    pub fn channels(&self) -> impl Iterator<Item = &C> + '_ {
        self.leds
            .iter()
            .map(|led| &led.channel)
            .chain(core::iter::once(&self.white.channel))
    }

    /// Per-channel scale factors in output order, white last.
    pub fn max_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.leds
            .iter()
            .map(|led| led.max)
            .chain(core::iter::once(self.white.max))
    }
}

/// Shortest distance between two angles on the circle, in degrees.
fn angular_distance(a: f32, b: f32) -> f32 {
    let difference = libm::fmodf(libm::fabsf(a - b), 360.0);
    if difference > 180.0 {
        360.0 - difference
    } else {
        difference
    }
}

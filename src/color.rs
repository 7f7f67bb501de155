//! Hue/saturation/intensity color value type.
//!
//! Hue is a circular angle in degrees, wrapped into `[0, 360)` on write
//! (negative inputs included). Saturation and intensity are ratios clamped
//! into `[0, 1]` on write.

use palette::Hsv;

/// An abstract HSI color, independent of the physical LEDs that render it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HsiColor {
    hue: f32,
    saturation: f32,
    intensity: f32,
}

impl HsiColor {
    /// All channels dark.
    pub const OFF: HsiColor = HsiColor {
        hue: 0.0,
        saturation: 0.0,
        intensity: 0.0,
    };

    /// Creates a color, wrapping hue and clamping saturation and intensity.
    pub fn new(hue: f32, saturation: f32, intensity: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: clamp_unit(saturation),
            intensity: clamp_unit(intensity),
        }
    }

    /// Sets hue in degrees, wrapped into `[0, 360)`.
    pub fn set_hue(&mut self, hue: f32) {
        self.hue = wrap_hue(hue);
    }

    /// Sets saturation, clamped into `[0, 1]`.
    pub fn set_saturation(&mut self, saturation: f32) {
        self.saturation = clamp_unit(saturation);
    }

    /// Sets intensity, clamped into `[0, 1]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = clamp_unit(intensity);
    }

    /// Sets all three components at once.
    pub fn set_hsi(&mut self, hue: f32, saturation: f32, intensity: f32) {
        self.set_hue(hue);
        self.set_saturation(saturation);
        self.set_intensity(intensity);
    }

    /// Hue in degrees, `[0, 360)`.
    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation, `[0, 1]`.
    #[inline]
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Intensity, `[0, 1]`.
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Returns `[hue, saturation, intensity]`.
    pub fn to_array(&self) -> [f32; 3] {
        [self.hue, self.saturation, self.intensity]
    }
}

/// Treats HSV value as HSI intensity. Hue and saturation carry over directly.
impl From<Hsv> for HsiColor {
    fn from(hsv: Hsv) -> Self {
        HsiColor::new(
            hsv.hue.into_positive_degrees(),
            hsv.saturation,
            hsv.value,
        )
    }
}

/// Wraps an angle in degrees into `[0, 360)`. Non-finite input maps to 0.
pub(crate) fn wrap_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }

    let mut wrapped = libm::fmodf(hue, 360.0);
    if wrapped < 0.0 {
        wrapped += 360.0;
    }

    // A tiny negative remainder rounds up to exactly 360 in f32.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

//! LED descriptors and their position in the CIE 1976 (u*, v*) plane.

use core::f32::consts::PI;

use palette::white_point::D65;
use palette::{FromColor, Luv, Srgb, Yxy};

/// A point in the perceptually uniform (u*, v*) chromaticity plane.
///
/// Only directions and straight-line interpolation between points matter to
/// the solver, so lightness is not stored. Coordinates produced by
/// [`Chromaticity::from_srgb`] and [`Chromaticity::from_xy`] share the D65
/// reference white and place a D65 white LED at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chromaticity {
    /// u* coordinate.
    pub u: f32,
    /// v* coordinate.
    pub v: f32,
}

impl Chromaticity {
    /// Creates a chromaticity from raw (u*, v*) coordinates.
    #[inline]
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Takes the (u*, v*) coordinates of a CIE L*u*v* color.
    pub fn from_luv(luv: Luv) -> Self {
        Self::new(luv.u, luv.v)
    }

    /// Places an LED at the nominal chromaticity of an sRGB color.
    pub fn from_srgb(color: Srgb) -> Self {
        Self::from_luv(Luv::from_color(color))
    }

    /// Places an LED from CIE 1931 xy coordinates, as given on LED datasheets.
    ///
    /// Converted at unit luminance, so all LEDs share L* = 100.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_luv(Luv::from_color(Yxy::<D65, f32>::new(x, y, 1.0)))
    }

    /// Normalized polar angle in degrees, `[0, 360)`, of this point seen from `origin`.
    pub fn angle_from(&self, origin: Chromaticity) -> f32 {
        let degrees = libm::atan2f(self.v - origin.v, self.u - origin.u) * 180.0 / PI;
        crate::color::wrap_hue(degrees)
    }

    /// Returns true if both coordinates lie within `epsilon` of `other`.
    pub fn coincides_with(&self, other: Chromaticity, epsilon: f32) -> bool {
        libm::fabsf(self.u - other.u) <= epsilon && libm::fabsf(self.v - other.v) <= epsilon
    }
}

/// One physical light-emitting channel.
///
/// # Type Parameters
/// * `C` - Opaque channel identifier handed back to the output driver (a pin
///   number, a PWM slice, a DMX address)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Led<C> {
    /// Chromaticity of the emitter.
    pub position: Chromaticity,
    /// Scale factor applied to this channel's level before writing, used to
    /// balance emitters of different brightness.
    pub max: f32,
    /// Output channel identifier.
    pub channel: C,
}

impl<C> Led<C> {
    /// Creates an LED descriptor.
    #[inline]
    pub fn new(position: Chromaticity, max: f32, channel: C) -> Self {
        Self {
            position,
            max,
            channel,
        }
    }
}

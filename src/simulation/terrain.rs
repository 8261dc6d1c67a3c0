//! Ground height functions.
//!
//! The physics engine never owns the terrain: it is handed a [`Terrain`]
//! every time it needs to resolve ground contact. Any `Fn(f32) -> f32`
//! closure is a valid terrain.

use serde::{Deserialize, Serialize};

/// A pure function from horizontal position to ground height.
///
/// Heights use the same downward-positive `y` axis as particle positions:
/// a particle is underground when `pos.y + radius > height(pos.x)`.
pub trait Terrain: Send + Sync {
    /// Returns the ground height at `x`.
    fn height(&self, x: f32) -> f32;
}

impl<F> Terrain for F
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    fn height(&self, x: f32) -> f32 {
        self(x)
    }
}

/// Perfectly flat ground at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatGround {
    /// Ground height.
    pub level: f32,
}

impl Terrain for FlatGround {
    fn height(&self, _x: f32) -> f32 {
        self.level
    }
}

/// Two composed sinusoids with a flat launch pad around the origin.
///
/// The hills fade in linearly over `ramp_width` past the flat region so
/// the surface stays continuous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingHills {
    /// Height of the flat region and mean height of the hills.
    pub base_level: f32,
    /// Half-width of the flat region centered on `x = 0`.
    pub flat_radius: f32,
    /// Distance over which the hills ramp up to full amplitude.
    pub ramp_width: f32,
    /// Amplitude of the long wave.
    pub amplitude_long: f32,
    /// Wavelength of the long wave.
    pub wavelength_long: f32,
    /// Amplitude of the short wave.
    pub amplitude_short: f32,
    /// Wavelength of the short wave.
    pub wavelength_short: f32,
}

impl Default for RollingHills {
    fn default() -> Self {
        Self {
            base_level: 400.0,
            flat_radius: 200.0,
            ramp_width: 300.0,
            amplitude_long: 40.0,
            wavelength_long: 900.0,
            amplitude_short: 12.0,
            wavelength_short: 230.0,
        }
    }
}

impl Terrain for RollingHills {
    fn height(&self, x: f32) -> f32 {
        let beyond = x.abs() - self.flat_radius;
        if beyond <= 0.0 {
            return self.base_level;
        }

        let blend = if self.ramp_width > 0.0 {
            (beyond / self.ramp_width).min(1.0)
        } else {
            1.0
        };

        let tau = std::f32::consts::TAU;
        let long = (beyond * tau / self.wavelength_long).sin() * self.amplitude_long;
        let short = (beyond * tau / self.wavelength_short).sin() * self.amplitude_short;

        // Hills rise toward smaller y.
        self.base_level - blend * (long + short)
    }
}

//! Analytic field synthesis above a perfect electric conductor.
//!
//! A TE-polarized plane wave hitting a PEC reflects with coefficient −1. The
//! superposition factorizes into a standing pattern along the surface normal
//! and a traveling pattern along the surface. This module evaluates that
//! field, or either of its two constituent waves, at a point in the
//! cross-section for a given frame.
//!
//! Coordinates: `x` runs along the conductor and `z` is the distance from it,
//! with `z = 0` on the boundary. All outputs are clamped to `[-1, 1]`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config;
use crate::wave::WaveParameters;

#[cfg(test)]
mod tests {

    use super::*;
    use std::f32::consts::PI;

    const MODES: [DisplayMode; 3] = [
        DisplayMode::Total,
        DisplayMode::Incident,
        DisplayMode::Reflected,
    ];

    #[test]
    fn output_is_clamped() {
        for angle in [0.0, 12.5, 45.0, 71.0, 89.0] {
            let params = WaveParameters::new(angle, 0.13);
            for mode in MODES {
                for t in (0..400).step_by(7) {
                    for x in (0..420).step_by(11) {
                        for z in (0..400).step_by(13) {
                            let v = sample(x as f32, z as f32, t, mode, &params);
                            assert!((-1.0..=1.0).contains(&v), "{} at {},{}", v, x, z);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn total_saturates_at_antinodes() {
        // sin(kz z) = 1 and sin(ωt - kx x) = 1 give 1.1 before clamping
        let params = WaveParameters::new(0.0, 0.05);
        let wn = params.wavenumbers();
        let z = PI / 2.0 / wn.kz;
        let t = (PI / 2.0 / params.omega()).round() as u64;
        assert_eq!(sample(0.0, z, t, DisplayMode::Total, &params), 1.0);
        assert_eq!(sample(0.0, z, 3 * t, DisplayMode::Total, &params), -1.0);
    }

    #[test]
    fn total_vanishes_on_boundary() {
        let params = WaveParameters::new(37.0, 0.11);
        for t in 0..200 {
            for x in 0..50 {
                let v = sample(x as f32 * 8.4, 0.0, t, DisplayMode::Total, &params);
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn total_nodes_above_boundary() {
        let params = WaveParameters::new(20.0, 0.05);
        let wn = params.wavenumbers();
        for n in 1..4 {
            let z = n as f32 * PI / wn.kz;
            for t in 0..120 {
                let v = sample(123.0, z, t, DisplayMode::Total, &params);
                assert!(v.abs() < 1e-4, "node {} at t={}: {}", n, t, v);
            }
        }
    }

    #[test]
    fn total_is_not_the_sum_of_components() {
        let params = WaveParameters::new(45.0, 0.05);
        let (x, z, t) = (10.0, 30.0, 17);
        let total = sample(x, z, t, DisplayMode::Total, &params);
        let inc = sample(x, z, t, DisplayMode::Incident, &params);
        let refl = sample(x, z, t, DisplayMode::Reflected, &params);
        assert!((total - (inc + refl)).abs() > 1e-3);
    }

    #[test]
    fn components_are_unit_cosines() {
        let params = WaveParameters::new(30.0, 0.05);
        let wn = params.wavenumbers();
        let (x, z, t) = (41.0, 77.0, 9);
        let arg = params.omega() * t as f32 - wn.kx * x;
        let inc = sample(x, z, t, DisplayMode::Incident, &params);
        let refl = sample(x, z, t, DisplayMode::Reflected, &params);
        assert!((inc - (arg - wn.kz * z).cos()).abs() < 1e-5);
        assert!((refl + (arg + wn.kz * z).cos()).abs() < 1e-5);
    }

    #[test]
    fn mode_names() {
        assert_eq!(DisplayMode::Total.to_string(), "total");
        assert_eq!(DisplayMode::Reflected.to_string(), "reflected");
        assert_eq!(DisplayMode::default(), DisplayMode::Total);
    }
}

/// Which analytic expression is evaluated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Closed-form superposition: standing along z times traveling along x.
    #[default]
    Total,
    /// The incident wave alone.
    Incident,
    /// The reflected wave alone, sign-inverted by the conductor.
    Reflected,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Total => "total",
            DisplayMode::Incident => "incident",
            DisplayMode::Reflected => "reflected",
        };
        write!(f, "{}", name)
    }
}

/// Evaluates the field at `(x, z)` on frame `t`.
///
/// Convenience wrapper for single samples. Renderers covering a whole domain
/// should build one [`FieldSampler`] per frame and dispatch on the mode once.
pub fn sample(x: f32, z: f32, t: u64, mode: DisplayMode, params: &WaveParameters) -> f32 {
    FieldSampler::new(params, t, mode).sample(x, z)
}

/// Per-frame snapshot of everything the field expressions need.
///
/// **Context**: The raster pass evaluates the field at every pixel, every
/// frame. Deriving wavenumbers and the temporal phase once per frame keeps
/// the inner loop down to a couple of trigonometric calls.
///
/// **How it Works**: Captures `kx`, `kz` and the wrapped phase `ω t` for one
/// frame. The three expressions are exposed as separate methods so callers
/// can pick one outside their loops; [`FieldSampler::sample`] matches on the
/// stored mode for one-off evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSampler {
    pub mode: DisplayMode,
    pub kx: f32,
    pub kz: f32,
    pub phase: f32, // ω t reduced to [0, 2π)
}

impl FieldSampler {
    pub fn new(params: &WaveParameters, t: u64, mode: DisplayMode) -> Self {
        let wn = params.wavenumbers();
        Self {
            mode,
            kx: wn.kx,
            kz: wn.kz,
            phase: params.phase(t),
        }
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        match self.mode {
            DisplayMode::Total => self.total(x, z),
            DisplayMode::Incident => self.incident(x, z),
            DisplayMode::Reflected => self.reflected(x, z),
        }
    }

    /// `1.1 sin(kz z) sin(ωt − kx x)`, clamped.
    #[inline]
    pub fn total(&self, x: f32, z: f32) -> f32 {
        self.total_with_standing((self.kz * z).sin(), x)
    }

    /// Total field with the standing factor `sin(kz z)` supplied by the caller,
    /// so a raster row can reuse it across all columns.
    #[inline]
    pub fn total_with_standing(&self, standing: f32, x: f32) -> f32 {
        let value = config::TOTAL_GAIN * standing * (self.phase - self.kx * x).sin();
        value.clamp(-1.0, 1.0)
    }

    /// `cos(ωt − kx x − kz z)`, clamped.
    #[inline]
    pub fn incident(&self, x: f32, z: f32) -> f32 {
        (self.phase - self.kx * x - self.kz * z).cos().clamp(-1.0, 1.0)
    }

    /// `−cos(ωt − kx x + kz z)`, clamped.
    #[inline]
    pub fn reflected(&self, x: f32, z: f32) -> f32 {
        (-(self.phase - self.kx * x + self.kz * z).cos()).clamp(-1.0, 1.0)
    }
}

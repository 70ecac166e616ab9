//! Plane wave parameters and wavenumber decomposition.
//!
//! This module holds the small set of physical parameters that define the
//! incident plane wave and derives the quantities every renderer needs from
//! them. The incidence angle splits the free-space wavenumber into a
//! tangential part, which travels along the conductor, and a normal part,
//! which forms a standing wave above it.
//!
//! The parameter system provides:
//! - Wavenumber derivation `k`, `kx = k sin θ`, `kz = k cos θ`
//! - Angular frequency from the speed factor
//! - Wrapped temporal phase for integer frame times
//! - A display readout with the tangential phase velocity

use std::f64::consts::TAU;

use nalgebra::Vector2;

use crate::config;

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn decomposition_preserves_magnitude() {
        for angle in 0..=89 {
            let wn = derive_wavenumbers(angle as f32, config::DEFAULT_WAVELENGTH);
            let sum = wn.kx * wn.kx + wn.kz * wn.kz;
            assert!((sum - wn.k * wn.k).abs() < 1e-6, "angle {}: {}", angle, sum);
        }
    }

    #[test]
    fn normal_incidence() {
        let wn = derive_wavenumbers(0.0, 80.0);
        assert_eq!(wn.kx, 0.0);
        assert!((wn.kz - wn.k).abs() < f32::EPSILON);
    }

    #[test]
    fn grazing_incidence() {
        let wn = derive_wavenumbers(89.0, 80.0);
        assert!((wn.kx - wn.k).abs() < 1e-3 * wn.k);
        assert!(wn.kz < 0.02 * wn.k);
    }

    #[test]
    fn oblique_45() {
        let wn = derive_wavenumbers(45.0, 80.0);
        assert!((wn.kx - 0.0555).abs() < 1e-4, "kx: {}", wn.kx);
        assert!((wn.kx - wn.kz).abs() < 1e-6);
    }

    #[test]
    fn omega_is_twice_speed() {
        let params = WaveParameters::new(30.0, 0.07);
        assert!((params.omega() - 0.14).abs() < 1e-7);
    }

    #[test]
    fn phase_wraps_consistently() {
        let params = WaveParameters::new(45.0, 0.05);
        for t in [0_u64, 1, 63, 10_000, 1_234_567] {
            let exact = params.omega() as f64 * t as f64;
            let wrapped = params.phase(t) as f64;
            assert!((wrapped.sin() - exact.sin()).abs() < 1e-4, "t = {}", t);
            assert!((0.0..TAU).contains(&wrapped));
        }
    }

    #[test]
    fn phase_velocity_readout() {
        let readout = Readout::from(&WaveParameters::new(30.0, 0.05));
        assert!((readout.phase_velocity - 2.0).abs() < 1e-4);
        assert!((readout.kx_ratio - 0.5).abs() < 1e-6);

        // normal incidence is clamped at the display site only
        let readout = Readout::from(&WaveParameters::new(0.0, 0.05));
        assert!(readout.phase_velocity.is_finite());
        assert!(readout.phase_velocity > 500.0);
        assert_eq!(readout.kx_ratio, 0.0);
    }

    #[test]
    fn propagation_vectors() {
        let wn = derive_wavenumbers(30.0, 80.0);
        let inc = wn.incident();
        let refl = wn.reflected();
        assert!((inc.norm() - wn.k).abs() < 1e-6);
        assert_eq!(inc.x, refl.x);
        assert_eq!(inc.y, -refl.y);
    }
}

/// Wavenumbers of the incident wave, in radians per length unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wavenumbers {
    pub k: f32,  // free-space wavenumber
    pub kx: f32, // tangential (traveling) component
    pub kz: f32, // normal (standing) component
}

impl Wavenumbers {
    /// Wave vector of the incident wave in (x, z) coordinates, heading into the conductor.
    pub fn incident(&self) -> Vector2<f32> {
        Vector2::new(self.kx, -self.kz)
    }

    /// Wave vector of the reflected wave in (x, z) coordinates, heading away from the conductor.
    pub fn reflected(&self) -> Vector2<f32> {
        Vector2::new(self.kx, self.kz)
    }
}

/// Splits the free-space wavenumber by the incidence angle.
///
/// The angle is measured from the surface normal and is expected to lie in
/// `[0, 89]` degrees. No clamping happens here.
pub fn derive_wavenumbers(angle_deg: f32, wavelength: f32) -> Wavenumbers {
    let theta = angle_deg.to_radians();
    let k = std::f32::consts::TAU / wavelength;
    Wavenumbers {
        k,
        kx: k * theta.sin(),
        kz: k * theta.cos(),
    }
}

/// Physical parameters of the incident plane wave.
///
/// **Context**: The input surface owns these values and may change them
/// between frames. Renderers re-derive the wavenumbers from them every frame
/// rather than caching anything across parameter changes.
///
/// **How it Works**: Stores the incidence angle, the wavelength and the speed
/// factor. Wavenumbers and the angular frequency `ω = 2 · speed` are computed
/// on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    pub angle_deg: f32,
    pub wavelength: f32,
    pub speed: f32,
}

impl WaveParameters {
    /// Creates parameters at the reference wavelength.
    pub fn new(angle_deg: f32, speed: f32) -> Self {
        Self {
            angle_deg,
            wavelength: config::DEFAULT_WAVELENGTH,
            speed,
        }
    }

    pub fn wavenumbers(&self) -> Wavenumbers {
        derive_wavenumbers(self.angle_deg, self.wavelength)
    }

    /// Angular frequency in radians per frame.
    pub fn omega(&self) -> f32 {
        2.0 * self.speed
    }

    /// Temporal phase `ω t` at frame `t`, reduced to `[0, 2π)`.
    ///
    /// The product is formed in double precision so that long-running
    /// animations keep full phase resolution in the single precision pixel
    /// loop.
    pub fn phase(&self, t: u64) -> f32 {
        let phase = (self.omega() as f64 * t as f64).rem_euclid(TAU);
        phase as f32
    }
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self::new(config::DEFAULT_ANGLE, config::DEFAULT_SPEED)
    }
}

/// Derived quantities shown next to the visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub angle_deg: f32,
    pub phase_velocity: f32, // tangential phase velocity in units of c
    pub kx_ratio: f32,       // kx / k
    pub kz_ratio: f32,       // kz / k
}

impl From<&WaveParameters> for Readout {
    fn from(params: &WaveParameters) -> Self {
        let theta = params.angle_deg.to_radians();
        // 1 / sin(θ) diverges at normal incidence
        let clamped = params
            .angle_deg
            .max(config::PHASE_VELOCITY_MIN_ANGLE)
            .to_radians();
        Self {
            angle_deg: params.angle_deg,
            phase_velocity: 1.0 / clamped.sin(),
            kx_ratio: theta.sin(),
            kz_ratio: theta.cos(),
        }
    }
}

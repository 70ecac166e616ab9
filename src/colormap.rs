//! Diverging color scale for signed field values.

use image::Rgb;

use crate::config;


/// Three anchor colors of the diverging scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub positive: Rgb<u8>,
    pub negative: Rgb<u8>,
    pub zero: Rgb<u8>,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            positive: Rgb(config::COLOR_POSITIVE),
            negative: Rgb(config::COLOR_NEGATIVE),
            zero: Rgb(config::COLOR_ZERO),
        }
    }
}

impl ColorScale {
    /// Maps a value in `[-1, 1]` to a color by interpolating from the neutral
    /// anchor towards the positive or negative anchor.
    pub fn colorize(&self, value: f32) -> Rgb<u8> {
        colorize(value, self)
    }
}

/// Two-sided linear interpolation from `scale.zero`.
///
/// Inputs are expected to be pre-clamped; channels are rounded to the nearest
/// integer, so both ends of each branch reproduce their anchors exactly.
pub fn colorize(value: f32, scale: &ColorScale) -> Rgb<u8> {
    let (target, weight) = if value >= 0.0 {
        (scale.positive, value)
    } else {
        (scale.negative, -value)
    };
    let mut out = scale.zero;
    for (channel, (zero, end)) in out.0.iter_mut().zip(scale.zero.0.iter().zip(target.0)) {
        let zero = *zero as f32;
        *channel = (zero + (end as f32 - zero) * weight).round() as u8;
    }
    out
}

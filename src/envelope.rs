//! Standing wave envelope panel.
//!
//! Along the surface normal the total field only oscillates in place, with a
//! fixed amplitude profile `|sin(kz z)|`. The panel to the right of the field
//! raster shows that profile as two mirrored curves with the region between
//! them shaded. The individual incident and reflected waves have a constant
//! envelope, so for those modes the panel only carries a placeholder caption.

use image::Rgb;
use ndarray::Array1;
use plotters::element::DashedPathElement;
use plotters::prelude::*;

use crate::canvas::rgb;
use crate::config;
use crate::layout::Layout;
use crate::overlay::{Anchor, Frame, Label};
use crate::sampler::DisplayMode;
use crate::wave::WaveParameters;


/// Time-independent standing envelope `|sin(kz z)|`.
pub fn envelope(z: f32, params: &WaveParameters) -> f32 {
    (params.wavenumbers().kz * z).sin().abs()
}

/// Draws the envelope panel into the right-hand strip of the main surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePlotter {
    origin_x: u32,
    width: u32,
    height: u32,
}

impl EnvelopePlotter {
    pub fn new(layout: &Layout) -> Self {
        Self {
            origin_x: layout.simulation_width,
            width: layout.envelope_width,
            height: layout.canvas_height,
        }
    }

    fn center_x(&self) -> f32 {
        self.origin_x as f32 + self.width as f32 / 2.0
    }

    /// Envelope value for every row `y` in `0..=height`, top to bottom.
    pub fn profile(&self, params: &WaveParameters) -> Array1<f32> {
        let height = self.height as f32;
        Array1::linspace(0.0, height, self.height as usize + 1)
            .mapv(|y| envelope(height - y, params))
    }

    pub fn draw(&self, frame: &mut Frame, params: &WaveParameters, mode: DisplayMode) {
        let left = self.origin_x as i32;
        let right = (self.origin_x + self.width) as i32;
        let height = self.height as i32;
        let center = self.center_x();
        let column = center.round() as i32;

        frame.buffer.draw(|area| {
            area.draw(&Rectangle::new(
                [(left, 0), (right, height)],
                rgb(config::PANEL_BACKGROUND).filled(),
            ))?;
            area.draw(&PathElement::new(
                vec![(left, 0), (left, height)],
                rgb(config::PANEL_BORDER),
            ))?;
            area.draw(&DashedPathElement::new(
                vec![(column, 0), (column, height)],
                4,
                4,
                rgb(config::PANEL_CENTERLINE),
            ))?;
            Ok(())
        });

        if mode != DisplayMode::Total {
            frame.label(
                Label::new("Uniform Amp", center, 20.0, 10.0, Rgb(config::PANEL_CENTERLINE))
                    .anchored(Anchor::Middle),
            );
            return;
        }

        let half_width = self.width as f32 / 2.0 - config::ENVELOPE_MARGIN;
        let offsets = self.profile(params).mapv(|e| e * half_width);
        let side = |sign: f32| -> Vec<(i32, i32)> {
            offsets
                .iter()
                .enumerate()
                .map(|(y, offset)| ((center + sign * offset).round() as i32, y as i32))
                .collect()
        };
        let (right_curve, left_curve) = (side(1.0), side(-1.0));
        let color = rgb(config::ENVELOPE_CURVE);

        frame.buffer.draw(|area| {
            // down the right curve and back up the left one
            let outline: Vec<(i32, i32)> = right_curve
                .iter()
                .chain(left_curve.iter().rev())
                .copied()
                .collect();
            area.draw(&Polygon::new(
                outline,
                color.mix(config::ENVELOPE_FILL_ALPHA).filled(),
            ))?;
            for curve in [&right_curve, &left_curve] {
                area.draw(&PathElement::new(curve.clone(), color.stroke_width(2)))?;
            }
            Ok(())
        });

        frame.label(
            Label::new("|E(z)|", center, 20.0, 10.0, Rgb(config::ENVELOPE_CURVE))
                .anchored(Anchor::Middle),
        );
    }
}

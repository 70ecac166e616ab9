//! One-dimensional projections of the total field.
//!
//! The closed-form total field `sin(kz z) · sin(ωt − kx x)` separates into a
//! standing factor along the surface normal and a traveling factor along the
//! surface. Each factor gets its own plot:
//!
//! - the standing view, to the left of the raster, oscillates in place and
//!   marks the stationary nodes;
//! - the traveling view, below the raster, shifts along `x` at the phase
//!   velocity and has no nodes.
//!
//! Both views always show the total decomposition, whatever the display mode
//! of the main raster.

use image::Rgb;
use ndarray::Array1;
use plotters::element::DashedPathElement;
use plotters::prelude::*;

use crate::canvas::rgb;
use crate::config;
use crate::layout::Layout;
use crate::overlay::{Anchor, Frame, Label};
use crate::wave::WaveParameters;


/// Renders the standing and traveling side plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSectionPlotter {
    layout: Layout,
}

impl CrossSectionPlotter {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// `sin(kz z) sin(ωt)` for rows `y` in `0..=height`, top to bottom.
    pub fn standing_profile(&self, params: &WaveParameters, t: u64) -> Array1<f32> {
        let kz = params.wavenumbers().kz;
        let temporal = params.phase(t).sin();
        self.rows().mapv(|z| (kz * z).sin() * temporal)
    }

    /// `sin(ωt − kx x)` for columns `x` in `0..width`.
    pub fn traveling_profile(&self, params: &WaveParameters, t: u64) -> Array1<f32> {
        let kx = params.wavenumbers().kx;
        let phase = params.phase(t);
        let width = self.layout.simulation_width as usize;
        Array1::from_iter((0..width).map(|x| (phase - kx * x as f32).sin()))
    }

    /// Rows where the standing envelope falls below the node threshold.
    pub fn node_rows(&self, params: &WaveParameters) -> Vec<u32> {
        let kz = params.wavenumbers().kz;
        self.rows()
            .iter()
            .enumerate()
            .filter(|(_, z)| (kz * *z).sin().abs() < config::NODE_THRESHOLD)
            .map(|(y, _)| y as u32)
            .collect()
    }

    /// Distance from the conductor for each row `y` in `0..=height`.
    fn rows(&self) -> Array1<f32> {
        let height = self.layout.canvas_height as f32;
        Array1::linspace(0.0, height, self.layout.canvas_height as usize + 1).mapv(|y| height - y)
    }

    /// Vertical plot along the surface normal.
    pub fn render_standing(&self, params: &WaveParameters, t: u64) -> Frame {
        let (width, height) = self.layout.standing_size();
        let mut frame = Frame::new(width, height, Rgb(config::PANEL_BACKGROUND));
        let mid = width as f32 / 2.0;
        let axis = mid.round() as i32;
        let amplitude = config::PLOT_AMPLITUDE;
        let kz = params.wavenumbers().kz;

        let guide = |sign: f32| -> Vec<(i32, i32)> {
            self.rows()
                .iter()
                .enumerate()
                .map(|(y, z)| {
                    let x = mid + sign * (kz * z).sin().abs() * amplitude;
                    (x.round() as i32, y as i32)
                })
                .collect()
        };
        let wave: Vec<(i32, i32)> = self
            .standing_profile(params, t)
            .iter()
            .enumerate()
            .map(|(y, v)| ((mid + v * amplitude).round() as i32, y as i32))
            .collect();
        let nodes = self.node_rows(params);

        frame.buffer.draw(|area| {
            area.draw(&PathElement::new(
                vec![(axis, 0), (axis, height as i32)],
                rgb(config::PLOT_AXIS),
            ))?;
            for sign in [1.0, -1.0] {
                area.draw(&DashedPathElement::new(
                    guide(sign),
                    2,
                    4,
                    rgb(config::PANEL_BORDER),
                ))?;
            }
            area.draw(&PathElement::new(
                wave,
                rgb(config::COLOR_POSITIVE).stroke_width(2),
            ))?;
            for y in nodes {
                area.draw(&Circle::new(
                    (axis, y as i32),
                    2,
                    rgb(config::NODE_MARKER).filled(),
                ))?;
            }
            Ok(())
        });

        let label = Rgb(config::PLOT_LABEL);
        frame.label(
            Label::new("Standing wave", 10.0, height as f32 / 2.0, 10.0, label)
                .anchored(Anchor::Middle)
                .vertical(),
        );
        frame.label(Label::new("z", mid - 10.0, 10.0, 10.0, label).anchored(Anchor::Middle));
        frame
    }

    /// Horizontal plot along the surface.
    pub fn render_traveling(&self, params: &WaveParameters, t: u64) -> Frame {
        let (width, height) = self.layout.traveling_size();
        let mut frame = Frame::new(width, height, Rgb(config::PANEL_BACKGROUND));
        let mid = height as f32 / 2.0;
        let axis = mid.round() as i32;

        let wave: Vec<(i32, i32)> = self
            .traveling_profile(params, t)
            .iter()
            .enumerate()
            .map(|(x, v)| (x as i32, (mid - v * config::PLOT_AMPLITUDE).round() as i32))
            .collect();

        frame.buffer.draw(|area| {
            area.draw(&PathElement::new(
                vec![(0, axis), (width as i32, axis)],
                rgb(config::PLOT_AXIS),
            ))?;
            area.draw(&PathElement::new(
                wave,
                rgb(config::COLOR_NEGATIVE).stroke_width(2),
            ))?;
            Ok(())
        });

        let label = Rgb(config::PLOT_LABEL);
        frame.label(Label::new("Traveling wave", 5.0, height as f32 - 5.0, 10.0, label));
        frame.label(
            Label::new("x →", width as f32 - 5.0, mid - 5.0, 10.0, label).anchored(Anchor::End),
        );
        frame
    }
}

//! Main surface: field raster, envelope panel and overlays.
//!
//! The raster covers the simulation region pixel by pixel. Row `y` is
//! counted from the top of the canvas and maps to the distance
//! `z = height − y` from the conductor, which lies along the bottom edge.
//! Column `x` maps directly to the tangential coordinate.
//!
//! On top of the field the rasterizer draws the envelope panel, the strip
//! marking the conductor, a small coordinate indicator and an arrow showing
//! the propagation direction for the current display mode.

use anyhow::Result;
use image::Rgb;
use nalgebra::Vector2;
use plotters::prelude::*;
use std::f32::consts::FRAC_PI_6;

use crate::canvas::{rgb, DrawingSurface};
use crate::colormap::ColorScale;
use crate::config;
use crate::envelope::EnvelopePlotter;
use crate::layout::Layout;
use crate::overlay::{Anchor, Frame, Label};
use crate::sampler::{DisplayMode, FieldSampler};
use crate::wave::WaveParameters;


/// Length of the propagation arrows in pixels.
const ARROW_LENGTH: f32 = 60.0;

/// Renders the main surface for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    layout: Layout,
    scale: ColorScale,
    envelope: EnvelopePlotter,
}

impl Rasterizer {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            scale: ColorScale::default(),
            envelope: EnvelopePlotter::new(&layout),
        }
    }

    /// Renders the full main surface: field, envelope panel and overlays.
    pub fn render(&self, params: &WaveParameters, t: u64, mode: DisplayMode) -> Frame {
        let mut frame = self.paint(params, t, mode);
        self.envelope.draw(&mut frame, params, mode);
        self.draw_boundary(&mut frame);
        self.draw_indicator(&mut frame);
        self.draw_arrow(&mut frame, params, mode);
        frame
    }

    /// Fresh surface with only the field raster painted.
    pub fn paint(&self, params: &WaveParameters, t: u64, mode: DisplayMode) -> Frame {
        let (width, height) = self.layout.main_size();
        let mut frame = Frame::new(width, height, Rgb(config::COLOR_ZERO));
        let sampler = FieldSampler::new(params, t, mode);

        // one dispatch per frame, the pixel loops below are monomorphized per mode
        match mode {
            DisplayMode::Total => self.fill_rows(
                &mut frame,
                |z| (sampler.kz * z).sin(),
                |standing, x, _| sampler.total_with_standing(standing, x),
            ),
            DisplayMode::Incident => {
                self.fill_rows(&mut frame, |_| 0.0, |_, x, z| sampler.incident(x, z))
            }
            DisplayMode::Reflected => {
                self.fill_rows(&mut frame, |_| 0.0, |_, x, z| sampler.reflected(x, z))
            }
        }
        frame
    }

    /// Walks the simulation region row by row. `row` is evaluated once per
    /// row and handed to `field` for every column.
    fn fill_rows<R, F>(&self, frame: &mut Frame, row: R, field: F)
    where
        R: Fn(f32) -> f32,
        F: Fn(f32, f32, f32) -> f32,
    {
        let height = self.layout.canvas_height;
        for y in 0..height {
            let z = (height - y) as f32;
            let shared = row(z);
            for x in 0..self.layout.simulation_width {
                let value = field(shared, x as f32, z);
                frame.buffer.set(x, y, self.scale.colorize(value));
            }
        }
    }

    fn draw_boundary(&self, frame: &mut Frame) {
        let height = self.layout.canvas_height;
        let top = (height - config::PEC_STRIP_HEIGHT.min(height)) as i32;
        let width = self.layout.canvas_width() as i32;
        frame.buffer.draw(|area| {
            area.draw(&Rectangle::new(
                [(0, top), (width, height as i32)],
                rgb(config::PEC_STRIP).filled(),
            ))?;
            Ok(())
        });
        frame.label(Label::new(
            "Perfect conductor (PEC) z=0",
            10.0,
            height as f32 - 2.0,
            12.0,
            Rgb([255, 255, 255]),
        ));
    }

    /// Small x/z axes in the lower-left corner, just above the conductor strip.
    fn draw_indicator(&self, frame: &mut Frame) {
        let origin = (20.0, self.layout.canvas_height as f32 - 30.0);
        let color = Rgb(config::INDICATOR);
        frame.buffer.draw(|area| {
            let style = rgb(config::INDICATOR);
            arrow(area, origin, (origin.0, origin.1 - 32.0), style, 2, 6.0)?;
            arrow(area, origin, (origin.0 + 32.0, origin.1), style, 2, 6.0)
        });
        frame.label(Label::new("z", origin.0 + 6.0, origin.1 - 24.0, 12.0, color));
        frame.label(Label::new("x", origin.0 + 36.0, origin.1 + 4.0, 12.0, color));
        frame.label(Label::new("0", origin.0 - 12.0, origin.1 + 4.0, 12.0, color));
    }

    /// Start and end points of the mode arrow in surface pixels.
    pub fn arrow_endpoints(
        &self,
        params: &WaveParameters,
        mode: DisplayMode,
    ) -> ((f32, f32), (f32, f32)) {
        let center_x = self.layout.simulation_width as f32 / 2.0;
        let center_y = self.layout.canvas_height as f32 / 2.0;
        let wn = params.wavenumbers();
        // wave vectors are in (x, z); screen y grows towards the conductor
        let direction = |k: Vector2<f32>| {
            let unit = k / wn.k;
            (unit.x * ARROW_LENGTH, -unit.y * ARROW_LENGTH)
        };
        match mode {
            DisplayMode::Incident => {
                let from = (center_x - 50.0, center_y - 50.0);
                let (dx, dy) = direction(wn.incident());
                (from, (from.0 + dx, from.1 + dy))
            }
            DisplayMode::Reflected => {
                let from = (center_x - 50.0, center_y + 50.0);
                let (dx, dy) = direction(wn.reflected());
                (from, (from.0 + dx, from.1 + dy))
            }
            DisplayMode::Total => {
                let from = (center_x - 40.0, center_y);
                (from, (from.0 + ARROW_LENGTH + 20.0, from.1))
            }
        }
    }

    fn draw_arrow(&self, frame: &mut Frame, params: &WaveParameters, mode: DisplayMode) {
        let (color, text) = match mode {
            DisplayMode::Incident => (config::ARROW_INCIDENT, "k_i"),
            DisplayMode::Reflected => (config::ARROW_REFLECTED, "k_r"),
            DisplayMode::Total => (config::ARROW_PHASE, "V_phase"),
        };
        let (from, to) = self.arrow_endpoints(params, mode);
        frame
            .buffer
            .draw(|area| arrow(area, from, to, rgb(color), 3, 10.0));
        let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        frame.label(
            Label::new(text, mid.0, mid.1, 14.0, Rgb(color))
                .anchored(Anchor::Middle)
                .with_backdrop(),
        );
    }
}

/// Straight arrow with a filled head whose barbs sit 30° off the shaft.
fn arrow(
    area: &DrawingSurface<'_>,
    from: (f32, f32),
    to: (f32, f32),
    color: RGBColor,
    width: u32,
    head: f32,
) -> Result<()> {
    let tail = Vector2::new(from.0, from.1);
    let tip = Vector2::new(to.0, to.1);
    let length = (tip - tail).norm();
    if length <= f32::EPSILON {
        return Ok(());
    }
    let direction = (tip - tail) / length;
    let normal = Vector2::new(-direction.y, direction.x);
    let head = head.min(length);
    let base = tip - direction * head * FRAC_PI_6.cos();
    let spread = normal * head * FRAC_PI_6.sin();
    let px = |v: Vector2<f32>| (v.x.round() as i32, v.y.round() as i32);

    area.draw(&PathElement::new(
        vec![px(tail), px(base)],
        color.stroke_width(width),
    ))?;
    area.draw(&Polygon::new(
        vec![px(tip), px(base + spread), px(base - spread)],
        color.filled(),
    ))?;
    Ok(())
}

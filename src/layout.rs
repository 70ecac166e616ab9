//! Surface dimensions and page composition.

use image::Rgb;

use crate::canvas::PixelBuffer;
use crate::config;
use crate::scene::FrameSet;


/// Pixel dimensions of the rendered surfaces.
///
/// One pixel corresponds to one length unit of the wave, so the simulation
/// region spans `simulation_width` units along the conductor and
/// `canvas_height` units away from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub simulation_width: u32,
    pub envelope_width: u32,
    pub canvas_height: u32,
    pub plot_thickness: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            simulation_width: config::SIMULATION_WIDTH,
            envelope_width: config::ENVELOPE_WIDTH,
            canvas_height: config::CANVAS_HEIGHT,
            plot_thickness: config::PLOT_THICKNESS,
        }
    }
}

impl Layout {
    pub fn canvas_width(&self) -> u32 {
        self.simulation_width + self.envelope_width
    }

    /// Field raster plus envelope panel.
    pub fn main_size(&self) -> (u32, u32) {
        (self.canvas_width(), self.canvas_height)
    }

    /// Vertical plot along the surface normal.
    pub fn standing_size(&self) -> (u32, u32) {
        (self.plot_thickness, self.canvas_height)
    }

    /// Horizontal plot along the surface.
    pub fn traveling_size(&self) -> (u32, u32) {
        (self.simulation_width, self.plot_thickness)
    }

    /// The standing plot sits left of the main surface, the traveling plot
    /// below the simulation region.
    pub fn page_size(&self) -> (u32, u32) {
        (
            self.plot_thickness + self.canvas_width(),
            self.canvas_height + self.plot_thickness,
        )
    }

    /// Top-left corners of (standing, main, traveling) on the composed page.
    pub fn page_origins(&self) -> [(i32, i32); 3] {
        let left = self.plot_thickness as i32;
        let top = self.canvas_height as i32;
        [(0, 0), (left, 0), (left, top)]
    }
}

/// Lays out one tick's surfaces on a single page.
///
/// The unused corners (below the standing plot and below the envelope
/// panel) are left in the panel background colour.
pub fn compose(frames: &FrameSet, layout: &Layout) -> PixelBuffer {
    let (width, height) = layout.page_size();
    let mut page = PixelBuffer::new(width, height, Rgb(config::PANEL_BACKGROUND));
    let [standing, main, traveling] = layout.page_origins();
    page.blit(&frames.standing.buffer, standing.0, standing.1);
    page.blit(&frames.main.buffer, main.0, main.1);
    page.blit(&frames.traveling.buffer, traveling.0, traveling.1);
    page
}

//! Render driver tying the clock, the input snapshot and the renderers
//! together.
//!
//! A host (the interactive viewer or the headless exporter) owns one
//! [`Scene`] and calls [`Scene::tick`] once per display refresh. Each tick
//! runs in three steps:
//!
//! 1. apply the controls submitted since the previous tick, all at once;
//! 2. advance the clock (a paused clock keeps its time);
//! 3. repaint every surface from scratch for the resulting time.
//!
//! Control changes made during a tick are therefore never seen half-applied,
//! and once the scene is torn down no further surfaces are produced.

use crate::clock::AnimationClock;
use crate::config;
use crate::layout::Layout;
use crate::overlay::Frame;
use crate::plots::CrossSectionPlotter;
use crate::raster::Rasterizer;
use crate::sampler::DisplayMode;
use crate::settings::Settings;
use crate::wave::{Readout, WaveParameters};

#[cfg(test)]
mod tests {

    use super::*;

    fn small_layout() -> Layout {
        Layout {
            simulation_width: 60,
            envelope_width: 20,
            canvas_height: 50,
            plot_thickness: 20,
        }
    }

    #[test]
    fn controls_clamp_and_snap() {
        let controls = Controls::default();
        assert_eq!(controls.with_angle(120.0).angle_deg, 89.0);
        assert_eq!(controls.with_angle(-3.0).angle_deg, 0.0);
        assert_eq!(controls.with_speed(0.5).speed, 0.2);
        assert_eq!(controls.with_speed(0.0).speed, 0.01);
        assert_eq!(controls.with_speed(0.073).speed, 0.07);
        assert_eq!(controls.with_speed(0.05 + 0.01).speed, 0.06);
        assert_eq!(controls.with_speed(0.05).speed, 0.05);
    }

    #[test]
    fn defaults_match_reference_values() {
        let controls = Controls::default();
        assert_eq!(controls.angle_deg, 45.0);
        assert_eq!(controls.speed, 0.05);
        assert_eq!(controls.mode, DisplayMode::Total);
        assert!(controls.running);
    }

    #[test]
    fn running_ticks_advance_by_one() {
        let mut scene = Scene::new(Controls::default(), small_layout());
        for expected in 1..=5 {
            let frames = scene.tick().unwrap();
            assert_eq!(frames.time, expected);
        }
    }

    #[test]
    fn paused_ticks_are_identical() {
        let controls = Controls::default().with_running(false);
        let mut scene = Scene::new(controls, small_layout());
        let first = scene.tick().cloned().unwrap();
        let second = scene.tick().cloned().unwrap();
        assert_eq!(first.time, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn submitted_controls_apply_on_next_tick() {
        let mut scene = Scene::new(Controls::default(), small_layout());
        scene.tick();
        let changed = scene.controls().with_mode(DisplayMode::Incident).with_angle(10.0);
        scene.submit(changed);
        // not visible until the next tick starts
        assert_eq!(scene.controls().mode, DisplayMode::Total);
        let frames = scene.tick().unwrap();
        assert_eq!(frames.mode, DisplayMode::Incident);
        assert_eq!(frames.readout.angle_deg, 10.0);
        assert_eq!(scene.controls().angle_deg, 10.0);
    }

    #[test]
    fn only_the_latest_submission_counts() {
        let mut scene = Scene::new(Controls::default(), small_layout());
        scene.submit(Controls::default().with_angle(20.0));
        scene.submit(Controls::default().with_angle(30.0));
        scene.tick();
        assert_eq!(scene.controls().angle_deg, 30.0);
    }

    #[test]
    fn pausing_via_controls_stops_time() {
        let mut scene = Scene::new(Controls::default(), small_layout());
        scene.tick();
        scene.tick();
        scene.submit(scene.controls().with_running(false));
        assert_eq!(scene.tick().map(|f| f.time), Some(2));
        assert_eq!(scene.tick().map(|f| f.time), Some(2));
    }

    #[test]
    fn reset_and_teardown() {
        let mut scene = Scene::new(Controls::default(), small_layout());
        scene.tick();
        scene.tick();
        scene.reset();
        assert_eq!(scene.tick().map(|f| f.time), Some(1));
        scene.teardown();
        assert!(scene.tick().is_none());
        assert!(scene.frames().is_none());
        scene.submit(Controls::default());
        assert!(scene.tick().is_none());
    }

    #[test]
    fn frame_set_has_layout_sizes() {
        let layout = small_layout();
        let mut scene = Scene::new(Controls::default(), layout);
        let frames = scene.tick().unwrap();
        assert_eq!(
            (frames.main.buffer.width(), frames.main.buffer.height()),
            layout.main_size()
        );
        assert_eq!(
            (frames.standing.buffer.width(), frames.standing.buffer.height()),
            layout.standing_size()
        );
        assert_eq!(
            (frames.traveling.buffer.width(), frames.traveling.buffer.height()),
            layout.traveling_size()
        );
    }
}

/// Parameter snapshot submitted by the input surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub angle_deg: f32,
    pub speed: f32,
    pub mode: DisplayMode,
    pub running: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            angle_deg: config::DEFAULT_ANGLE,
            speed: config::DEFAULT_SPEED,
            mode: DisplayMode::default(),
            running: true,
        }
    }
}

impl Controls {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::default()
            .with_angle(settings.angle)
            .with_speed(settings.speed)
            .with_mode(settings.mode)
            .with_running(settings.running)
    }

    /// Angle in degrees, clamped to the slider range.
    pub fn with_angle(self, angle_deg: f32) -> Self {
        Self {
            angle_deg: angle_deg.clamp(config::MIN_ANGLE, config::MAX_ANGLE),
            ..self
        }
    }

    /// Speed factor, clamped to the slider range and snapped to its step.
    pub fn with_speed(self, speed: f32) -> Self {
        let clamped = speed.clamp(config::MIN_SPEED, config::MAX_SPEED) as f64;
        // divide by the step count so 0.07 comes out as the literal 0.07
        let steps = (1.0 / config::SPEED_STEP as f64).round();
        let snapped = (clamped * steps).round() / steps;
        Self {
            speed: snapped as f32,
            ..self
        }
    }

    pub fn with_mode(self, mode: DisplayMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_running(self, running: bool) -> Self {
        Self { running, ..self }
    }

    pub fn wave_parameters(&self) -> WaveParameters {
        WaveParameters::new(self.angle_deg, self.speed)
    }
}

/// Every surface rendered for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    pub main: Frame,
    pub standing: Frame,
    pub traveling: Frame,
    pub time: u64,
    pub mode: DisplayMode,
    pub readout: Readout,
}

/// Owns the clock and renderers and produces one [`FrameSet`] per tick.
#[derive(Debug)]
pub struct Scene {
    clock: AnimationClock,
    controls: Controls,
    pending: Option<Controls>,
    layout: Layout,
    rasterizer: Rasterizer,
    plotter: CrossSectionPlotter,
    frames: Option<FrameSet>,
}

impl Scene {
    pub fn new(controls: Controls, layout: Layout) -> Self {
        Self {
            clock: AnimationClock::new(controls.running),
            controls,
            pending: None,
            layout,
            rasterizer: Rasterizer::new(layout),
            plotter: CrossSectionPlotter::new(layout),
            frames: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Controls::from_settings(settings), Layout::default())
    }

    /// Queues a new parameter snapshot. It replaces any snapshot still waiting
    /// and takes effect at the start of the next tick.
    pub fn submit(&mut self, controls: Controls) {
        if self.clock.is_torn_down() {
            return;
        }
        self.pending = Some(controls);
    }

    /// The snapshot in effect, including any queued change.
    pub fn latest_controls(&self) -> Controls {
        self.pending.unwrap_or(self.controls)
    }

    /// The snapshot the last tick rendered with.
    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Surfaces from the most recent tick.
    pub fn frames(&self) -> Option<&FrameSet> {
        self.frames.as_ref()
    }

    pub fn reset(&mut self) {
        self.clock.reset();
        tracing::debug!("clock reset");
    }

    /// Stops the scene for good and drops the last surfaces.
    pub fn teardown(&mut self) {
        if self.clock.is_torn_down() {
            return;
        }
        self.clock.teardown();
        self.pending = None;
        self.frames = None;
        tracing::info!("scene torn down at t = {}", self.clock.time());
    }

    /// Runs one tick and returns the freshly rendered surfaces, or `None`
    /// once the scene has been torn down.
    pub fn tick(&mut self) -> Option<&FrameSet> {
        if self.clock.is_torn_down() {
            return None;
        }
        if let Some(controls) = self.pending.take() {
            self.clock.set_running(controls.running);
            self.controls = controls;
        }
        let time = self.clock.advance()?;

        let params = self.controls.wave_parameters();
        let mode = self.controls.mode;
        self.frames = Some(FrameSet {
            main: self.rasterizer.render(&params, time, mode),
            standing: self.plotter.render_standing(&params, time),
            traveling: self.plotter.render_traveling(&params, time),
            time,
            mode,
            readout: Readout::from(&params),
        });
        self.frames.as_ref()
    }
}

//! Interactive window.
//!
//! Runs one [`Scene::tick`] per display refresh and uploads the three
//! surfaces, captions included, as textures. The keyboard acts as the input
//! surface:
//!
//! | key     | action                        |
//! |---------|-------------------------------|
//! | ← / →   | incidence angle ∓1°           |
//! | ↑ / ↓   | speed factor ±0.01            |
//! | 1, 2, 3 | total, incident, reflected    |
//! | Space   | run / pause                   |
//! | R       | restart time at zero          |
//! | Esc     | close                         |

use macroquad::prelude::{
    clear_background, draw_text_ex, is_key_pressed, next_frame, Color, Conf, KeyCode, TextParams,
    WHITE,
};
use macroquad::texture::{draw_texture, FilterMode, Image, Texture2D};

use crate::canvas::PixelBuffer;
use crate::config;
use crate::layout::Layout;
use crate::overlay::Frame;
use crate::sampler::DisplayMode;
use crate::scene::{Controls, Scene};
use crate::settings::Settings;
use crate::wave::Readout;

/// Height of the readout strip below the page.
const READOUT_HEIGHT: f32 = 56.0;

fn window_conf(layout: &Layout) -> Conf {
    let (width, height) = layout.page_size();
    Conf {
        window_title: "PEC oblique reflection".to_owned(),
        window_width: width as i32,
        window_height: height as i32 + READOUT_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(settings: &Settings) {
    let scene = Scene::from_settings(settings);
    let conf = window_conf(scene.layout());
    tracing::info!("opening viewer\n{settings}");
    macroquad::Window::from_config(conf, event_loop(scene));
}

async fn event_loop(mut scene: Scene) {
    let layout = *scene.layout();
    let [standing_at, main_at, traveling_at] = layout.page_origins();
    let mut standing = Surface::new(layout.standing_size());
    let mut main = Surface::new(layout.main_size());
    let mut traveling = Surface::new(layout.traveling_size());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            scene.teardown();
            break;
        }
        handle_keys(&mut scene);

        if scene.tick().is_none() {
            break;
        }
        let controls = scene.controls();
        let Some(frames) = scene.frames() else {
            break;
        };

        clear_background(rgb(config::PANEL_BACKGROUND));
        standing.show(&frames.standing, standing_at);
        main.show(&frames.main, main_at);
        traveling.show(&frames.traveling, traveling_at);
        draw_readout(&frames.readout, &controls, layout.page_size().1 as f32);

        next_frame().await
    }
}

/// Turns key presses into a new control snapshot for the next tick.
fn handle_keys(scene: &mut Scene) {
    let current = scene.latest_controls();
    let mut next = current;

    if is_key_pressed(KeyCode::Left) {
        next = next.with_angle(next.angle_deg - 1.0);
    }
    if is_key_pressed(KeyCode::Right) {
        next = next.with_angle(next.angle_deg + 1.0);
    }
    if is_key_pressed(KeyCode::Up) {
        next = next.with_speed(next.speed + config::SPEED_STEP);
    }
    if is_key_pressed(KeyCode::Down) {
        next = next.with_speed(next.speed - config::SPEED_STEP);
    }
    for (key, mode) in [
        (KeyCode::Key1, DisplayMode::Total),
        (KeyCode::Key2, DisplayMode::Incident),
        (KeyCode::Key3, DisplayMode::Reflected),
    ] {
        if is_key_pressed(key) {
            next = next.with_mode(mode);
        }
    }
    if is_key_pressed(KeyCode::Space) {
        next = next.with_running(!next.running);
    }
    if is_key_pressed(KeyCode::R) {
        scene.reset();
    }

    if next != current {
        log_change(&current, &next);
        scene.submit(next);
    }
}

fn log_change(before: &Controls, after: &Controls) {
    if before.angle_deg != after.angle_deg {
        tracing::info!("angle: {:.0} deg", after.angle_deg);
    }
    if before.speed != after.speed {
        tracing::info!("speed: {:.2}", after.speed);
    }
    if before.mode != after.mode {
        tracing::info!("mode: {}", after.mode);
    }
    if before.running != after.running {
        tracing::info!("{}", if after.running { "running" } else { "paused" });
    }
}

/// A texture kept in sync with one rendered surface.
struct Surface {
    image: Image,
    texture: Texture2D,
}

impl Surface {
    fn new((width, height): (u32, u32)) -> Self {
        let image = Image {
            bytes: vec![0; (width * height * 4) as usize],
            width: width as u16,
            height: height as u16,
        };
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Self { image, texture }
    }

    fn upload(&mut self, buffer: &PixelBuffer) {
        self.image.bytes.copy_from_slice(&buffer.to_rgba());
        self.texture.update(&self.image);
    }

    fn show(&mut self, frame: &Frame, (x, y): (i32, i32)) {
        self.upload(&frame.buffer);
        draw_texture(&self.texture, x as f32, y as f32, WHITE);
    }
}

fn draw_readout(readout: &Readout, controls: &Controls, top: f32) {
    let color = rgb(config::PLOT_LABEL);
    let lines = [
        format!(
            "angle {:.0} deg   speed {:.2}   v_px/c {:.3}   kx/k {:.3}   kz/k {:.3}",
            readout.angle_deg,
            controls.speed,
            readout.phase_velocity,
            readout.kx_ratio,
            readout.kz_ratio
        ),
        format!(
            "mode {}  {}   arrows: angle/speed  1-3: mode  space: pause  r: reset",
            controls.mode,
            if controls.running { "running" } else { "paused" }
        ),
    ];
    for (i, line) in lines.iter().enumerate() {
        let params = TextParams {
            font_size: 16,
            color,
            ..Default::default()
        };
        draw_text_ex(line, 8.0, top + 20.0 + 22.0 * i as f32, params);
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba(r, g, b, 255)
}
